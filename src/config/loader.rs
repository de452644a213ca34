//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 加载应用配置
///
/// # 环境变量示例
/// - `SCROL_SERVER__PORT=8080`
/// - `SCROL_AUTH__VERIFIER_URL=https://oauth2.googleapis.com`
/// - `SCROL_FRIENDS__REQUIRE_ACCEPT=true`
/// - `SCROL_DATABASE__PATH=/data/scrol.db`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// `config_path` 为 None 时搜索 `config.toml` / `config.local.toml`
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 8787)?
        .set_default("database.path", "data/scrol.db")?
        .set_default("database.max_connections", 5)?
        .set_default("storage.photo_dir", "data/photos")?
        .set_default("storage.default_photo_key", "Default_pfp.jpg")?
        .set_default("storage.fallback_content_type", "image/jpeg")?
        .set_default("storage.max_upload_size", 5 * 1024 * 1024)?
        .set_default("auth.verifier_url", "https://oauth2.googleapis.com")?
        .set_default("auth.timeout_secs", 10)?
        .set_default("notify.url", "http://localhost:8788")?
        .set_default("notify.timeout_secs", 10)?
        .set_default("notify.friends_url", "https://scrol.asia/friends")?
        .set_default("cors.allow_origin", "*")?
        .set_default("cors.allow_methods", "GET, HEAD, POST, OPTIONS")?
        .set_default("cors.allow_headers", "Content-Type, Access-Control-Allow-Origin")?
        .set_default("features.public_routes", true)?
        .set_default("features.photo_upload", true)?
        .set_default("features.company_field", true)?
        .set_default("friends.require_accept", false)?
        .set_default("friends.max_page_size", 100)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 前缀 SCROL_，层级分隔符 __
    builder = builder.add_source(
        Environment::with_prefix("SCROL")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if config.auth.verifier_url.is_empty() {
        return Err(ConfigError::ValidationError(
            "Verifier URL cannot be empty".to_string(),
        ));
    }

    if config.database.path.is_empty() {
        return Err(ConfigError::ValidationError(
            "Database path cannot be empty".to_string(),
        ));
    }

    if config.storage.default_photo_key.is_empty() {
        return Err(ConfigError::ValidationError(
            "Default photo key cannot be empty".to_string(),
        ));
    }

    if config.friends.max_page_size == 0 {
        return Err(ConfigError::ValidationError(
            "Max page size must be positive".to_string(),
        ));
    }

    if config.cors.allow_origin.is_empty() {
        return Err(ConfigError::ValidationError(
            "CORS allow origin cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}:{}", config.server.host, config.server.port);
    tracing::info!("Database: {}", config.database.path);
    tracing::info!("Database Max Connections: {}", config.database.max_connections);
    tracing::info!("Photo Directory: {:?}", config.storage.photo_dir);
    tracing::info!("Default Photo Key: {}", config.storage.default_photo_key);
    tracing::info!("Verifier URL: {}", config.auth.verifier_url);
    tracing::info!("Audience Check: {}", config.auth.audience.is_some());
    tracing::info!("Notifier URL: {}", config.notify.url);
    tracing::info!(
        "Features: public_routes={}, photo_upload={}, company_field={}",
        config.features.public_routes,
        config.features.photo_upload,
        config.features.company_field
    );
    tracing::info!("Friend Requests Need Accept: {}", config.friends.require_accept);
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}
