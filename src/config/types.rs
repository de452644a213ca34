//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 数据库配置
    #[serde(default)]
    pub database: DatabaseConfig,

    /// 头像存储配置
    #[serde(default)]
    pub storage: StorageConfig,

    /// 身份校验配置
    #[serde(default)]
    pub auth: AuthConfig,

    /// 通知服务配置
    #[serde(default)]
    pub notify: NotifyConfig,

    /// CORS 配置
    #[serde(default)]
    pub cors: CorsConfig,

    /// 功能开关
    #[serde(default)]
    pub features: FeatureFlags,

    /// 好友配置
    #[serde(default)]
    pub friends: FriendsConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8787
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 数据库配置
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// 数据库文件路径
    #[serde(default = "default_db_path")]
    pub path: String,

    /// 最大连接数
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_db_path() -> String {
    "data/scrol.db".to_string()
}

fn default_max_connections() -> u32 {
    5
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            max_connections: default_max_connections(),
        }
    }
}

impl DatabaseConfig {
    /// 获取数据库 URL
    pub fn database_url(&self) -> String {
        format!("sqlite:{}?mode=rwc", self.path)
    }
}

/// 头像存储配置
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// 对象存储根目录
    #[serde(default = "default_photo_dir")]
    pub photo_dir: PathBuf,

    /// 未上传头像时使用的默认 key
    #[serde(default = "default_photo_key")]
    pub default_photo_key: String,

    /// 对象缺少 Content-Type 时的兜底值
    #[serde(default = "default_fallback_content_type")]
    pub fallback_content_type: String,

    /// 上传文件最大大小（字节），默认 5MB
    #[serde(default = "default_max_upload_size")]
    pub max_upload_size: usize,
}

fn default_photo_dir() -> PathBuf {
    PathBuf::from("data/photos")
}

fn default_photo_key() -> String {
    "Default_pfp.jpg".to_string()
}

fn default_fallback_content_type() -> String {
    "image/jpeg".to_string()
}

fn default_max_upload_size() -> usize {
    5 * 1024 * 1024 // 5 MB
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            photo_dir: default_photo_dir(),
            default_photo_key: default_photo_key(),
            fallback_content_type: default_fallback_content_type(),
            max_upload_size: default_max_upload_size(),
        }
    }
}

/// 身份校验配置
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// 身份服务基础 URL（拼接 `/tokeninfo`）
    #[serde(default = "default_verifier_url")]
    pub verifier_url: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// 期望的 aud 声明
    #[serde(default)]
    pub audience: Option<String>,
}

fn default_verifier_url() -> String {
    "https://oauth2.googleapis.com".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            verifier_url: default_verifier_url(),
            timeout_secs: default_timeout_secs(),
            audience: None,
        }
    }
}

/// 通知服务配置
#[derive(Debug, Clone, Deserialize)]
pub struct NotifyConfig {
    /// 通知服务基础 URL（拼接 `/sendto`）
    #[serde(default = "default_notify_url")]
    pub url: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// 好友请求通知中的链接
    #[serde(default = "default_friends_url")]
    pub friends_url: String,
}

fn default_notify_url() -> String {
    "http://localhost:8788".to_string()
}

fn default_friends_url() -> String {
    "https://scrol.asia/friends".to_string()
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            url: default_notify_url(),
            timeout_secs: default_timeout_secs(),
            friends_url: default_friends_url(),
        }
    }
}

/// CORS 配置，启动后不可变
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    #[serde(default = "default_allow_origin")]
    pub allow_origin: String,

    #[serde(default = "default_allow_methods")]
    pub allow_methods: String,

    #[serde(default = "default_allow_headers")]
    pub allow_headers: String,
}

fn default_allow_origin() -> String {
    "*".to_string()
}

fn default_allow_methods() -> String {
    "GET, HEAD, POST, OPTIONS".to_string()
}

fn default_allow_headers() -> String {
    "Content-Type, Access-Control-Allow-Origin".to_string()
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allow_origin: default_allow_origin(),
            allow_methods: default_allow_methods(),
            allow_headers: default_allow_headers(),
        }
    }
}

/// 功能开关
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureFlags {
    /// 注册无需令牌的 GET 路由
    #[serde(default = "default_true")]
    pub public_routes: bool,

    /// 注册 `POST /updatepicture`
    #[serde(default = "default_true")]
    pub photo_upload: bool,

    /// 读写并返回 company 字段
    #[serde(default = "default_true")]
    pub company_field: bool,
}

fn default_true() -> bool {
    true
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            public_routes: true,
            photo_upload: true,
            company_field: true,
        }
    }
}

/// 好友配置
#[derive(Debug, Clone, Deserialize)]
pub struct FriendsConfig {
    /// 添加好友需对方接受
    #[serde(default)]
    pub require_accept: bool,

    /// `/myfriends` 的 limit 上限
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u32,
}

fn default_max_page_size() -> u32 {
    100
}

impl Default for FriendsConfig {
    fn default() -> Self {
        Self {
            require_accept: false,
            max_page_size: default_max_page_size(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否输出 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
