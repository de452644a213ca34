//! Scrol - 候选人资料与好友 API
//!
//! - Domain: candidate/, friendship/
//! - Application: commands, queries, ports
//! - Infrastructure: http, persistence, adapters

use std::sync::Arc;

use scrol::config::{load_config, print_config};
use scrol::infrastructure::adapters::{
    FileBlobStore, HttpNotifier, HttpNotifierConfig, HttpTokenVerifier, HttpTokenVerifierConfig,
};
use scrol::infrastructure::http::{AppSettings, AppState, HttpServer};
use scrol::infrastructure::persistence::sqlite::{
    create_pool, run_migrations, DatabaseConfig, SqliteCandidateRepository, SqliteCvRepository,
    SqliteFriendRepository,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志
    let log_filter = format!(
        "{},scrol={},tower_http=debug",
        config.log.level, config.log.level
    );
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));
    if config.log.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    tracing::info!("Scrol - 候选人资料与好友 API");
    print_config(&config);

    // 确保数据目录存在
    if let Some(parent) = std::path::Path::new(&config.database.path).parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    // 初始化数据库
    let db_config = DatabaseConfig {
        database_url: config.database.database_url(),
        max_connections: config.database.max_connections,
    };
    let pool = create_pool(&db_config).await?;
    run_migrations(&pool).await?;

    // 创建 Repository 适配器
    let candidate_repo = Arc::new(SqliteCandidateRepository::new(pool.clone()));
    let friend_repo = Arc::new(SqliteFriendRepository::new(pool.clone()));
    let cv_repo = Arc::new(SqliteCvRepository::new(pool.clone()));

    // 头像对象存储
    let blob_store = Arc::new(FileBlobStore::new(&config.storage.photo_dir).await?);

    // 外部服务客户端
    let verifier = Arc::new(HttpTokenVerifier::new(
        HttpTokenVerifierConfig::new(&config.auth.verifier_url)
            .with_timeout(config.auth.timeout_secs)
            .with_audience(config.auth.audience.clone()),
    )?);
    let notifier = Arc::new(HttpNotifier::new(
        HttpNotifierConfig::new(&config.notify.url).with_timeout(config.notify.timeout_secs),
    )?);

    // 创建 HTTP 服务器
    let settings = AppSettings::from_config(&config)?;
    let state = AppState::new(
        candidate_repo,
        friend_repo,
        cv_repo,
        blob_store,
        verifier,
        notifier,
        settings,
    );

    let server = HttpServer::new(config.server.clone(), state);

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
                return;
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
