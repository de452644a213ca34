//! 测试辅助：内存数据库 + 临时目录对象存储 + 假外部服务

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

use crate::application::ports::{
    BlobStorePort, CandidateRepositoryPort, CvRepositoryPort, FriendRepositoryPort,
    IdentityVerifierPort, Notification, NotifierPort, NotifyError, VerifiedIdentity,
    VerifierError,
};
use crate::domain::candidate::{CandidateId, Email};
use crate::domain::friendship::FriendStatus;
use crate::infrastructure::adapters::FileBlobStore;
use crate::infrastructure::persistence::sqlite::{
    create_pool, run_migrations, DatabaseConfig, DbPool, SqliteCandidateRepository,
    SqliteCvRepository, SqliteFriendRepository,
};

pub struct TestContext {
    pub pool: DbPool,
    pub candidate_repo: Arc<dyn CandidateRepositoryPort>,
    pub friend_repo: Arc<dyn FriendRepositoryPort>,
    pub cv_repo: Arc<dyn CvRepositoryPort>,
    pub blob_store: Arc<dyn BlobStorePort>,
    objects_dir: std::path::PathBuf,
    _blob_dir: TempDir,
}

impl TestContext {
    pub const DEFAULT_PHOTO_KEY: &'static str = "Default_pfp.jpg";

    pub async fn new() -> Self {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();

        let blob_dir = tempfile::tempdir().unwrap();
        let blob_store = FileBlobStore::new(blob_dir.path()).await.unwrap();
        let objects_dir = blob_store.objects_dir();

        Self {
            candidate_repo: Arc::new(SqliteCandidateRepository::new(pool.clone())),
            friend_repo: Arc::new(SqliteFriendRepository::new(pool.clone())),
            cv_repo: Arc::new(SqliteCvRepository::new(pool.clone())),
            blob_store: Arc::new(blob_store),
            pool,
            objects_dir,
            _blob_dir: blob_dir,
        }
    }

    pub async fn seed_candidate(&self, email: &str, name: &str) -> CandidateId {
        let result =
            sqlx::query("INSERT INTO candidate (candidate_email, candidate_name) VALUES (?, ?)")
                .bind(email)
                .bind(name)
                .execute(&self.pool)
                .await
                .unwrap();
        CandidateId::new(result.last_insert_rowid())
    }

    pub async fn seed_edge(&self, from: CandidateId, to: CandidateId, status: FriendStatus) {
        self.friend_repo
            .insert_edge(from, to, status, Utc::now())
            .await
            .unwrap();
    }

    pub async fn seed_cv(&self, id: &str, email: &str, name: &str, is_default: bool) {
        sqlx::query(
            "INSERT INTO cv (cv_id, candidate_email, cv_name, cv_created, cv_default, original_filename) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(id)
        .bind(email)
        .bind(name)
        .bind("2024-01-01T00:00:00.000Z")
        .bind(if is_default { "true" } else { "false" })
        .bind(format!("{}.pdf", name))
        .execute(&self.pool)
        .await
        .unwrap();
    }

    pub async fn count_edges(&self) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM friends")
            .fetch_one(&self.pool)
            .await
            .unwrap()
    }

    /// 已存储对象数（不含临时文件）
    pub async fn blob_count(&self) -> usize {
        let mut entries = tokio::fs::read_dir(&self.objects_dir).await.unwrap();
        let mut count = 0;
        while let Some(entry) = entries.next_entry().await.unwrap() {
            if !entry.file_name().to_string_lossy().starts_with('.') {
                count += 1;
            }
        }
        count
    }

    /// 直接写入一个对象（如默认头像）
    pub async fn put_blob(&self, key: &str, data: &[u8], content_type: &str) {
        self.blob_store
            .put(key, data.to_vec(), content_type)
            .await
            .unwrap();
    }
}

/// 记录所有投递的通知
#[derive(Default)]
pub struct FakeNotifier {
    sent: Mutex<Vec<Notification>>,
    fail: bool,
}

impl FakeNotifier {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn sent(&self) -> Vec<Notification> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotifierPort for FakeNotifier {
    async fn send(&self, notification: Notification) -> Result<(), NotifyError> {
        if self.fail {
            return Err(NotifyError::ServiceError("HTTP 502".to_string()));
        }
        self.sent.lock().unwrap().push(notification);
        Ok(())
    }
}

/// token -> email 映射；`"unreachable"` 模拟传输失败
#[derive(Default)]
pub struct FakeVerifier {
    tokens: HashMap<String, String>,
}

impl FakeVerifier {
    pub fn with_token(mut self, token: &str, email: &str) -> Self {
        self.tokens.insert(token.to_string(), email.to_string());
        self
    }
}

#[async_trait]
impl IdentityVerifierPort for FakeVerifier {
    async fn verify(&self, token: &str) -> Result<VerifiedIdentity, VerifierError> {
        if token == "unreachable" {
            return Err(VerifierError::NetworkError("connection refused".to_string()));
        }
        match self.tokens.get(token) {
            Some(email) => Ok(VerifiedIdentity {
                email: Email::new(email.as_str()).unwrap(),
            }),
            None => Err(VerifierError::Rejected("HTTP 400 Bad Request".to_string())),
        }
    }
}
