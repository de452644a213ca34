//! Repository Ports - 出站端口
//!
//! 定义数据持久化的抽象接口
//! 具体实现在 infrastructure 层（SQLite）
//!
//! 多语句的写操作（拉黑双向更新、资料更新后回读）在端口内部保证原子性，
//! 调用方只看到单个操作。

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::candidate::{CandidateId, Email, ProfileFields};
use crate::domain::friendship::FriendStatus;

/// Repository 错误
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Duplicate entity: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

// ============================================================================
// Candidate Repository
// ============================================================================

/// 候选人实体（用于持久化）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateRecord {
    pub id: CandidateId,
    pub email: String,
    pub name: Option<String>,
    pub gender: Option<String>,
    pub sector: Option<String>,
    pub job_title: Option<String>,
    pub company: Option<String>,
    /// 头像在 blob 存储中的 key，为空时使用默认头像
    pub photo: Option<String>,
    pub cv: Option<String>,
}

/// 搜索结果条目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateSummary {
    pub id: CandidateId,
    pub name: Option<String>,
    pub email: String,
}

/// Candidate Repository Port
#[async_trait]
pub trait CandidateRepositoryPort: Send + Sync {
    /// 根据 ID 查找候选人
    async fn find_by_id(&self, id: CandidateId) -> Result<Option<CandidateRecord>, RepositoryError>;

    /// 根据 email 查找候选人
    async fn find_by_email(&self, email: &Email) -> Result<Option<CandidateRecord>, RepositoryError>;

    /// email 或姓名的子串匹配（大小写不敏感）
    async fn search(&self, query: &str) -> Result<Vec<CandidateSummary>, RepositoryError>;

    /// 覆盖资料字段并返回更新后的记录（同一事务内）
    ///
    /// `include_company` 为 false 时不触碰 company 列。
    /// 候选人不存在时返回 `Ok(None)`。
    async fn update_profile(
        &self,
        email: &Email,
        fields: &ProfileFields,
        include_company: bool,
    ) -> Result<Option<CandidateRecord>, RepositoryError>;

    /// 设置头像 key
    async fn set_photo(&self, id: CandidateId, photo_key: &str) -> Result<(), RepositoryError>;
}

// ============================================================================
// Friend Repository
// ============================================================================

/// 好友边实体
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FriendEdgeRecord {
    pub candidate_id: CandidateId,
    pub friend_id: CandidateId,
    pub created: String,
    pub status: FriendStatus,
}

/// 好友列表条目（对端视角）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FriendListEntry {
    pub friend_id: CandidateId,
    pub created: String,
    pub name: Option<String>,
}

/// Friend Repository Port
#[async_trait]
pub trait FriendRepositoryPort: Send + Sync {
    /// 插入一条有向边，已存在时返回 `RepositoryError::Duplicate`
    async fn insert_edge(
        &self,
        from: CandidateId,
        to: CandidateId,
        status: FriendStatus,
        created: DateTime<Utc>,
    ) -> Result<(), RepositoryError>;

    /// 查找有向边 from -> to
    async fn find_edge(
        &self,
        from: CandidateId,
        to: CandidateId,
    ) -> Result<Option<FriendEdgeRecord>, RepositoryError>;

    /// 将两个方向的边都置为 BLOCKED（同一事务内），返回受影响行数
    ///
    /// 不存在的方向是空操作。
    async fn block_pair(&self, a: CandidateId, b: CandidateId) -> Result<u64, RepositoryError>;

    /// 将 PENDING 的 from -> to 边置为 ACTIVE，返回是否有边被更新
    async fn activate_pending(
        &self,
        from: CandidateId,
        to: CandidateId,
    ) -> Result<bool, RepositoryError>;

    /// 分页列出两个方向上的 ACTIVE 好友
    async fn list_active(
        &self,
        email: &Email,
        limit: u32,
        offset: u64,
    ) -> Result<Vec<FriendListEntry>, RepositoryError>;
}

// ============================================================================
// CV Repository
// ============================================================================

/// 简历实体
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CvRecord {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    pub created: Option<String>,
    pub is_default: bool,
    pub original_filename: Option<String>,
}

/// CV Repository Port
#[async_trait]
pub trait CvRepositoryPort: Send + Sync {
    /// 获取候选人的全部简历
    async fn find_by_email(&self, email: &Email) -> Result<Vec<CvRecord>, RepositoryError>;
}
