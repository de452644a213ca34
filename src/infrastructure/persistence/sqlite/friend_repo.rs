//! SQLite Friend Repository

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::FromRow;

use super::DbPool;
use crate::application::ports::{
    FriendEdgeRecord, FriendListEntry, FriendRepositoryPort, RepositoryError,
};
use crate::domain::candidate::{CandidateId, Email};
use crate::domain::friendship::FriendStatus;

/// SQLite Friend Repository
pub struct SqliteFriendRepository {
    pool: DbPool,
}

impl SqliteFriendRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct FriendEdgeRow {
    candidate_id: i64,
    friend_id: i64,
    created: String,
    status: String,
}

impl TryFrom<FriendEdgeRow> for FriendEdgeRecord {
    type Error = RepositoryError;

    fn try_from(row: FriendEdgeRow) -> Result<Self, Self::Error> {
        Ok(FriendEdgeRecord {
            candidate_id: CandidateId::new(row.candidate_id),
            friend_id: CandidateId::new(row.friend_id),
            created: row.created,
            status: FriendStatus::from_str(&row.status).ok_or_else(|| {
                RepositoryError::SerializationError(format!("Unknown friend status: {}", row.status))
            })?,
        })
    }
}

#[derive(FromRow)]
struct FriendListRow {
    friend_id: i64,
    created: String,
    name: Option<String>,
}

/// 两个方向的 ACTIVE 边取并集，再分页
const SQL_LIST_ACTIVE_FRIENDS: &str = r#"
SELECT f.friend_id AS friend_id, f.created AS created, r.candidate_name AS name
FROM friends f
JOIN candidate c ON c.candidate_id = f.candidate_id
JOIN candidate r ON r.candidate_id = f.friend_id
WHERE c.candidate_email = ?1 AND f.status = ?2
UNION
SELECT f.candidate_id AS friend_id, f.created AS created, r.candidate_name AS name
FROM friends f
JOIN candidate c ON c.candidate_id = f.friend_id
JOIN candidate r ON r.candidate_id = f.candidate_id
WHERE c.candidate_email = ?1 AND f.status = ?2
ORDER BY created DESC, friend_id ASC
LIMIT ?3 OFFSET ?4
"#;

const SQL_SET_EDGE_STATUS: &str =
    "UPDATE friends SET status = ? WHERE candidate_id = ? AND friend_id = ?";

#[async_trait]
impl FriendRepositoryPort for SqliteFriendRepository {
    async fn insert_edge(
        &self,
        from: CandidateId,
        to: CandidateId,
        status: FriendStatus,
        created: DateTime<Utc>,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO friends (candidate_id, friend_id, created, status) VALUES (?, ?, ?, ?)",
        )
        .bind(from.as_i64())
        .bind(to.as_i64())
        .bind(created.to_rfc3339_opts(SecondsFormat::Millis, true))
        .bind(status.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                RepositoryError::Duplicate(format!("friends {} -> {}", from, to))
            }
            other => RepositoryError::DatabaseError(other.to_string()),
        })?;

        Ok(())
    }

    async fn find_edge(
        &self,
        from: CandidateId,
        to: CandidateId,
    ) -> Result<Option<FriendEdgeRecord>, RepositoryError> {
        let row: Option<FriendEdgeRow> = sqlx::query_as(
            "SELECT candidate_id, friend_id, created, status FROM friends WHERE candidate_id = ? AND friend_id = ?",
        )
        .bind(from.as_i64())
        .bind(to.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        row.map(FriendEdgeRecord::try_from).transpose()
    }

    async fn block_pair(&self, a: CandidateId, b: CandidateId) -> Result<u64, RepositoryError> {
        // 两个方向在同一事务内更新
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        let mut updated = 0;
        for (from, to) in [(a, b), (b, a)] {
            let result = sqlx::query(SQL_SET_EDGE_STATUS)
                .bind(FriendStatus::Blocked.as_str())
                .bind(from.as_i64())
                .bind(to.as_i64())
                .execute(&mut *tx)
                .await
                .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;
            updated += result.rows_affected();
        }

        tx.commit()
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(updated)
    }

    async fn activate_pending(
        &self,
        from: CandidateId,
        to: CandidateId,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query(&format!("{} AND status = ?", SQL_SET_EDGE_STATUS))
            .bind(FriendStatus::Active.as_str())
            .bind(from.as_i64())
            .bind(to.as_i64())
            .bind(FriendStatus::Pending.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_active(
        &self,
        email: &Email,
        limit: u32,
        offset: u64,
    ) -> Result<Vec<FriendListEntry>, RepositoryError> {
        let rows: Vec<FriendListRow> = sqlx::query_as(SQL_LIST_ACTIVE_FRIENDS)
            .bind(email.as_str())
            .bind(FriendStatus::Active.as_str())
            .bind(i64::from(limit))
            .bind(offset as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|row| FriendListEntry {
                friend_id: CandidateId::new(row.friend_id),
                created: row.created,
                name: row.name,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestContext;
    use std::collections::HashSet;

    #[tokio::test]
    async fn test_insert_duplicate_edge() {
        let ctx = TestContext::new().await;
        let a = ctx.seed_candidate("a@x.com", "Alice").await;
        let b = ctx.seed_candidate("b@x.com", "Bob").await;

        ctx.friend_repo
            .insert_edge(a, b, FriendStatus::Active, Utc::now())
            .await
            .unwrap();
        let err = ctx
            .friend_repo
            .insert_edge(a, b, FriendStatus::Active, Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Duplicate(_)));
    }

    #[tokio::test]
    async fn test_block_pair_missing_edges_is_noop() {
        let ctx = TestContext::new().await;
        let a = ctx.seed_candidate("a@x.com", "Alice").await;
        let b = ctx.seed_candidate("b@x.com", "Bob").await;

        assert_eq!(ctx.friend_repo.block_pair(a, b).await.unwrap(), 0);

        ctx.seed_edge(b, a, FriendStatus::Active).await;
        assert_eq!(ctx.friend_repo.block_pair(a, b).await.unwrap(), 1);
        let edge = ctx.friend_repo.find_edge(b, a).await.unwrap().unwrap();
        assert_eq!(edge.status, FriendStatus::Blocked);
    }

    #[tokio::test]
    async fn test_list_active_unions_both_directions() {
        let ctx = TestContext::new().await;
        let a = ctx.seed_candidate("a@x.com", "Alice").await;
        let b = ctx.seed_candidate("b@x.com", "Bob").await;
        let c = ctx.seed_candidate("c@x.com", "Carol").await;
        let d = ctx.seed_candidate("d@x.com", "Dave").await;
        let e = ctx.seed_candidate("e@x.com", "Eve").await;
        let f = ctx.seed_candidate("f@x.com", "Frank").await;

        ctx.seed_edge(a, b, FriendStatus::Active).await;
        ctx.seed_edge(c, a, FriendStatus::Active).await;
        ctx.seed_edge(a, d, FriendStatus::Active).await;
        ctx.seed_edge(e, a, FriendStatus::Active).await;
        ctx.seed_edge(a, f, FriendStatus::Blocked).await;
        ctx.seed_edge(b, c, FriendStatus::Active).await;

        let email = Email::new("a@x.com").unwrap();
        let all = ctx.friend_repo.list_active(&email, 10, 0).await.unwrap();
        let ids: HashSet<_> = all.iter().map(|entry| entry.friend_id).collect();
        assert_eq!(ids, HashSet::from([b, c, d, e]));

        let bob = all.iter().find(|entry| entry.friend_id == b).unwrap();
        assert_eq!(bob.name.as_deref(), Some("Bob"));

        // limit=2, page=2 => offset=2
        let first = ctx.friend_repo.list_active(&email, 2, 0).await.unwrap();
        let second = ctx.friend_repo.list_active(&email, 2, 2).await.unwrap();
        assert_eq!(first.len(), 2);
        assert_eq!(second.len(), 2);
        let paged: HashSet<_> = first.iter().chain(second.iter()).map(|e| e.friend_id).collect();
        assert_eq!(paged, ids);

        let beyond = ctx.friend_repo.list_active(&email, 2, 4).await.unwrap();
        assert!(beyond.is_empty());
    }
}
