//! SQLite CV Repository

use async_trait::async_trait;
use sqlx::FromRow;

use super::DbPool;
use crate::application::ports::{CvRecord, CvRepositoryPort, RepositoryError};
use crate::domain::candidate::Email;

/// SQLite CV Repository
pub struct SqliteCvRepository {
    pool: DbPool,
}

impl SqliteCvRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct CvRow {
    cv_id: String,
    candidate_email: String,
    cv_name: Option<String>,
    cv_created: Option<String>,
    cv_default: Option<String>,
    original_filename: Option<String>,
}

impl From<CvRow> for CvRecord {
    fn from(row: CvRow) -> Self {
        CvRecord {
            id: row.cv_id,
            email: row.candidate_email,
            name: row.cv_name,
            created: row.cv_created,
            // 默认标记以字符串 "true" 存储
            is_default: row.cv_default.as_deref() == Some("true"),
            original_filename: row.original_filename,
        }
    }
}

#[async_trait]
impl CvRepositoryPort for SqliteCvRepository {
    async fn find_by_email(&self, email: &Email) -> Result<Vec<CvRecord>, RepositoryError> {
        let rows: Vec<CvRow> = sqlx::query_as(
            r#"
            SELECT cv_id, candidate_email, cv_name, cv_created, cv_default, original_filename
            FROM cv
            WHERE candidate_email = ?
            "#,
        )
        .bind(email.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(rows.into_iter().map(CvRecord::from).collect())
    }
}
