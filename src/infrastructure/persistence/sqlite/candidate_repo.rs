//! SQLite Candidate Repository

use async_trait::async_trait;
use sqlx::FromRow;

use super::DbPool;
use crate::application::ports::{
    CandidateRecord, CandidateRepositoryPort, CandidateSummary, RepositoryError,
};
use crate::domain::candidate::{CandidateId, Email, ProfileFields};

/// SQLite Candidate Repository
pub struct SqliteCandidateRepository {
    pool: DbPool,
}

impl SqliteCandidateRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct CandidateRow {
    candidate_id: i64,
    candidate_email: String,
    candidate_name: Option<String>,
    candidate_gender: Option<String>,
    candidate_sector: Option<String>,
    candidate_jobtitle: Option<String>,
    candidate_company: Option<String>,
    candidate_photo: Option<String>,
    cv: Option<String>,
}

impl From<CandidateRow> for CandidateRecord {
    fn from(row: CandidateRow) -> Self {
        CandidateRecord {
            id: CandidateId::new(row.candidate_id),
            email: row.candidate_email,
            name: row.candidate_name,
            gender: row.candidate_gender,
            sector: row.candidate_sector,
            job_title: row.candidate_jobtitle,
            company: row.candidate_company,
            photo: row.candidate_photo,
            cv: row.cv,
        }
    }
}

#[derive(FromRow)]
struct CandidateSummaryRow {
    candidate_id: i64,
    candidate_name: Option<String>,
    candidate_email: String,
}

const SELECT_CANDIDATE: &str = r#"
SELECT candidate_id, candidate_email, candidate_name, candidate_gender, candidate_sector,
       candidate_jobtitle, candidate_company, candidate_photo, cv
FROM candidate
"#;

/// 转义 LIKE 通配符，使查询按字面子串匹配
fn escape_like(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len());
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[async_trait]
impl CandidateRepositoryPort for SqliteCandidateRepository {
    async fn find_by_id(&self, id: CandidateId) -> Result<Option<CandidateRecord>, RepositoryError> {
        let row: Option<CandidateRow> =
            sqlx::query_as(&format!("{} WHERE candidate_id = ?", SELECT_CANDIDATE))
                .bind(id.as_i64())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(row.map(CandidateRecord::from))
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<CandidateRecord>, RepositoryError> {
        let row: Option<CandidateRow> =
            sqlx::query_as(&format!("{} WHERE candidate_email = ?", SELECT_CANDIDATE))
                .bind(email.as_str())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(row.map(CandidateRecord::from))
    }

    async fn search(&self, query: &str) -> Result<Vec<CandidateSummary>, RepositoryError> {
        let pattern = format!("%{}%", escape_like(query));

        let rows: Vec<CandidateSummaryRow> = sqlx::query_as(
            r#"
            SELECT candidate_id, candidate_name, candidate_email
            FROM candidate
            WHERE candidate_email LIKE ?1 ESCAPE '\'
               OR candidate_name LIKE ?1 ESCAPE '\'
            "#,
        )
        .bind(pattern)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|row| CandidateSummary {
                id: CandidateId::new(row.candidate_id),
                name: row.candidate_name,
                email: row.candidate_email,
            })
            .collect())
    }

    async fn update_profile(
        &self,
        email: &Email,
        fields: &ProfileFields,
        include_company: bool,
    ) -> Result<Option<CandidateRecord>, RepositoryError> {
        // 更新与回读在同一事务内
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        let result = if include_company {
            sqlx::query(
                r#"
                UPDATE candidate
                SET candidate_name = ?, candidate_gender = ?, candidate_sector = ?,
                    candidate_jobtitle = ?, candidate_company = ?
                WHERE candidate_email = ?
                "#,
            )
            .bind(&fields.name)
            .bind(&fields.gender)
            .bind(&fields.sector)
            .bind(&fields.job_title)
            .bind(&fields.company)
            .bind(email.as_str())
            .execute(&mut *tx)
            .await
        } else {
            sqlx::query(
                r#"
                UPDATE candidate
                SET candidate_name = ?, candidate_gender = ?, candidate_sector = ?,
                    candidate_jobtitle = ?
                WHERE candidate_email = ?
                "#,
            )
            .bind(&fields.name)
            .bind(&fields.gender)
            .bind(&fields.sector)
            .bind(&fields.job_title)
            .bind(email.as_str())
            .execute(&mut *tx)
            .await
        }
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            tx.rollback()
                .await
                .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;
            return Ok(None);
        }

        let row: CandidateRow =
            sqlx::query_as(&format!("{} WHERE candidate_email = ?", SELECT_CANDIDATE))
                .bind(email.as_str())
                .fetch_one(&mut *tx)
                .await
                .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(Some(CandidateRecord::from(row)))
    }

    async fn set_photo(&self, id: CandidateId, photo_key: &str) -> Result<(), RepositoryError> {
        sqlx::query("UPDATE candidate SET candidate_photo = ? WHERE candidate_id = ?")
            .bind(photo_key)
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestContext;

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("ali"), "ali");
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
    }

    #[tokio::test]
    async fn test_find_projects_all_columns() {
        let ctx = TestContext::new().await;
        let id = ctx.seed_candidate("a@x.com", "Alice").await;
        sqlx::query(
            "UPDATE candidate SET candidate_jobtitle = 'Engineer', candidate_photo = 'p.jpg', cv = 'cv-1' WHERE candidate_id = ?",
        )
        .bind(id.as_i64())
        .execute(&ctx.pool)
        .await
        .unwrap();

        let record = ctx.candidate_repo.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(record.email, "a@x.com");
        assert_eq!(record.name.as_deref(), Some("Alice"));
        assert_eq!(record.job_title.as_deref(), Some("Engineer"));
        assert_eq!(record.photo.as_deref(), Some("p.jpg"));
        assert_eq!(record.cv.as_deref(), Some("cv-1"));
        assert_eq!(record.gender, None);
    }

    #[tokio::test]
    async fn test_search_treats_wildcards_literally() {
        let ctx = TestContext::new().await;
        ctx.seed_candidate("percent@x.com", "100% Remote").await;
        ctx.seed_candidate("plain@x.com", "Remote").await;

        let results = ctx.candidate_repo.search("100%").await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].email, "percent@x.com");

        let results = ctx.candidate_repo.search("_").await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_update_profile_unknown_email() {
        let ctx = TestContext::new().await;
        let result = ctx
            .candidate_repo
            .update_profile(&Email::new("ghost@x.com").unwrap(), &ProfileFields::default(), true)
            .await
            .unwrap();
        assert!(result.is_none());
    }
}
