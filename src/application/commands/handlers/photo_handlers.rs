//! Photo Command Handlers

use std::sync::Arc;
use uuid::Uuid;

use crate::application::commands::UpdatePicture;
use crate::application::error::ApplicationError;
use crate::application::ports::{BlobStorePort, CandidateRepositoryPort};

/// 生成的头像 key 前缀
pub const GENERATED_PHOTO_PREFIX: &str = "profile-";

/// 更新头像响应
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatePictureResponse {
    pub photo_key: String,
}

/// UpdatePicture Handler
///
/// 先写 blob 再更新候选人的 photo 列；列更新失败时删除新 blob 作为补偿
pub struct UpdatePictureHandler {
    candidate_repo: Arc<dyn CandidateRepositoryPort>,
    blob_store: Arc<dyn BlobStorePort>,
}

impl UpdatePictureHandler {
    pub fn new(
        candidate_repo: Arc<dyn CandidateRepositoryPort>,
        blob_store: Arc<dyn BlobStorePort>,
    ) -> Self {
        Self {
            candidate_repo,
            blob_store,
        }
    }

    pub async fn handle(
        &self,
        command: UpdatePicture,
    ) -> Result<UpdatePictureResponse, ApplicationError> {
        if command.data.is_empty() {
            return Err(ApplicationError::validation("File is required"));
        }
        if !command.content_type.starts_with("image/") {
            return Err(ApplicationError::validation("Only image uploads are allowed"));
        }

        let candidate = self
            .candidate_repo
            .find_by_email(&command.email)
            .await?
            .ok_or_else(|| ApplicationError::candidate_not_found_by_email(&command.email))?;

        let photo_key = format!("{}{}", GENERATED_PHOTO_PREFIX, Uuid::new_v4().simple());
        let size = command.data.len();

        self.blob_store
            .put(&photo_key, command.data, &command.content_type)
            .await?;

        if let Err(e) = self.candidate_repo.set_photo(candidate.id, &photo_key).await {
            if let Err(cleanup) = self.blob_store.delete(&photo_key).await {
                tracing::error!(
                    key = %photo_key,
                    error = %cleanup,
                    "Failed to remove orphaned photo blob"
                );
            }
            return Err(e.into());
        }

        // 旧头像仅在是生成的 key 时清理，默认头像永不删除
        if let Some(previous) = candidate
            .photo
            .filter(|k| k.starts_with(GENERATED_PHOTO_PREFIX) && *k != photo_key)
        {
            if let Err(e) = self.blob_store.delete(&previous).await {
                tracing::warn!(key = %previous, error = %e, "Failed to delete previous photo");
            }
        }

        tracing::info!(
            candidate_id = %candidate.id,
            key = %photo_key,
            content_type = %command.content_type,
            size = size,
            "Photo updated"
        );

        Ok(UpdatePictureResponse { photo_key })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use crate::application::ports::{
        CandidateRecord, CandidateSummary, RepositoryError,
    };
    use crate::domain::candidate::{CandidateId, Email, ProfileFields};
    use crate::test_support::TestContext;

    fn command(data: &[u8], content_type: &str) -> UpdatePicture {
        UpdatePicture {
            email: Email::new("a@x.com").unwrap(),
            data: data.to_vec(),
            content_type: content_type.to_string(),
        }
    }

    #[tokio::test]
    async fn test_update_picture_stores_blob_and_key() {
        let ctx = TestContext::new().await;
        let id = ctx.seed_candidate("a@x.com", "Alice").await;
        let handler = UpdatePictureHandler::new(ctx.candidate_repo.clone(), ctx.blob_store.clone());

        let response = handler.handle(command(b"png-bytes", "image/png")).await.unwrap();
        assert!(response.photo_key.starts_with(GENERATED_PHOTO_PREFIX));

        let candidate = ctx.candidate_repo.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(candidate.photo.as_deref(), Some(response.photo_key.as_str()));

        let object = ctx.blob_store.get(&response.photo_key).await.unwrap().unwrap();
        assert_eq!(object.content_type.as_deref(), Some("image/png"));
        assert_eq!(object.size, 9);
    }

    #[tokio::test]
    async fn test_replacing_photo_removes_previous_generated_blob() {
        let ctx = TestContext::new().await;
        ctx.seed_candidate("a@x.com", "Alice").await;
        let handler = UpdatePictureHandler::new(ctx.candidate_repo.clone(), ctx.blob_store.clone());

        let first = handler.handle(command(b"one", "image/png")).await.unwrap();
        let second = handler.handle(command(b"two", "image/jpeg")).await.unwrap();

        assert!(ctx.blob_store.get(&first.photo_key).await.unwrap().is_none());
        assert!(ctx.blob_store.get(&second.photo_key).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_update_picture_validation() {
        let ctx = TestContext::new().await;
        ctx.seed_candidate("a@x.com", "Alice").await;
        let handler = UpdatePictureHandler::new(ctx.candidate_repo.clone(), ctx.blob_store.clone());

        let err = handler.handle(command(b"", "image/png")).await.unwrap_err();
        assert!(matches!(err, ApplicationError::ValidationError(_)));

        let err = handler.handle(command(b"text", "text/plain")).await.unwrap_err();
        assert!(matches!(err, ApplicationError::ValidationError(_)));
    }

    /// set_photo 总是失败的仓储
    struct FailingPhotoRepo {
        record: CandidateRecord,
    }

    #[async_trait]
    impl CandidateRepositoryPort for FailingPhotoRepo {
        async fn find_by_id(&self, _id: CandidateId) -> Result<Option<CandidateRecord>, RepositoryError> {
            Ok(Some(self.record.clone()))
        }

        async fn find_by_email(&self, _email: &Email) -> Result<Option<CandidateRecord>, RepositoryError> {
            Ok(Some(self.record.clone()))
        }

        async fn search(&self, _query: &str) -> Result<Vec<CandidateSummary>, RepositoryError> {
            Ok(Vec::new())
        }

        async fn update_profile(
            &self,
            _email: &Email,
            _fields: &ProfileFields,
            _include_company: bool,
        ) -> Result<Option<CandidateRecord>, RepositoryError> {
            Ok(None)
        }

        async fn set_photo(&self, _id: CandidateId, _photo_key: &str) -> Result<(), RepositoryError> {
            Err(RepositoryError::DatabaseError("disk I/O error".into()))
        }
    }

    #[tokio::test]
    async fn test_failed_column_update_removes_new_blob() {
        let ctx = TestContext::new().await;
        let repo = Arc::new(FailingPhotoRepo {
            record: CandidateRecord {
                id: CandidateId::new(1),
                email: "a@x.com".into(),
                name: None,
                gender: None,
                sector: None,
                job_title: None,
                company: None,
                photo: None,
                cv: None,
            },
        });
        let handler = UpdatePictureHandler::new(repo, ctx.blob_store.clone());

        let err = handler.handle(command(b"png", "image/png")).await.unwrap_err();
        assert!(matches!(err, ApplicationError::RepositoryError(_)));
        assert_eq!(ctx.blob_count().await, 0);
    }
}
