//! Photo Query Handlers

use std::sync::Arc;

use super::candidate_handlers::resolve_candidate;
use crate::application::error::ApplicationError;
use crate::application::ports::{BlobObject, BlobStorePort, CandidateRepositoryPort};
use crate::application::queries::GetPicture;

/// GetPicture Handler
pub struct GetPictureHandler {
    candidate_repo: Arc<dyn CandidateRepositoryPort>,
    blob_store: Arc<dyn BlobStorePort>,
    default_photo_key: String,
}

impl GetPictureHandler {
    pub fn new(
        candidate_repo: Arc<dyn CandidateRepositoryPort>,
        blob_store: Arc<dyn BlobStorePort>,
        default_photo_key: impl Into<String>,
    ) -> Self {
        Self {
            candidate_repo,
            blob_store,
            default_photo_key: default_photo_key.into(),
        }
    }

    pub async fn handle(&self, query: GetPicture) -> Result<BlobObject, ApplicationError> {
        let candidate = resolve_candidate(self.candidate_repo.as_ref(), &query.lookup).await?;

        let key = candidate
            .photo
            .filter(|k| !k.is_empty())
            .unwrap_or_else(|| self.default_photo_key.clone());

        let object = self
            .blob_store
            .get(&key)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Photo", key.clone()))?;

        tracing::debug!(candidate_id = %candidate.id, key = %key, size = object.size, "Fetched photo");

        Ok(object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::queries::CandidateLookup;
    use crate::test_support::TestContext;
    use tokio::io::AsyncReadExt;

    #[tokio::test]
    async fn test_missing_photo_falls_back_to_default_key() {
        let ctx = TestContext::new().await;
        let id = ctx.seed_candidate("a@x.com", "Alice").await;
        ctx.blob_store
            .put(TestContext::DEFAULT_PHOTO_KEY, b"default".to_vec(), "image/png")
            .await
            .unwrap();
        let handler = GetPictureHandler::new(
            ctx.candidate_repo.clone(),
            ctx.blob_store.clone(),
            TestContext::DEFAULT_PHOTO_KEY,
        );

        let mut object = handler
            .handle(GetPicture {
                lookup: CandidateLookup::Id(id.to_string()),
            })
            .await
            .unwrap();

        assert_eq!(object.key, TestContext::DEFAULT_PHOTO_KEY);
        assert_eq!(object.content_type.as_deref(), Some("image/png"));
        let mut data = Vec::new();
        object.body.read_to_end(&mut data).await.unwrap();
        assert_eq!(data, b"default");
    }

    #[tokio::test]
    async fn test_photo_key_without_blob_is_not_found() {
        let ctx = TestContext::new().await;
        let id = ctx.seed_candidate("a@x.com", "Alice").await;
        ctx.candidate_repo.set_photo(id, "profile-missing").await.unwrap();
        let handler = GetPictureHandler::new(
            ctx.candidate_repo.clone(),
            ctx.blob_store.clone(),
            TestContext::DEFAULT_PHOTO_KEY,
        );

        let err = handler
            .handle(GetPicture {
                lookup: CandidateLookup::Id(id.to_string()),
            })
            .await
            .err()
            .unwrap();
        assert!(matches!(err, ApplicationError::NotFound { resource_type: "Photo", .. }));
    }
}
