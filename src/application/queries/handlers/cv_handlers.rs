//! CV Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{CandidateRepositoryPort, CvRecord, CvRepositoryPort};
use crate::application::queries::ListCvs;

/// ListCvs Handler
pub struct ListCvsHandler {
    candidate_repo: Arc<dyn CandidateRepositoryPort>,
    cv_repo: Arc<dyn CvRepositoryPort>,
}

impl ListCvsHandler {
    pub fn new(
        candidate_repo: Arc<dyn CandidateRepositoryPort>,
        cv_repo: Arc<dyn CvRepositoryPort>,
    ) -> Self {
        Self {
            candidate_repo,
            cv_repo,
        }
    }

    pub async fn handle(&self, query: ListCvs) -> Result<Vec<CvRecord>, ApplicationError> {
        // 候选人必须存在
        self.candidate_repo
            .find_by_email(&query.email)
            .await?
            .ok_or_else(|| ApplicationError::candidate_not_found_by_email(&query.email))?;

        let cvs = self.cv_repo.find_by_email(&query.email).await?;

        tracing::info!(email = %query.email, count = cvs.len(), "Fetched candidate CVs");

        Ok(cvs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::candidate::Email;
    use crate::test_support::TestContext;

    #[tokio::test]
    async fn test_list_cvs_for_known_candidate() {
        let ctx = TestContext::new().await;
        ctx.seed_candidate("a@x.com", "Alice").await;
        ctx.seed_cv("cv-1", "a@x.com", "Main", true).await;
        ctx.seed_cv("cv-2", "a@x.com", "Alt", false).await;
        ctx.seed_cv("cv-3", "b@x.com", "Other", true).await;
        let handler = ListCvsHandler::new(ctx.candidate_repo.clone(), ctx.cv_repo.clone());

        let mut cvs = handler
            .handle(ListCvs {
                email: Email::new("a@x.com").unwrap(),
            })
            .await
            .unwrap();
        cvs.sort_by(|a, b| a.id.cmp(&b.id));

        assert_eq!(cvs.len(), 2);
        assert!(cvs[0].is_default);
        assert!(!cvs[1].is_default);
    }

    #[tokio::test]
    async fn test_list_cvs_unknown_candidate() {
        let ctx = TestContext::new().await;
        let handler = ListCvsHandler::new(ctx.candidate_repo.clone(), ctx.cv_repo.clone());

        let err = handler
            .handle(ListCvs {
                email: Email::new("ghost@x.com").unwrap(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::CandidateNotFound(_)));
    }
}
