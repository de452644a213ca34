//! Candidate Command Handlers

use std::sync::Arc;

use crate::application::commands::UpdateCandidate;
use crate::application::error::ApplicationError;
use crate::application::ports::{CandidateRecord, CandidateRepositoryPort};

/// UpdateCandidate Handler
pub struct UpdateCandidateHandler {
    candidate_repo: Arc<dyn CandidateRepositoryPort>,
    /// 是否读写 company 字段
    include_company: bool,
}

impl UpdateCandidateHandler {
    pub fn new(candidate_repo: Arc<dyn CandidateRepositoryPort>, include_company: bool) -> Self {
        Self {
            candidate_repo,
            include_company,
        }
    }

    pub async fn handle(&self, command: UpdateCandidate) -> Result<CandidateRecord, ApplicationError> {
        let updated = self
            .candidate_repo
            .update_profile(&command.email, &command.fields, self.include_company)
            .await?
            .ok_or_else(|| ApplicationError::candidate_not_found_by_email(&command.email))?;

        tracing::info!(
            candidate_id = %updated.id,
            email = %command.email,
            "Candidate updated"
        );

        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::candidate::{Email, ProfileFields};
    use crate::test_support::TestContext;

    #[tokio::test]
    async fn test_update_overwrites_all_fields() {
        let ctx = TestContext::new().await;
        ctx.seed_candidate("a@x.com", "Alice").await;
        let handler = UpdateCandidateHandler::new(ctx.candidate_repo.clone(), true);
        let email = Email::new("a@x.com").unwrap();

        let first = handler
            .handle(UpdateCandidate {
                email: email.clone(),
                fields: ProfileFields {
                    name: Some("Alice B".into()),
                    gender: Some("F".into()),
                    sector: Some("IT".into()),
                    job_title: Some("Engineer".into()),
                    company: Some("Acme".into()),
                },
            })
            .await
            .unwrap();
        assert_eq!(first.company.as_deref(), Some("Acme"));

        // 未提供的字段被置空
        let second = handler
            .handle(UpdateCandidate {
                email,
                fields: ProfileFields {
                    name: Some("X".into()),
                    ..Default::default()
                },
            })
            .await
            .unwrap();
        assert_eq!(second.name.as_deref(), Some("X"));
        assert_eq!(second.gender, None);
        assert_eq!(second.job_title, None);
        assert_eq!(second.company, None);
        assert_eq!(second.email, "a@x.com");
    }

    #[tokio::test]
    async fn test_update_leaves_company_when_disabled() {
        let ctx = TestContext::new().await;
        ctx.seed_candidate("a@x.com", "Alice").await;
        let email = Email::new("a@x.com").unwrap();

        UpdateCandidateHandler::new(ctx.candidate_repo.clone(), true)
            .handle(UpdateCandidate {
                email: email.clone(),
                fields: ProfileFields {
                    company: Some("Acme".into()),
                    ..Default::default()
                },
            })
            .await
            .unwrap();

        let updated = UpdateCandidateHandler::new(ctx.candidate_repo.clone(), false)
            .handle(UpdateCandidate {
                email,
                fields: ProfileFields::default(),
            })
            .await
            .unwrap();
        assert_eq!(updated.company.as_deref(), Some("Acme"));
    }

    #[tokio::test]
    async fn test_update_unknown_candidate() {
        let ctx = TestContext::new().await;
        let handler = UpdateCandidateHandler::new(ctx.candidate_repo.clone(), true);

        let err = handler
            .handle(UpdateCandidate {
                email: Email::new("ghost@x.com").unwrap(),
                fields: ProfileFields::default(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::CandidateNotFound(_)));
    }
}
