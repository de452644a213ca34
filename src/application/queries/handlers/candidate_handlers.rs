//! Candidate Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{CandidateRecord, CandidateRepositoryPort, CandidateSummary};
use crate::application::queries::{CandidateLookup, FindCandidates, GetCandidate};
use crate::domain::candidate::CandidateId;

/// 按 id 或 email 解析候选人
///
/// 非数字的 id 视为不存在的候选人
pub(crate) async fn resolve_candidate(
    candidate_repo: &dyn CandidateRepositoryPort,
    lookup: &CandidateLookup,
) -> Result<CandidateRecord, ApplicationError> {
    match lookup {
        CandidateLookup::Id(raw) => {
            let Ok(id) = raw.parse::<CandidateId>() else {
                return Err(ApplicationError::candidate_not_found_by_id(raw));
            };
            candidate_repo
                .find_by_id(id)
                .await?
                .ok_or_else(|| ApplicationError::candidate_not_found_by_id(raw))
        }
        CandidateLookup::Email(email) => candidate_repo
            .find_by_email(email)
            .await?
            .ok_or_else(|| ApplicationError::candidate_not_found_by_email(email)),
    }
}

/// GetCandidate Handler
pub struct GetCandidateHandler {
    candidate_repo: Arc<dyn CandidateRepositoryPort>,
}

impl GetCandidateHandler {
    pub fn new(candidate_repo: Arc<dyn CandidateRepositoryPort>) -> Self {
        Self { candidate_repo }
    }

    pub async fn handle(&self, query: GetCandidate) -> Result<CandidateRecord, ApplicationError> {
        tracing::debug!(lookup = ?query.lookup, "Retrieving candidate");
        resolve_candidate(self.candidate_repo.as_ref(), &query.lookup).await
    }
}

/// FindCandidates Handler
pub struct FindCandidatesHandler {
    candidate_repo: Arc<dyn CandidateRepositoryPort>,
}

impl FindCandidatesHandler {
    pub fn new(candidate_repo: Arc<dyn CandidateRepositoryPort>) -> Self {
        Self { candidate_repo }
    }

    pub async fn handle(
        &self,
        query: FindCandidates,
    ) -> Result<Vec<CandidateSummary>, ApplicationError> {
        let results = self.candidate_repo.search(&query.query).await?;

        tracing::debug!(query = %query.query, results = results.len(), "Find query completed");

        Ok(results)
    }
}
