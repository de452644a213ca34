//! Profile HTTP Handlers

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::application::{CandidateLookup, FindCandidates, GetCandidate, UpdateCandidate};
use crate::infrastructure::http::auth::Authenticated;
use crate::infrastructure::http::dto::{
    required_param, CandidateIdParams, CandidateResponse, CandidateSummaryResponse, FindParams,
    UpdateCandidateRequest, UpdateCandidateResponse,
};
use crate::infrastructure::http::error::{ApiError, ErrorPolicy};
use crate::infrastructure::http::state::AppState;

/// 当前用户资料 (`POST /`)
pub async fn get_own_profile(
    State(state): State<Arc<AppState>>,
    auth: Authenticated,
) -> Result<Json<CandidateResponse>, ApiError> {
    let record = state
        .get_candidate_handler
        .handle(GetCandidate {
            lookup: CandidateLookup::Email(auth.email),
        })
        .await?;

    Ok(Json(CandidateResponse::project(
        record,
        state.settings.company_field,
    )))
}

/// 按 id 查看资料 (`GET /viewprofile?candidateId=`)
pub async fn view_profile(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CandidateIdParams>,
) -> Result<Json<CandidateResponse>, ApiError> {
    let candidate_id = required_param(params.candidate_id)
        .ok_or_else(|| ApiError::BadRequest("Missing Candidate Id".to_string()))?;

    let record = state
        .get_candidate_handler
        .handle(GetCandidate {
            lookup: CandidateLookup::Id(candidate_id),
        })
        .await?;

    Ok(Json(CandidateResponse::project(
        record,
        state.settings.company_field,
    )))
}

/// 按姓名或邮箱搜索 (`GET /find?query=`)
pub async fn find(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FindParams>,
) -> Result<Json<Vec<CandidateSummaryResponse>>, ApiError> {
    let query = required_param(params.query)
        .ok_or_else(|| ApiError::BadRequest("Missing query".to_string()))?;

    let results = state
        .find_candidates_handler
        .handle(FindCandidates { query })
        .await
        .map_err(|e| ErrorPolicy::FIND.map(e))?;

    Ok(Json(results.into_iter().map(Into::into).collect()))
}

/// 覆盖更新当前用户资料 (`POST /update`)
pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    auth: Authenticated,
) -> Result<Json<UpdateCandidateResponse>, ApiError> {
    let body = auth
        .body
        .ok_or_else(|| ApiError::BadRequest("Candidate is required".to_string()))?;
    let request: UpdateCandidateRequest = serde_json::from_value(body)
        .map_err(|_| ApiError::BadRequest("Invalid JSON".to_string()))?;
    let candidate = request
        .candidate
        .ok_or_else(|| ApiError::BadRequest("Candidate is required".to_string()))?;

    let record = state
        .update_candidate_handler
        .handle(UpdateCandidate {
            email: auth.email,
            fields: candidate.into(),
        })
        .await?;

    Ok(Json(UpdateCandidateResponse {
        message: "Candidate updated successfully".to_string(),
        candidate: CandidateResponse::project(record, state.settings.company_field),
    }))
}
