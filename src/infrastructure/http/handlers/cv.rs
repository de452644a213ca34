//! CV HTTP Handlers

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::application::ListCvs;
use crate::infrastructure::http::auth::Authenticated;
use crate::infrastructure::http::dto::CvResponse;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 列出当前用户的简历 (`POST /listcvs`)
pub async fn list_cvs(
    State(state): State<Arc<AppState>>,
    auth: Authenticated,
) -> Result<Json<Vec<CvResponse>>, ApiError> {
    let cvs = state
        .list_cvs_handler
        .handle(ListCvs { email: auth.email })
        .await?;

    Ok(Json(cvs.into_iter().map(Into::into).collect()))
}
