//! Photo HTTP Handlers

use axum::{
    body::Body,
    extract::{multipart::MultipartRejection, Multipart, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::Response,
    Json,
};
use std::sync::Arc;
use tokio_util::io::ReaderStream;

use crate::application::{BlobObject, CandidateLookup, GetPicture, UpdatePicture};
use crate::infrastructure::http::auth::{authenticate, bearer_token, Authenticated};
use crate::infrastructure::http::dto::{
    required_param, CandidateIdParams, UpdatePictureResponseDto,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 将对象流式写入响应体
fn blob_response(object: BlobObject, fallback_content_type: &str) -> Result<Response, ApiError> {
    let content_type = object
        .content_type
        .filter(|ct| !ct.is_empty())
        .unwrap_or_else(|| fallback_content_type.to_string());

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_LENGTH, object.size)
        .body(Body::from_stream(ReaderStream::new(object.body)))
        .map_err(|e| ApiError::Internal(format!("Failed to build response: {}", e)))
}

async fn fetch_picture(state: &AppState, lookup: CandidateLookup) -> Result<Response, ApiError> {
    let object = state
        .get_picture_handler
        .handle(GetPicture { lookup })
        .await?;

    blob_response(object, &state.settings.fallback_content_type)
}

/// 按 id 获取头像 (`GET /getpicture?candidateId=`)
pub async fn get_picture_by_id(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CandidateIdParams>,
) -> Result<Response, ApiError> {
    let candidate_id = required_param(params.candidate_id)
        .ok_or_else(|| ApiError::BadRequest("Missing Candidate Id".to_string()))?;

    fetch_picture(&state, CandidateLookup::Id(candidate_id)).await
}

/// 获取当前用户头像 (`POST /getpicture`)
pub async fn get_own_picture(
    State(state): State<Arc<AppState>>,
    auth: Authenticated,
) -> Result<Response, ApiError> {
    fetch_picture(&state, CandidateLookup::Email(auth.email)).await
}

/// 上传头像 (`POST /updatepicture`, multipart/form-data)
///
/// 字段：`file`（必填，image/*），`token`（无 Bearer 头时必填）
pub async fn update_picture(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UpdatePictureResponseDto>, ApiError> {
    let mut multipart = multipart.map_err(|_| {
        ApiError::BadRequest("Content-Type must be multipart/form-data".to_string())
    })?;

    // 令牌先于文件到达时立即校验，未通过的请求不再读取文件
    let mut email = match bearer_token(&headers) {
        Some(token) => Some(authenticate(&state, &token).await?),
        None => None,
    };
    let mut file: Option<(Vec<u8>, String)> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        ApiError::BadRequest(format!("Failed to read multipart field: {}", e))
    })? {
        let field_name = field.name().unwrap_or_default().to_string();

        match field_name.as_str() {
            "token" if email.is_none() => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Failed to read token: {}", e)))?;
                if !value.is_empty() {
                    email = Some(authenticate(&state, &value).await?);
                }
            }
            "file" => {
                // 没有文件名的字段不是文件
                if field.file_name().is_none() {
                    continue;
                }
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field.bytes().await.map_err(|e| {
                    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                        ApiError::BadRequest("File too large".to_string())
                    } else {
                        ApiError::BadRequest(format!("Failed to read file: {}", e))
                    }
                })?;
                file = Some((data.to_vec(), content_type));
            }
            _ => {}
        }
    }

    let email = email.ok_or_else(|| ApiError::BadRequest("Token is required".to_string()))?;

    let (data, content_type) =
        file.ok_or_else(|| ApiError::BadRequest("File is required".to_string()))?;

    let response = state
        .update_picture_handler
        .handle(UpdatePicture {
            email,
            data,
            content_type,
        })
        .await?;

    Ok(Json(UpdatePictureResponseDto {
        message: "Photo updated successfully".to_string(),
        photo: response.photo_key,
    }))
}
