//! HTTP Error Handling
//!
//! 所有错误响应统一为 `{"error": "<message>"}`

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::application::ApplicationError;

/// 统一错误响应格式
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// 对外隐藏细节的 500 消息
pub const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";

/// API 错误
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    /// 内部细节只写日志
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Internal(detail) => {
                tracing::error!(error = %detail, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_SERVER_ERROR.to_string(),
                )
            }
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

/// 应用层错误到 HTTP 状态码的映射策略
///
/// 基础设施错误默认为 500；对失败被视为客户端错误的操作，
/// 降级为 400 并返回该操作的失败消息。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPolicy {
    Internal,
    ClientFailure(&'static str),
}

impl ErrorPolicy {
    pub const FIND: Self = Self::ClientFailure("Unable to run find query");
    pub const ADD_FRIEND: Self = Self::ClientFailure("Unable to add friend");
    pub const BLOCK_FRIEND: Self = Self::ClientFailure("Unable to block friend");
    pub const LIST_FRIENDS: Self = Self::ClientFailure("Unable to list friends");
    pub const ACCEPT_FRIEND: Self = Self::ClientFailure("Unable to accept friend");

    pub fn map(self, err: ApplicationError) -> ApiError {
        if err.is_infrastructure() {
            return match self {
                ErrorPolicy::Internal => ApiError::Internal(err.to_string()),
                ErrorPolicy::ClientFailure(message) => {
                    tracing::error!(error = %err, "{}", message);
                    ApiError::BadRequest(message.to_string())
                }
            };
        }

        match err {
            ApplicationError::ValidationError(msg) | ApplicationError::BusinessRuleViolation(msg) => {
                ApiError::BadRequest(msg)
            }
            ApplicationError::NotFound { resource_type, id } => {
                tracing::debug!(resource_type, id = %id, "Resource not found");
                ApiError::NotFound("File not found".to_string())
            }
            other => ApiError::BadRequest(other.to_string()),
        }
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        ErrorPolicy::Internal.map(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors_keep_message() {
        let err = ErrorPolicy::Internal.map(ApplicationError::candidate_not_found_by_id(9));
        assert!(matches!(err, ApiError::BadRequest(msg) if msg == "No user found with id 9"));

        let err = ErrorPolicy::Internal.map(ApplicationError::validation("Invalid friendId"));
        assert!(matches!(err, ApiError::BadRequest(msg) if msg == "Invalid friendId"));

        let err = ErrorPolicy::Internal.map(ApplicationError::not_found("Photo", "k"));
        assert!(matches!(err, ApiError::NotFound(msg) if msg == "File not found"));
    }

    #[test]
    fn test_infrastructure_errors_follow_policy() {
        let err = ErrorPolicy::Internal.map(ApplicationError::RepositoryError("disk".into()));
        assert!(matches!(err, ApiError::Internal(_)));

        let err = ErrorPolicy::ADD_FRIEND.map(ApplicationError::RepositoryError("disk".into()));
        assert!(matches!(err, ApiError::BadRequest(msg) if msg == "Unable to add friend"));

        // 客户端错误不受策略影响
        let err = ErrorPolicy::ADD_FRIEND.map(ApplicationError::business_rule("Users do not exist"));
        assert!(matches!(err, ApiError::BadRequest(msg) if msg == "Users do not exist"));
    }

    #[tokio::test]
    async fn test_internal_error_hides_details() {
        let response = ApiError::Internal("sqlite locked".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json, serde_json::json!({"error": "Internal Server Error"}));
    }
}
