//! Token Authentication
//!
//! 令牌来源优先级：`Authorization: Bearer <token>`，其次 JSON 请求体的 `token` 字段

use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::{header::AUTHORIZATION, HeaderMap},
};
use std::sync::Arc;

use super::error::ApiError;
use super::state::AppState;
use crate::application::VerifierError;
use crate::domain::candidate::Email;

/// 已校验的请求主体，附带解析后的 JSON 请求体
#[derive(Debug)]
pub struct Authenticated {
    pub email: Email,
    /// 请求体为空时为 None
    pub body: Option<serde_json::Value>,
}

#[async_trait]
impl FromRequest<Arc<AppState>> for Authenticated {
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &Arc<AppState>) -> Result<Self, Self::Rejection> {
        let bearer = bearer_token(req.headers());

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|_| ApiError::BadRequest("Invalid JSON".to_string()))?;

        let body = if bytes.is_empty() {
            None
        } else {
            Some(
                serde_json::from_slice::<serde_json::Value>(&bytes)
                    .map_err(|_| ApiError::BadRequest("Invalid JSON".to_string()))?,
            )
        };

        let token = match bearer {
            Some(token) => token,
            None => {
                let body = body
                    .as_ref()
                    .ok_or_else(|| ApiError::BadRequest("Invalid JSON".to_string()))?;
                body.get("token")
                    .and_then(|t| t.as_str())
                    .filter(|t| !t.is_empty())
                    .map(str::to_string)
                    .ok_or_else(|| ApiError::BadRequest("Token is required".to_string()))?
            }
        };

        let email = authenticate(state, &token).await?;

        Ok(Self { email, body })
    }
}

/// 从 Authorization 头提取 Bearer 令牌
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

/// 调用外部身份服务校验令牌
pub async fn authenticate(state: &AppState, token: &str) -> Result<Email, ApiError> {
    match state.verifier.verify(token).await {
        Ok(identity) => {
            tracing::debug!(email = %identity.email, "Request authenticated");
            Ok(identity.email)
        }
        Err(VerifierError::Rejected(reason)) => {
            tracing::warn!(reason = %reason, "Identity token rejected");
            Err(ApiError::BadRequest("invalid_token".to_string()))
        }
        Err(e) => Err(ApiError::Internal(format!("Identity verification failed: {}", e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_token() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, "Bearer abc".parse().unwrap());
        assert_eq!(bearer_token(&headers).as_deref(), Some("abc"));

        headers.insert(AUTHORIZATION, "Basic abc".parse().unwrap());
        assert_eq!(bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, "Bearer ".parse().unwrap());
        assert_eq!(bearer_token(&headers), None);
    }
}
