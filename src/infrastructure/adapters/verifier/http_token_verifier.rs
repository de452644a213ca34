//! HTTP Token Verifier - 调用第三方身份服务校验令牌
//!
//! 外部 API:
//! GET {base_url}/tokeninfo?id_token=<token>
//! Response: {"email": "...", "aud": "...", ...}

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::application::ports::{IdentityVerifierPort, VerifiedIdentity, VerifierError};
use crate::domain::candidate::Email;

/// tokeninfo 响应中用到的声明
#[derive(Debug, Deserialize)]
struct TokenInfo {
    email: Option<String>,
    aud: Option<String>,
}

/// HTTP 令牌校验配置
#[derive(Debug, Clone)]
pub struct HttpTokenVerifierConfig {
    /// 身份服务基础 URL
    pub base_url: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
    /// 期望的 aud 声明，None 表示不校验
    pub audience: Option<String>,
}

impl Default for HttpTokenVerifierConfig {
    fn default() -> Self {
        Self {
            base_url: "https://oauth2.googleapis.com".to_string(),
            timeout_secs: 10,
            audience: None,
        }
    }
}

impl HttpTokenVerifierConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn with_audience(mut self, audience: Option<String>) -> Self {
        self.audience = audience;
        self
    }
}

/// HTTP 令牌校验器
pub struct HttpTokenVerifier {
    client: Client,
    config: HttpTokenVerifierConfig,
}

impl HttpTokenVerifier {
    pub fn new(config: HttpTokenVerifierConfig) -> Result<Self, VerifierError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| VerifierError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn tokeninfo_url(&self) -> String {
        format!("{}/tokeninfo", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl IdentityVerifierPort for HttpTokenVerifier {
    async fn verify(&self, token: &str) -> Result<VerifiedIdentity, VerifierError> {
        let response = self
            .client
            .get(self.tokeninfo_url())
            .query(&[("id_token", token)])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    VerifierError::Timeout
                } else if e.is_connect() {
                    VerifierError::NetworkError(format!("Cannot connect to verifier: {}", e))
                } else {
                    VerifierError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(VerifierError::Rejected(format!("HTTP {}", status)));
        }

        let info: TokenInfo = response
            .json()
            .await
            .map_err(|e| VerifierError::InvalidResponse(e.to_string()))?;

        if let Some(expected) = &self.config.audience {
            if info.aud.as_deref() != Some(expected.as_str()) {
                return Err(VerifierError::Rejected("audience mismatch".to_string()));
            }
        }

        let email = info
            .email
            .ok_or_else(|| VerifierError::Rejected("missing email claim".to_string()))?;
        let email = Email::new(email).map_err(|e| VerifierError::Rejected(e.to_string()))?;

        tracing::debug!(email = %email, "Identity token verified");

        Ok(VerifiedIdentity { email })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::Query, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
    use std::collections::HashMap;

    /// 本地模拟 tokeninfo 服务
    async fn spawn_tokeninfo() -> String {
        async fn tokeninfo(Query(params): Query<HashMap<String, String>>) -> impl IntoResponse {
            match params.get("id_token").map(String::as_str) {
                Some("good") => (
                    StatusCode::OK,
                    Json(serde_json::json!({"email": "a@x.com", "aud": "client-1"})),
                ),
                Some("no-email") => (StatusCode::OK, Json(serde_json::json!({"aud": "client-1"}))),
                _ => (
                    StatusCode::BAD_REQUEST,
                    Json(serde_json::json!({"error": "invalid_token"})),
                ),
            }
        }

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = Router::new().route("/tokeninfo", get(tokeninfo));
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_verify_tokens() {
        let base_url = spawn_tokeninfo().await;
        let verifier = HttpTokenVerifier::new(HttpTokenVerifierConfig::new(&base_url)).unwrap();

        let identity = verifier.verify("good").await.unwrap();
        assert_eq!(identity.email.as_str(), "a@x.com");

        assert!(matches!(
            verifier.verify("bad").await,
            Err(VerifierError::Rejected(_))
        ));
        assert!(matches!(
            verifier.verify("no-email").await,
            Err(VerifierError::Rejected(_))
        ));
    }

    #[tokio::test]
    async fn test_audience_mismatch_is_rejected() {
        let base_url = spawn_tokeninfo().await;
        let verifier = HttpTokenVerifier::new(
            HttpTokenVerifierConfig::new(&base_url).with_audience(Some("client-2".to_string())),
        )
        .unwrap();

        assert!(matches!(
            verifier.verify("good").await,
            Err(VerifierError::Rejected(_))
        ));
    }

    #[tokio::test]
    async fn test_unreachable_verifier_is_network_error() {
        let verifier = HttpTokenVerifier::new(
            HttpTokenVerifierConfig::new("http://127.0.0.1:1").with_timeout(2),
        )
        .unwrap();

        assert!(matches!(
            verifier.verify("good").await,
            Err(VerifierError::NetworkError(_)) | Err(VerifierError::Timeout)
        ));
    }

    #[test]
    fn test_config_builder() {
        let config = HttpTokenVerifierConfig::new("http://verifier.local/").with_timeout(3);
        assert_eq!(config.timeout_secs, 3);
        assert!(config.audience.is_none());
    }
}
