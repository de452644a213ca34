//! Identity Verifier Port - 第三方身份令牌校验
//!
//! 校验不透明的 identity token 并返回其中的声明

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::candidate::Email;

/// 校验错误
#[derive(Debug, Error)]
pub enum VerifierError {
    /// 令牌被校验方拒绝（非 2xx、缺少 email、audience 不匹配）
    #[error("Token rejected: {0}")]
    Rejected(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// 校验通过的身份
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedIdentity {
    /// 本次请求的主体
    pub email: Email,
}

/// Identity Verifier Port
#[async_trait]
pub trait IdentityVerifierPort: Send + Sync {
    async fn verify(&self, token: &str) -> Result<VerifiedIdentity, VerifierError>;
}
