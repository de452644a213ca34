//! Notifier Port - 通知投递
//!
//! 外部通知服务，投递失败不重试

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

/// 通知投递错误
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error: {0}")]
    ServiceError(String),
}

/// 待投递的通知
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub email: String,
    pub message: String,
}

/// Notifier Port
#[async_trait]
pub trait NotifierPort: Send + Sync {
    async fn send(&self, notification: Notification) -> Result<(), NotifyError>;
}
