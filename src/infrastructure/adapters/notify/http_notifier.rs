//! HTTP Notifier - 调用通知分发服务
//!
//! 外部 API:
//! POST {base_url}/sendto
//! Request: {"email": "...", "message": "..."}  (JSON)

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::application::ports::{Notification, NotifierPort, NotifyError};

/// HTTP 通知客户端配置
#[derive(Debug, Clone)]
pub struct HttpNotifierConfig {
    /// 通知服务基础 URL
    pub base_url: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for HttpNotifierConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8788".to_string(),
            timeout_secs: 10,
        }
    }
}

impl HttpNotifierConfig {
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
}

/// HTTP 通知客户端
pub struct HttpNotifier {
    client: Client,
    config: HttpNotifierConfig,
}

impl HttpNotifier {
    pub fn new(config: HttpNotifierConfig) -> Result<Self, NotifyError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| NotifyError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn sendto_url(&self) -> String {
        format!("{}/sendto", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl NotifierPort for HttpNotifier {
    async fn send(&self, notification: Notification) -> Result<(), NotifyError> {
        tracing::debug!(
            url = %self.sendto_url(),
            email = %notification.email,
            "Dispatching notification"
        );

        let response = self
            .client
            .post(self.sendto_url())
            .json(&notification)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    NotifyError::Timeout
                } else if e.is_connect() {
                    NotifyError::NetworkError(format!("Cannot connect to notifier: {}", e))
                } else {
                    NotifyError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(NotifyError::ServiceError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
    use std::sync::{Arc, Mutex};

    type Inbox = Arc<Mutex<Vec<serde_json::Value>>>;

    async fn spawn_dispatcher(status: StatusCode) -> (String, Inbox) {
        let inbox: Inbox = Arc::default();

        let app = Router::new()
            .route(
                "/sendto",
                post(
                    move |State(inbox): State<Inbox>, Json(body): Json<serde_json::Value>| async move {
                        inbox.lock().unwrap().push(body);
                        status
                    },
                ),
            )
            .with_state(inbox.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (format!("http://{}", addr), inbox)
    }

    #[tokio::test]
    async fn test_send_posts_json() {
        let (base_url, inbox) = spawn_dispatcher(StatusCode::OK).await;
        let notifier = HttpNotifier::new(HttpNotifierConfig::new(base_url)).unwrap();

        notifier
            .send(Notification {
                email: "b@x.com".to_string(),
                message: "hello".to_string(),
            })
            .await
            .unwrap();

        let received = inbox.lock().unwrap().clone();
        assert_eq!(
            received,
            vec![serde_json::json!({"email": "b@x.com", "message": "hello"})]
        );
    }

    #[tokio::test]
    async fn test_non_success_is_service_error() {
        let (base_url, _inbox) = spawn_dispatcher(StatusCode::BAD_GATEWAY).await;
        let notifier = HttpNotifier::new(HttpNotifierConfig::new(base_url)).unwrap();

        let err = notifier
            .send(Notification {
                email: "b@x.com".to_string(),
                message: "hello".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, NotifyError::ServiceError(_)));
    }
}
