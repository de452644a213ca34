//! HTTP Handlers

mod cv;
mod friend;
mod photo;
mod profile;

pub use cv::*;
pub use friend::*;
pub use photo::*;
pub use profile::*;

use super::error::ApiError;

/// 未匹配的路由与方法
pub async fn not_found() -> ApiError {
    ApiError::NotFound("Not found".to_string())
}
