//! Blob Store Port - 出站端口
//!
//! 以字符串 key 寻址的对象存储（头像）

use async_trait::async_trait;
use std::pin::Pin;
use thiserror::Error;
use tokio::io::AsyncRead;

/// Blob 存储错误
#[derive(Debug, Error)]
pub enum BlobStoreError {
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(String),

    #[error("Metadata error: {0}")]
    MetadataError(String),
}

/// 对象内容读取流
pub type BlobBody = Pin<Box<dyn AsyncRead + Send>>;

/// 读取到的对象
pub struct BlobObject {
    pub key: String,
    /// 字节数
    pub size: u64,
    /// 上传时记录的 Content-Type
    pub content_type: Option<String>,
    pub body: BlobBody,
}

/// Blob Store Port
#[async_trait]
pub trait BlobStorePort: Send + Sync {
    /// 读取对象，不存在时返回 `Ok(None)`
    async fn get(&self, key: &str) -> Result<Option<BlobObject>, BlobStoreError>;

    /// 写入对象及其 Content-Type
    async fn put(&self, key: &str, data: Vec<u8>, content_type: &str) -> Result<(), BlobStoreError>;

    /// 删除对象，不存在时为空操作
    async fn delete(&self, key: &str) -> Result<(), BlobStoreError>;
}
