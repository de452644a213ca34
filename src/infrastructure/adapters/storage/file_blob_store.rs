//! File Blob Store - 文件系统对象存储实现
//!
//! 对象写入 `objects/<name>`，Content-Type 记录在 `meta/<name>.json`。
//! `<name>` 是 key 的百分号编码，任意字符串 key 都能映射为单层文件名。

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

use crate::application::ports::{BlobObject, BlobStoreError, BlobStorePort};

const OBJECTS_DIR: &str = "objects";
const META_DIR: &str = "meta";

/// 单个文件名的最大字节数（含 `.json` 后缀）
const MAX_FILE_NAME_LEN: usize = 255 - ".json".len();

#[derive(Debug, Serialize, Deserialize)]
struct BlobMetadata {
    content_type: String,
}

/// 文件系统 Blob 存储
pub struct FileBlobStore {
    /// 存储根目录
    base_dir: PathBuf,
}

impl FileBlobStore {
    /// 创建存储并确保目录存在
    pub async fn new(base_dir: impl AsRef<Path>) -> Result<Self, BlobStoreError> {
        let base_dir = base_dir.as_ref().to_path_buf();

        for dir in [OBJECTS_DIR, META_DIR] {
            fs::create_dir_all(base_dir.join(dir))
                .await
                .map_err(|e| BlobStoreError::IoError(e.to_string()))?;
        }

        Ok(Self { base_dir })
    }

    /// 对象文件所在目录
    pub fn objects_dir(&self) -> PathBuf {
        self.base_dir.join(OBJECTS_DIR)
    }

    fn object_path(&self, name: &str) -> PathBuf {
        self.objects_dir().join(name)
    }

    fn meta_path(&self, name: &str) -> PathBuf {
        self.base_dir.join(META_DIR).join(format!("{}.json", name))
    }

    async fn read_content_type(&self, name: &str) -> Result<Option<String>, BlobStoreError> {
        let raw = match fs::read(self.meta_path(name)).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(BlobStoreError::IoError(e.to_string())),
        };

        let metadata: BlobMetadata = serde_json::from_slice(&raw)
            .map_err(|e| BlobStoreError::MetadataError(e.to_string()))?;

        Ok(Some(metadata.content_type))
    }
}

/// key -> 文件名；无法映射（空或过长）时返回 None
///
/// 编码结果不含路径分隔符；开头的 `.` 额外编码，不会与临时文件或 `.`/`..` 冲突
fn file_name(key: &str) -> Option<String> {
    if key.is_empty() {
        return None;
    }

    let encoded = urlencoding::encode(key);
    let name = match encoded.strip_prefix('.') {
        Some(rest) => format!("%2E{}", rest),
        None => encoded.into_owned(),
    };

    (name.len() <= MAX_FILE_NAME_LEN).then_some(name)
}

async fn remove_if_exists(path: &Path) -> Result<(), BlobStoreError> {
    match fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(BlobStoreError::IoError(e.to_string())),
    }
}

/// 先写临时文件再 rename，读者不会看到写了一半的文件
async fn write_atomic(dir: &Path, path: &Path, data: &[u8]) -> Result<(), BlobStoreError> {
    let tmp_path = dir.join(format!(".{}.tmp", Uuid::new_v4().simple()));
    if let Err(e) = fs::write(&tmp_path, data).await {
        let _ = fs::remove_file(&tmp_path).await;
        return Err(BlobStoreError::IoError(e.to_string()));
    }
    if let Err(e) = fs::rename(&tmp_path, path).await {
        let _ = fs::remove_file(&tmp_path).await;
        return Err(BlobStoreError::IoError(e.to_string()));
    }
    Ok(())
}

#[async_trait]
impl BlobStorePort for FileBlobStore {
    async fn get(&self, key: &str) -> Result<Option<BlobObject>, BlobStoreError> {
        // 无法映射的 key 不可能被写入过
        let Some(name) = file_name(key) else {
            return Ok(None);
        };

        let file = match fs::File::open(self.object_path(&name)).await {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(BlobStoreError::IoError(e.to_string())),
        };

        let size = file
            .metadata()
            .await
            .map_err(|e| BlobStoreError::IoError(e.to_string()))?
            .len();

        let content_type = match self.read_content_type(&name).await {
            Ok(content_type) => content_type,
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Unreadable blob metadata");
                None
            }
        };

        Ok(Some(BlobObject {
            key: key.to_string(),
            size,
            content_type,
            body: Box::pin(file),
        }))
    }

    async fn put(&self, key: &str, data: Vec<u8>, content_type: &str) -> Result<(), BlobStoreError> {
        let name = file_name(key).ok_or_else(|| BlobStoreError::InvalidKey(key.to_string()))?;
        let object_path = self.object_path(&name);

        let metadata = serde_json::to_vec(&BlobMetadata {
            content_type: content_type.to_string(),
        })
        .map_err(|e| BlobStoreError::MetadataError(e.to_string()))?;

        write_atomic(&self.objects_dir(), &object_path, &data).await?;

        // 元数据写入失败时撤回对象，不留下半条记录
        let meta_path = self.meta_path(&name);
        if let Err(e) = write_atomic(&self.base_dir.join(META_DIR), &meta_path, &metadata).await {
            if let Err(cleanup) = remove_if_exists(&object_path).await {
                tracing::warn!(key = %key, error = %cleanup, "Failed to remove orphaned blob");
            }
            return Err(e);
        }

        tracing::debug!(key = %key, size = data.len(), "Stored blob");

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), BlobStoreError> {
        let Some(name) = file_name(key) else {
            return Ok(());
        };

        remove_if_exists(&self.object_path(&name)).await?;
        remove_if_exists(&self.meta_path(&name)).await?;

        tracing::debug!(key = %key, "Deleted blob");

        Ok(())
    }
}
