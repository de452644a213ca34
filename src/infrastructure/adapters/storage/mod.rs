//! Storage Adapter - 头像对象存储

mod file_blob_store;

pub use file_blob_store::FileBlobStore;
