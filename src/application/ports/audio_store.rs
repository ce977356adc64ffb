use async_trait::async_trait;

use crate::domain::AudioKey;

/// Persistent storage for generated recordings served as static files.
#[async_trait]
pub trait AudioStore: Send + Sync {
    async fn exists(&self, key: &AudioKey) -> Result<bool, AudioStoreError>;

    async fn put(&self, key: &AudioKey, bytes: Vec<u8>) -> Result<u64, AudioStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum AudioStoreError {
    #[error("write failed: {0}")]
    WriteFailed(String),
    #[error("read failed: {0}")]
    ReadFailed(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
