use std::path::PathBuf;
use std::sync::Arc;

use object_store::local::LocalFileSystem;
use object_store::path::Path as StorePath;
use object_store::{ObjectStore, PutPayload};

use crate::application::ports::{AudioStore, AudioStoreError};
use crate::domain::AudioKey;

/// Audio files under the static directory served by the HTTP layer.
pub struct LocalAudioStore {
    inner: Arc<LocalFileSystem>,
}

impl LocalAudioStore {
    pub fn new(base_path: PathBuf) -> Result<Self, AudioStoreError> {
        std::fs::create_dir_all(&base_path)?;
        let fs = LocalFileSystem::new_with_prefix(base_path)
            .map_err(|e| AudioStoreError::WriteFailed(e.to_string()))?;
        Ok(Self {
            inner: Arc::new(fs),
        })
    }
}

#[async_trait::async_trait]
impl AudioStore for LocalAudioStore {
    async fn exists(&self, key: &AudioKey) -> Result<bool, AudioStoreError> {
        match self.inner.head(&StorePath::from(key.as_str())).await {
            Ok(_) => Ok(true),
            Err(object_store::Error::NotFound { .. }) => Ok(false),
            Err(e) => Err(AudioStoreError::ReadFailed(e.to_string())),
        }
    }

    async fn put(&self, key: &AudioKey, bytes: Vec<u8>) -> Result<u64, AudioStoreError> {
        let len = bytes.len() as u64;
        self.inner
            .put(&StorePath::from(key.as_str()), PutPayload::from(bytes))
            .await
            .map_err(|e| AudioStoreError::WriteFailed(e.to_string()))?;
        Ok(len)
    }
}

