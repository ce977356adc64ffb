use std::path::Path;

use async_trait::async_trait;

#[async_trait]
pub trait TranscriptionEngine: Send + Sync {
    async fn transcribe(&self, audio_file: &Path) -> Result<String, TranscriptionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionError {
    #[error("transcription quota exceeded")]
    QuotaExceeded,
    #[error("could not read audio: {0}")]
    ReadFailed(String),
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
