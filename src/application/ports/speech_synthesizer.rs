use async_trait::async_trait;

/// Text-to-speech provider returning encoded MP3 bytes.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn synthesize(&self, text: &str, language: &str)
    -> Result<Vec<u8>, SpeechSynthesisError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SpeechSynthesisError {
    #[error("speech synthesis is not configured: {0}")]
    NotConfigured(String),
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("synthesis canceled: {0}")]
    Canceled(String),
}
