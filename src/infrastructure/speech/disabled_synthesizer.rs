use async_trait::async_trait;

use crate::application::ports::{SpeechSynthesisError, SpeechSynthesizer};

/// Stands in for a provider that has no credentials; every call fails.
pub struct DisabledSynthesizer {
    reason: String,
}

impl DisabledSynthesizer {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl SpeechSynthesizer for DisabledSynthesizer {
    async fn synthesize(&self, _: &str, _: &str) -> Result<Vec<u8>, SpeechSynthesisError> {
        Err(SpeechSynthesisError::NotConfigured(self.reason.clone()))
    }
}
