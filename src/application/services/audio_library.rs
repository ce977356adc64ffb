use std::sync::Arc;

use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};

use crate::application::ports::{
    AudioStore, AudioStoreError, SpeechSynthesisError, SpeechSynthesizer,
};
use crate::domain::{AudioKey, AudioScope, SpeakingMessageId, SpeakingSessionId};

/// Generates sentence recordings once per scope and text, then serves the
/// stored file on every later request.
pub struct AudioLibrary {
    store: Arc<dyn AudioStore>,
    synthesizer: Arc<dyn SpeechSynthesizer>,
    language: String,
}

impl AudioLibrary {
    pub fn new(
        store: Arc<dyn AudioStore>,
        synthesizer: Arc<dyn SpeechSynthesizer>,
        language: impl Into<String>,
    ) -> Self {
        Self {
            store,
            synthesizer,
            language: language.into(),
        }
    }

    /// Public path of the recording for `text`. Never fails: when synthesis
    /// or storage breaks, the scope's placeholder path is returned instead.
    pub async fn sentence_audio(&self, text: &str, scope: &AudioScope) -> String {
        match self.try_sentence_audio(text, scope).await {
            Ok(path) => path,
            Err(e) => {
                warn!(scope = %scope, error = %e, "Sentence audio unavailable, using placeholder");
                scope.placeholder_path()
            }
        }
    }

    /// Like [`Self::sentence_audio`] but hands the failure to the caller.
    pub async fn try_sentence_audio(
        &self,
        text: &str,
        scope: &AudioScope,
    ) -> Result<String, AudioGenerationError> {
        let key = AudioKey::sentence(scope, &content_hash(scope, text));

        if self.store.exists(&key).await? {
            debug!(key = %key, "Reusing stored sentence audio");
            return Ok(key.public_path());
        }

        let bytes = self.synthesizer.synthesize(text, &self.language).await?;
        let written = self.store.put(&key, bytes).await?;
        info!(key = %key, bytes = written, "Stored sentence audio");

        Ok(key.public_path())
    }
}

/// Voices tutor replies of speaking sessions. Unlike sentence audio there is
/// no fallback; callers decide what a failure means.
pub struct ReplyVoice {
    store: Arc<dyn AudioStore>,
    synthesizer: Arc<dyn SpeechSynthesizer>,
    language: String,
}

impl ReplyVoice {
    pub fn new(
        store: Arc<dyn AudioStore>,
        synthesizer: Arc<dyn SpeechSynthesizer>,
        language: impl Into<String>,
    ) -> Self {
        Self {
            store,
            synthesizer,
            language: language.into(),
        }
    }

    pub async fn speak(
        &self,
        text: &str,
        session_id: SpeakingSessionId,
        turn_id: SpeakingMessageId,
    ) -> Result<String, AudioGenerationError> {
        let key = AudioKey::speaking_turn(session_id, turn_id);
        let bytes = self.synthesizer.synthesize(text, &self.language).await?;
        self.store.put(&key, bytes).await?;
        Ok(key.public_path())
    }
}

/// First 8 hex characters of SHA-256 over the scope stem and the text.
pub fn content_hash(scope: &AudioScope, text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(scope.stem().as_bytes());
    hasher.update([0u8]);
    hasher.update(text.as_bytes());
    let digest = hasher.finalize();
    hex::encode(&digest[..4])
}

#[derive(Debug, thiserror::Error)]
pub enum AudioGenerationError {
    #[error("synthesis: {0}")]
    Synthesis(#[from] SpeechSynthesisError),
    #[error("storage: {0}")]
    Storage(#[from] AudioStoreError),
}
