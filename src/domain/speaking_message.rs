use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{MessageRole, SpeakingMessageId, SpeakingSessionId};

/// One turn of a speaking session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeakingMessage {
    pub id: SpeakingMessageId,
    pub session_id: SpeakingSessionId,
    pub role: MessageRole,
    pub content: String,
    pub corrected_content: Option<String>,
    pub audio_path: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewSpeakingMessage {
    pub session_id: SpeakingSessionId,
    pub role: MessageRole,
    pub content: String,
    pub corrected_content: Option<String>,
    pub audio_path: Option<String>,
}

impl NewSpeakingMessage {
    pub fn user(
        session_id: SpeakingSessionId,
        content: String,
        corrected_content: Option<String>,
    ) -> Self {
        Self {
            session_id,
            role: MessageRole::User,
            content,
            corrected_content,
            audio_path: None,
        }
    }

    pub fn assistant(session_id: SpeakingSessionId, content: String) -> Self {
        Self {
            session_id,
            role: MessageRole::Assistant,
            content,
            corrected_content: None,
            audio_path: None,
        }
    }
}
