use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::{
    NewSpeakingMessage, NewSpeakingSession, SessionState, SpeakingMessage, SpeakingMessageId,
    SpeakingSession, SpeakingSessionId, UserId,
};

#[async_trait]
pub trait SpeakingRepository: Send + Sync {
    /// New sessions start in the `created` state.
    async fn create_session(
        &self,
        session: &NewSpeakingSession,
    ) -> Result<SpeakingSession, RepositoryError>;

    async fn get_session(
        &self,
        id: SpeakingSessionId,
    ) -> Result<Option<SpeakingSession>, RepositoryError>;

    /// Sessions of a student, newest first.
    async fn list_sessions(&self, student_id: UserId)
    -> Result<Vec<SpeakingSession>, RepositoryError>;

    async fn set_state(
        &self,
        id: SpeakingSessionId,
        state: SessionState,
    ) -> Result<SpeakingSession, RepositoryError>;

    async fn append_message(
        &self,
        message: &NewSpeakingMessage,
    ) -> Result<SpeakingMessage, RepositoryError>;

    async fn set_message_audio(
        &self,
        id: SpeakingMessageId,
        audio_path: &str,
    ) -> Result<SpeakingMessage, RepositoryError>;

    /// Turns of a session in the order they were recorded.
    async fn list_messages(
        &self,
        session_id: SpeakingSessionId,
    ) -> Result<Vec<SpeakingMessage>, RepositoryError>;
}
