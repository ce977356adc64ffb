use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use super::pg_error::query_failed;
use super::rows::{SESSION_COLUMNS, SPEAKING_MESSAGE_COLUMNS, SessionRow, SpeakingMessageRow};
use crate::application::ports::{RepositoryError, SpeakingRepository};
use crate::domain::{
    NewSpeakingMessage, NewSpeakingSession, SessionState, SpeakingMessage, SpeakingMessageId,
    SpeakingSession, SpeakingSessionId, UserId,
};

pub struct PgSpeakingRepository {
    pool: PgPool,
}

impl PgSpeakingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SpeakingRepository for PgSpeakingRepository {
    #[instrument(skip(self, session), fields(student_id = %session.student_id))]
    async fn create_session(
        &self,
        session: &NewSpeakingSession,
    ) -> Result<SpeakingSession, RepositoryError> {
        let sql = format!(
            "INSERT INTO speaking_sessions (student_id, topic, conversation_type, difficulty_level) \
             VALUES ($1, $2, $3, $4) RETURNING {SESSION_COLUMNS}"
        );
        sqlx::query_as::<_, SessionRow>(&sql)
            .bind(session.student_id.as_i64())
            .bind(&session.topic)
            .bind(session.conversation_type.as_str())
            .bind(session.difficulty_level.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(query_failed)?
            .try_into()
    }

    #[instrument(skip(self), fields(session_id = %id))]
    async fn get_session(
        &self,
        id: SpeakingSessionId,
    ) -> Result<Option<SpeakingSession>, RepositoryError> {
        let sql = format!("SELECT {SESSION_COLUMNS} FROM speaking_sessions WHERE id = $1");
        sqlx::query_as::<_, SessionRow>(&sql)
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await
            .map_err(query_failed)?
            .map(SpeakingSession::try_from)
            .transpose()
    }

    #[instrument(skip(self), fields(student_id = %student_id))]
    async fn list_sessions(
        &self,
        student_id: UserId,
    ) -> Result<Vec<SpeakingSession>, RepositoryError> {
        let sql = format!(
            "SELECT {SESSION_COLUMNS} FROM speaking_sessions \
             WHERE student_id = $1 ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, SessionRow>(&sql)
            .bind(student_id.as_i64())
            .fetch_all(&self.pool)
            .await
            .map_err(query_failed)?
            .into_iter()
            .map(SpeakingSession::try_from)
            .collect()
    }

    #[instrument(skip(self), fields(session_id = %id, state = %state))]
    async fn set_state(
        &self,
        id: SpeakingSessionId,
        state: SessionState,
    ) -> Result<SpeakingSession, RepositoryError> {
        let sql = format!(
            "UPDATE speaking_sessions SET state = $2, \
               ended_at = CASE WHEN $2 = 'ended' THEN NOW() ELSE ended_at END \
             WHERE id = $1 RETURNING {SESSION_COLUMNS}"
        );
        sqlx::query_as::<_, SessionRow>(&sql)
            .bind(id.as_i64())
            .bind(state.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(query_failed)?
            .ok_or_else(|| RepositoryError::NotFound(format!("speaking session {}", id)))?
            .try_into()
    }

    #[instrument(skip(self, message), fields(session_id = %message.session_id, role = %message.role))]
    async fn append_message(
        &self,
        message: &NewSpeakingMessage,
    ) -> Result<SpeakingMessage, RepositoryError> {
        let sql = format!(
            "INSERT INTO speaking_messages (session_id, role, content, corrected_content, audio_path) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {SPEAKING_MESSAGE_COLUMNS}"
        );
        sqlx::query_as::<_, SpeakingMessageRow>(&sql)
            .bind(message.session_id.as_i64())
            .bind(message.role.as_str())
            .bind(&message.content)
            .bind(&message.corrected_content)
            .bind(&message.audio_path)
            .fetch_one(&self.pool)
            .await
            .map_err(query_failed)?
            .try_into()
    }

    #[instrument(skip(self), fields(message_id = %id))]
    async fn set_message_audio(
        &self,
        id: SpeakingMessageId,
        audio_path: &str,
    ) -> Result<SpeakingMessage, RepositoryError> {
        let sql = format!(
            "UPDATE speaking_messages SET audio_path = $2 WHERE id = $1 \
             RETURNING {SPEAKING_MESSAGE_COLUMNS}"
        );
        sqlx::query_as::<_, SpeakingMessageRow>(&sql)
            .bind(id.as_i64())
            .bind(audio_path)
            .fetch_optional(&self.pool)
            .await
            .map_err(query_failed)?
            .ok_or_else(|| RepositoryError::NotFound(format!("speaking message {}", id)))?
            .try_into()
    }

    #[instrument(skip(self), fields(session_id = %session_id))]
    async fn list_messages(
        &self,
        session_id: SpeakingSessionId,
    ) -> Result<Vec<SpeakingMessage>, RepositoryError> {
        let sql = format!(
            "SELECT {SPEAKING_MESSAGE_COLUMNS} FROM speaking_messages \
             WHERE session_id = $1 ORDER BY id"
        );
        sqlx::query_as::<_, SpeakingMessageRow>(&sql)
            .bind(session_id.as_i64())
            .fetch_all(&self.pool)
            .await
            .map_err(query_failed)?
            .into_iter()
            .map(SpeakingMessage::try_from)
            .collect()
    }
}
