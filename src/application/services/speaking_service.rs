use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::{debug, error, info, instrument, warn};

use super::{GrammarService, ReplyVoice, ServiceError, build_system_prompt};
use crate::application::ports::{
    ChatTurn, CompletionRequest, LlmClient, SpeakingRepository, TranscriptionEngine,
    TranscriptionError,
};
use crate::domain::{
    ConversationType, DifficultyLevel, NewSpeakingMessage, NewSpeakingSession, SpeakingMessage,
    SpeakingSession, SpeakingSessionDetails, SpeakingSessionId, User,
};

const DEFAULT_AUDIO_EXTENSION: &str = "webm";

#[derive(Debug, Clone, Deserialize)]
pub struct SessionRequest {
    pub topic: String,
    pub conversation_type: ConversationType,
    pub difficulty_level: DifficultyLevel,
}

/// The two turns recorded for one spoken student utterance.
#[derive(Debug, Clone, Serialize)]
pub struct SpeakingExchange {
    pub user_message: SpeakingMessage,
    pub assistant_message: SpeakingMessage,
}

pub struct SpeakingService {
    sessions: Arc<dyn SpeakingRepository>,
    transcriber: Arc<dyn TranscriptionEngine>,
    llm: Arc<dyn LlmClient>,
    grammar: Arc<GrammarService>,
    voice: Arc<ReplyVoice>,
    upload_dir: PathBuf,
}

impl SpeakingService {
    pub fn new(
        sessions: Arc<dyn SpeakingRepository>,
        transcriber: Arc<dyn TranscriptionEngine>,
        llm: Arc<dyn LlmClient>,
        grammar: Arc<GrammarService>,
        voice: Arc<ReplyVoice>,
        upload_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            sessions,
            transcriber,
            llm,
            grammar,
            voice,
            upload_dir: upload_dir.into(),
        }
    }

    #[instrument(skip(self, student, request), fields(student_id = %student.id))]
    pub async fn create_session(
        &self,
        student: &User,
        request: SessionRequest,
    ) -> Result<SpeakingSession, ServiceError> {
        let topic = request.topic.trim();
        if topic.is_empty() {
            return Err(ServiceError::bad_request("Topic must not be empty"));
        }

        let session = self
            .sessions
            .create_session(&NewSpeakingSession {
                student_id: student.id,
                topic: topic.to_string(),
                conversation_type: request.conversation_type,
                difficulty_level: request.difficulty_level,
            })
            .await?;

        self.greet(&session).await;

        let state = session
            .state
            .activate()
            .map_err(|e| ServiceError::InvalidState(e.to_string()))?;
        let session = self.sessions.set_state(session.id, state).await?;

        info!(session_id = %session.id, "Started speaking session");
        Ok(session)
    }

    /// Records the tutor's opening line. Failures leave the session without
    /// a greeting.
    async fn greet(&self, session: &SpeakingSession) {
        let prompt = system_prompt(session);
        let request = CompletionRequest::new(vec![ChatTurn::system(prompt)]);

        let greeting = match self.llm.complete(&request).await {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => return,
            Err(e) => {
                warn!(session_id = %session.id, error = %e, "Greeting generation failed");
                return;
            }
        };

        let turn = match self
            .sessions
            .append_message(&NewSpeakingMessage::assistant(session.id, greeting))
            .await
        {
            Ok(turn) => turn,
            Err(e) => {
                warn!(session_id = %session.id, error = %e, "Could not store greeting");
                return;
            }
        };

        match self.voice.speak(&turn.content, session.id, turn.id).await {
            Ok(path) => {
                if let Err(e) = self.sessions.set_message_audio(turn.id, &path).await {
                    warn!(message_id = %turn.id, error = %e, "Could not attach greeting audio");
                }
            }
            Err(e) => warn!(message_id = %turn.id, error = %e, "Greeting synthesis failed"),
        }
    }

    pub async fn list_sessions(&self, student: &User) -> Result<Vec<SpeakingSession>, ServiceError> {
        Ok(self.sessions.list_sessions(student.id).await?)
    }

    async fn owned_session(
        &self,
        student: &User,
        id: SpeakingSessionId,
    ) -> Result<SpeakingSession, ServiceError> {
        let session = self
            .sessions
            .get_session(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Speaking session not found"))?;
        if !session.is_owned_by(student.id) {
            return Err(ServiceError::forbidden("Not authorized to access this session"));
        }
        Ok(session)
    }

    pub async fn get_session(
        &self,
        student: &User,
        id: SpeakingSessionId,
    ) -> Result<SpeakingSessionDetails, ServiceError> {
        let session = self.owned_session(student, id).await?;
        let messages = self.sessions.list_messages(id).await?;
        Ok(SpeakingSessionDetails { session, messages })
    }

    pub async fn end_session(
        &self,
        student: &User,
        id: SpeakingSessionId,
    ) -> Result<SpeakingSession, ServiceError> {
        let session = self.owned_session(student, id).await?;
        let state = session
            .state
            .end()
            .map_err(|_| ServiceError::InvalidState("Speaking session already ended".to_string()))?;
        let ended = self.sessions.set_state(id, state).await?;
        info!(session_id = %id, "Ended speaking session");
        Ok(ended)
    }

    /// Transcribes one spoken turn, stores it with its grammar correction and
    /// answers with a voiced tutor reply.
    #[instrument(skip(self, student, audio, file_name), fields(student_id = %student.id, bytes = audio.len()))]
    pub async fn submit_turn(
        &self,
        student: &User,
        session_id: SpeakingSessionId,
        audio: &[u8],
        file_name: Option<&str>,
    ) -> Result<SpeakingExchange, ServiceError> {
        let session = self.owned_session(student, session_id).await?;
        if !session.state.accepts_turns() {
            return Err(ServiceError::InvalidState(
                "Speaking session is not active".to_string(),
            ));
        }
        if audio.is_empty() {
            return Err(ServiceError::bad_request("Audio file is empty"));
        }

        // Removed when dropped, on every return path.
        let upload = self.stage_upload(audio, file_name).await?;
        self.process_turn(&session, upload.path()).await
    }

    async fn stage_upload(
        &self,
        audio: &[u8],
        file_name: Option<&str>,
    ) -> Result<NamedTempFile, ServiceError> {
        let extension = file_name
            .and_then(|name| Path::new(name).extension())
            .and_then(|ext| ext.to_str())
            .filter(|ext| ext.chars().all(|c| c.is_ascii_alphanumeric()))
            .unwrap_or(DEFAULT_AUDIO_EXTENSION);

        tokio::fs::create_dir_all(&self.upload_dir)
            .await
            .map_err(|e| ServiceError::internal(format!("upload directory: {}", e)))?;

        let upload = tempfile::Builder::new()
            .prefix("turn_")
            .suffix(&format!(".{}", extension))
            .tempfile_in(&self.upload_dir)
            .map_err(|e| ServiceError::internal(format!("temporary upload: {}", e)))?;

        tokio::fs::write(upload.path(), audio)
            .await
            .map_err(|e| ServiceError::internal(format!("temporary upload: {}", e)))?;

        debug!(path = %upload.path().display(), "Staged uploaded audio");
        Ok(upload)
    }

    async fn process_turn(
        &self,
        session: &SpeakingSession,
        audio_file: &Path,
    ) -> Result<SpeakingExchange, ServiceError> {
        let transcript = self
            .transcriber
            .transcribe(audio_file)
            .await
            .map_err(|e| match e {
                TranscriptionError::QuotaExceeded => {
                    warn!(session_id = %session.id, "Speech-to-text quota exhausted");
                    ServiceError::RateLimited(
                        "Speech-to-text quota exceeded, please try again later".to_string(),
                    )
                }
                other => {
                    error!(session_id = %session.id, error = %other, "Transcription failed");
                    ServiceError::internal(other.to_string())
                }
            })?;

        let transcript = transcript.trim().to_string();
        if transcript.is_empty() {
            return Err(ServiceError::bad_request("No speech detected in the audio"));
        }
        debug!(session_id = %session.id, chars = transcript.chars().count(), "Transcribed turn");

        let report = self.grammar.check(&transcript).await;
        let user_message = self
            .sessions
            .append_message(&NewSpeakingMessage::user(
                session.id,
                transcript,
                report.corrected_if_changed(),
            ))
            .await?;

        let history = self.sessions.list_messages(session.id).await?;
        let mut conversation = Vec::with_capacity(history.len() + 1);
        conversation.push(ChatTurn::system(system_prompt(session)));
        conversation.extend(
            history
                .into_iter()
                .map(|turn| ChatTurn::new(turn.role, turn.content)),
        );

        let reply = self
            .llm
            .complete(&CompletionRequest::new(conversation))
            .await
            .map_err(|e| {
                // Never retryable: the user turn is already stored.
                error!(session_id = %session.id, error = %e, "Tutor reply failed");
                ServiceError::internal(format!("tutor reply: {}", e))
            })?;

        let assistant = self
            .sessions
            .append_message(&NewSpeakingMessage::assistant(session.id, reply))
            .await?;

        let audio_path = self
            .voice
            .speak(&assistant.content, session.id, assistant.id)
            .await
            .map_err(|e| ServiceError::internal(format!("reply synthesis: {}", e)))?;
        let assistant_message = self
            .sessions
            .set_message_audio(assistant.id, &audio_path)
            .await?;

        info!(
            session_id = %session.id,
            user_message_id = %user_message.id,
            assistant_message_id = %assistant_message.id,
            corrected = user_message.corrected_content.is_some(),
            "Completed speaking turn"
        );

        Ok(SpeakingExchange {
            user_message,
            assistant_message,
        })
    }
}

fn system_prompt(session: &SpeakingSession) -> String {
    build_system_prompt(
        &session.topic,
        session.conversation_type,
        session.difficulty_level,
    )
}
