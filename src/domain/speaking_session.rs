use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{SpeakingMessage, SpeakingSessionId, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversationType {
    Formal,
    Informal,
    Business,
    Casual,
}

impl ConversationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConversationType::Formal => "formal",
            ConversationType::Informal => "informal",
            ConversationType::Business => "business",
            ConversationType::Casual => "casual",
        }
    }
}

impl FromStr for ConversationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "formal" => Ok(ConversationType::Formal),
            "informal" => Ok(ConversationType::Informal),
            "business" => Ok(ConversationType::Business),
            "casual" => Ok(ConversationType::Casual),
            _ => Err(format!("Invalid conversation type: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl DifficultyLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyLevel::Beginner => "beginner",
            DifficultyLevel::Intermediate => "intermediate",
            DifficultyLevel::Advanced => "advanced",
        }
    }
}

impl FromStr for DifficultyLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "beginner" => Ok(DifficultyLevel::Beginner),
            "intermediate" => Ok(DifficultyLevel::Intermediate),
            "advanced" => Ok(DifficultyLevel::Advanced),
            _ => Err(format!("Invalid difficulty level: {}", s)),
        }
    }
}

/// Lifecycle of a speaking session: `created -> active -> ended`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    Created,
    Active,
    Ended,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot move speaking session from {from} to {to}")]
pub struct IllegalTransition {
    pub from: SessionState,
    pub to: SessionState,
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::Created => "created",
            SessionState::Active => "active",
            SessionState::Ended => "ended",
        }
    }

    pub fn accepts_turns(&self) -> bool {
        matches!(self, SessionState::Active)
    }

    pub fn activate(self) -> Result<SessionState, IllegalTransition> {
        match self {
            SessionState::Created => Ok(SessionState::Active),
            from => Err(IllegalTransition {
                from,
                to: SessionState::Active,
            }),
        }
    }

    pub fn end(self) -> Result<SessionState, IllegalTransition> {
        match self {
            SessionState::Created | SessionState::Active => Ok(SessionState::Ended),
            SessionState::Ended => Err(IllegalTransition {
                from: self,
                to: SessionState::Ended,
            }),
        }
    }
}

impl FromStr for SessionState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "created" => Ok(SessionState::Created),
            "active" => Ok(SessionState::Active),
            "ended" => Ok(SessionState::Ended),
            _ => Err(format!("Invalid session state: {}", s)),
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeakingSession {
    pub id: SpeakingSessionId,
    pub student_id: UserId,
    pub topic: String,
    pub conversation_type: ConversationType,
    pub difficulty_level: DifficultyLevel,
    pub state: SessionState,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
}

impl SpeakingSession {
    /// Keeps the derived `is_active` flag in step with `state`.
    pub fn with_state(mut self, state: SessionState) -> Self {
        self.state = state;
        self.is_active = state == SessionState::Active;
        self
    }

    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.student_id == user_id
    }
}

#[derive(Debug, Clone)]
pub struct NewSpeakingSession {
    pub student_id: UserId,
    pub topic: String,
    pub conversation_type: ConversationType,
    pub difficulty_level: DifficultyLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeakingSessionDetails {
    #[serde(flatten)]
    pub session: SpeakingSession,
    pub messages: Vec<SpeakingMessage>,
}
