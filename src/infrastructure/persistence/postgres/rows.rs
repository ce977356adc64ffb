use chrono::{DateTime, Utc};
use sqlx::FromRow;
use sqlx::types::Json;

use super::pg_error::decode_failed;
use crate::application::ports::RepositoryError;
use crate::domain::{
    AudioSentence, AudioSentenceId, Course, CourseId, Enrollment, EnrollmentId, Friendship,
    FriendshipId, Message, MessageId, Quiz, QuizId, SpeakingMessage, SpeakingMessageId,
    SpeakingSession, SpeakingSessionId, Unit, UnitId, User, UserId,
};

pub(super) const USER_COLUMNS: &str = "id, email, password_hash, name, role, is_active, created_at";
pub(super) const COURSE_COLUMNS: &str =
    "id, title, description, teacher_id, is_published, created_at, updated_at";
pub(super) const UNIT_COLUMNS: &str = "id, course_id, title, position, content, created_at";
pub(super) const QUIZ_COLUMNS: &str =
    "id, unit_id, quiz_type, question, correct_answer, options, position";
pub(super) const AUDIO_SENTENCE_COLUMNS: &str = "id, unit_id, sentence, audio_path, position";
pub(super) const ENROLLMENT_COLUMNS: &str = "id, student_id, course_id, enrolled_at, progress";
pub(super) const FRIENDSHIP_COLUMNS: &str =
    "id, requester_id, receiver_id, status, created_at, updated_at";
pub(super) const MESSAGE_COLUMNS: &str =
    "id, sender_id, receiver_id, content, corrected_content, is_read, created_at";
pub(super) const SESSION_COLUMNS: &str =
    "id, student_id, topic, conversation_type, difficulty_level, state, created_at, ended_at";
pub(super) const SPEAKING_MESSAGE_COLUMNS: &str =
    "id, session_id, role, content, corrected_content, audio_path, created_at";

#[derive(FromRow)]
pub(super) struct UserRow {
    id: i64,
    email: String,
    password_hash: String,
    name: String,
    role: String,
    is_active: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = RepositoryError;

    fn try_from(r: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: UserId::from_i64(r.id),
            email: r.email,
            password_hash: r.password_hash,
            name: r.name,
            role: r.role.parse().map_err(|e| decode_failed("users.role", e))?,
            is_active: r.is_active,
            created_at: r.created_at,
        })
    }
}

#[derive(FromRow)]
pub(super) struct CourseRow {
    id: i64,
    title: String,
    description: Option<String>,
    teacher_id: i64,
    is_published: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CourseRow> for Course {
    fn from(r: CourseRow) -> Self {
        Course {
            id: CourseId::from_i64(r.id),
            title: r.title,
            description: r.description,
            teacher_id: UserId::from_i64(r.teacher_id),
            is_published: r.is_published,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[derive(FromRow)]
pub(super) struct UnitRow {
    id: i64,
    course_id: i64,
    title: String,
    position: i32,
    content: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<UnitRow> for Unit {
    fn from(r: UnitRow) -> Self {
        Unit {
            id: UnitId::from_i64(r.id),
            course_id: CourseId::from_i64(r.course_id),
            title: r.title,
            order: r.position,
            content: r.content,
            created_at: r.created_at,
        }
    }
}

#[derive(FromRow)]
pub(super) struct QuizRow {
    id: i64,
    unit_id: i64,
    quiz_type: String,
    question: String,
    correct_answer: String,
    options: Option<Json<Vec<String>>>,
    position: i32,
}

impl TryFrom<QuizRow> for Quiz {
    type Error = RepositoryError;

    fn try_from(r: QuizRow) -> Result<Self, Self::Error> {
        Ok(Quiz {
            id: QuizId::from_i64(r.id),
            unit_id: UnitId::from_i64(r.unit_id),
            quiz_type: r
                .quiz_type
                .parse()
                .map_err(|e| decode_failed("quizzes.quiz_type", e))?,
            question: r.question,
            correct_answer: r.correct_answer,
            options: r.options.map(|Json(options)| options),
            order: r.position,
        })
    }
}

#[derive(FromRow)]
pub(super) struct AudioSentenceRow {
    id: i64,
    unit_id: i64,
    sentence: String,
    audio_path: String,
    position: i32,
}

impl From<AudioSentenceRow> for AudioSentence {
    fn from(r: AudioSentenceRow) -> Self {
        AudioSentence {
            id: AudioSentenceId::from_i64(r.id),
            unit_id: UnitId::from_i64(r.unit_id),
            sentence: r.sentence,
            audio_path: r.audio_path,
            order: r.position,
        }
    }
}

#[derive(FromRow)]
pub(super) struct EnrollmentRow {
    id: i64,
    student_id: i64,
    course_id: i64,
    enrolled_at: DateTime<Utc>,
    progress: serde_json::Value,
}

impl From<EnrollmentRow> for Enrollment {
    fn from(r: EnrollmentRow) -> Self {
        Enrollment {
            id: EnrollmentId::from_i64(r.id),
            student_id: UserId::from_i64(r.student_id),
            course_id: CourseId::from_i64(r.course_id),
            enrolled_at: r.enrolled_at,
            progress: r.progress,
        }
    }
}

#[derive(FromRow)]
pub(super) struct FriendshipRow {
    id: i64,
    requester_id: i64,
    receiver_id: i64,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<FriendshipRow> for Friendship {
    type Error = RepositoryError;

    fn try_from(r: FriendshipRow) -> Result<Self, Self::Error> {
        Ok(Friendship {
            id: FriendshipId::from_i64(r.id),
            requester_id: UserId::from_i64(r.requester_id),
            receiver_id: UserId::from_i64(r.receiver_id),
            status: r
                .status
                .parse()
                .map_err(|e| decode_failed("friendships.status", e))?,
            created_at: r.created_at,
            updated_at: r.updated_at,
        })
    }
}

#[derive(FromRow)]
pub(super) struct MessageRow {
    id: i64,
    sender_id: i64,
    receiver_id: i64,
    content: String,
    corrected_content: Option<String>,
    is_read: bool,
    created_at: DateTime<Utc>,
}

impl From<MessageRow> for Message {
    fn from(r: MessageRow) -> Self {
        Message {
            id: MessageId::from_i64(r.id),
            sender_id: UserId::from_i64(r.sender_id),
            receiver_id: UserId::from_i64(r.receiver_id),
            content: r.content,
            corrected_content: r.corrected_content,
            is_read: r.is_read,
            created_at: r.created_at,
        }
    }
}

#[derive(FromRow)]
pub(super) struct SessionRow {
    id: i64,
    student_id: i64,
    topic: String,
    conversation_type: String,
    difficulty_level: String,
    state: String,
    created_at: DateTime<Utc>,
    ended_at: Option<DateTime<Utc>>,
}

impl TryFrom<SessionRow> for SpeakingSession {
    type Error = RepositoryError;

    fn try_from(r: SessionRow) -> Result<Self, Self::Error> {
        let state = r
            .state
            .parse()
            .map_err(|e| decode_failed("speaking_sessions.state", e))?;
        let session = SpeakingSession {
            id: SpeakingSessionId::from_i64(r.id),
            student_id: UserId::from_i64(r.student_id),
            topic: r.topic,
            conversation_type: r
                .conversation_type
                .parse()
                .map_err(|e| decode_failed("speaking_sessions.conversation_type", e))?,
            difficulty_level: r
                .difficulty_level
                .parse()
                .map_err(|e| decode_failed("speaking_sessions.difficulty_level", e))?,
            state,
            is_active: false,
            created_at: r.created_at,
            ended_at: r.ended_at,
        };
        Ok(session.with_state(state))
    }
}

#[derive(FromRow)]
pub(super) struct SpeakingMessageRow {
    id: i64,
    session_id: i64,
    role: String,
    content: String,
    corrected_content: Option<String>,
    audio_path: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<SpeakingMessageRow> for SpeakingMessage {
    type Error = RepositoryError;

    fn try_from(r: SpeakingMessageRow) -> Result<Self, Self::Error> {
        Ok(SpeakingMessage {
            id: SpeakingMessageId::from_i64(r.id),
            session_id: SpeakingSessionId::from_i64(r.session_id),
            role: r
                .role
                .parse()
                .map_err(|e| decode_failed("speaking_messages.role", e))?,
            content: r.content,
            corrected_content: r.corrected_content,
            audio_path: r.audio_path,
            created_at: r.created_at,
        })
    }
}
