use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{AudioSentence, CourseId, Quiz, UnitId, User, UserId};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Course {
    pub id: CourseId,
    pub title: String,
    pub description: Option<String>,
    pub teacher_id: UserId,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Course {
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.teacher_id == user_id
    }
}

#[derive(Debug, Clone)]
pub struct NewCourse {
    pub title: String,
    pub description: Option<String>,
    pub teacher_id: UserId,
    pub is_published: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Unit {
    pub id: UnitId,
    pub course_id: CourseId,
    pub title: String,
    /// Position within the course. Advisory; duplicates are not rejected.
    pub order: i32,
    pub content: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewUnit {
    pub course_id: CourseId,
    pub title: String,
    pub order: i32,
    pub content: Option<String>,
}

/// A unit together with its ordered quizzes and audio sentences.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitDetails {
    #[serde(flatten)]
    pub unit: Unit,
    pub quizzes: Vec<Quiz>,
    pub audio_sentences: Vec<AudioSentence>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseDetails {
    #[serde(flatten)]
    pub course: Course,
    pub teacher: User,
    pub units: Vec<UnitDetails>,
}

/// Partial update; `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CourseChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub is_published: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UnitChanges {
    pub title: Option<String>,
    pub content: Option<String>,
    pub order: Option<i32>,
}
