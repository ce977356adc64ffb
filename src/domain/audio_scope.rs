use std::fmt;

use super::CourseId;

/// Where a generated sentence recording lives and what to serve when
/// synthesis fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioScope {
    Unit { course_id: CourseId, unit_order: i32 },
    Daily { lesson_id: i64 },
}

impl AudioScope {
    pub fn unit(course_id: CourseId, unit_order: i32) -> Self {
        Self::Unit {
            course_id,
            unit_order,
        }
    }

    pub fn daily(lesson_id: i64) -> Self {
        Self::Daily { lesson_id }
    }

    pub fn directory(&self) -> String {
        match self {
            Self::Unit { course_id, .. } => format!("course_{}", course_id),
            Self::Daily { lesson_id } => format!("daily_{}", lesson_id),
        }
    }

    /// File stem without the content hash, e.g. `course_3_unit_0`.
    pub fn stem(&self) -> String {
        match self {
            Self::Unit {
                course_id,
                unit_order,
            } => format!("course_{}_unit_{}", course_id, unit_order),
            Self::Daily { lesson_id } => format!("daily_{}", lesson_id),
        }
    }

    pub fn placeholder_path(&self) -> String {
        match self {
            Self::Unit { unit_order, .. } => format!("/audio/placeholder/{}.mp3", unit_order),
            Self::Daily { .. } => "/audio/placeholder/daily.mp3".to_string(),
        }
    }
}

impl fmt::Display for AudioScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.stem())
    }
}

/// Key of a stored recording relative to the static root, like
/// `audio/course_3/course_3_unit_0_1a2b3c4d.mp3`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioKey(String);

impl AudioKey {
    pub fn sentence(scope: &AudioScope, content_hash: &str) -> Self {
        Self(format!(
            "audio/{}/{}_{}.mp3",
            scope.directory(),
            scope.stem(),
            content_hash
        ))
    }

    pub fn speaking_turn(session_id: impl fmt::Display, turn_id: impl fmt::Display) -> Self {
        Self(format!(
            "speaking/session_{}/message_{}.mp3",
            session_id, turn_id
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// URL under which the static mounts serve this key.
    pub fn public_path(&self) -> String {
        match self.0.strip_prefix("speaking/") {
            Some(rest) => format!("/static/speaking/{}", rest),
            None => match self.0.strip_prefix("audio/") {
                Some(rest) => format!("/audio/{}", rest),
                None => format!("/{}", self.0),
            },
        }
    }
}

impl fmt::Display for AudioKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
