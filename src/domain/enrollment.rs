use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{CourseId, EnrollmentId, UserId};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Enrollment {
    pub id: EnrollmentId,
    pub student_id: UserId,
    pub course_id: CourseId,
    pub enrolled_at: DateTime<Utc>,
    /// Free-form progress blob, always a JSON object.
    pub progress: serde_json::Value,
}
