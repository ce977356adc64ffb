use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::{CourseId, Enrollment, User, UserId};

#[async_trait]
pub trait EnrollmentRepository: Send + Sync {
    /// Fails with `ConstraintViolation` if the pair is already enrolled.
    async fn create(
        &self,
        student_id: UserId,
        course_id: CourseId,
    ) -> Result<Enrollment, RepositoryError>;

    async fn find(
        &self,
        student_id: UserId,
        course_id: CourseId,
    ) -> Result<Option<Enrollment>, RepositoryError>;

    async fn list_for_student(&self, student_id: UserId)
    -> Result<Vec<Enrollment>, RepositoryError>;

    async fn list_students(&self, course_id: CourseId) -> Result<Vec<User>, RepositoryError>;
}
