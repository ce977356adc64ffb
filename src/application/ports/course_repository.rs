use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::{
    AudioSentence, Course, CourseChanges, CourseId, NewAudioSentence, NewCourse, NewQuiz, NewUnit,
    Quiz, Unit, UnitChanges, UnitId, UserId,
};

#[async_trait]
pub trait CourseRepository: Send + Sync {
    async fn create_course(&self, course: &NewCourse) -> Result<Course, RepositoryError>;

    async fn get_course(&self, id: CourseId) -> Result<Option<Course>, RepositoryError>;

    async fn list_courses(&self, offset: i64, limit: i64) -> Result<Vec<Course>, RepositoryError>;

    async fn list_teacher_courses(&self, teacher_id: UserId)
    -> Result<Vec<Course>, RepositoryError>;

    async fn update_course(
        &self,
        id: CourseId,
        changes: &CourseChanges,
    ) -> Result<Option<Course>, RepositoryError>;

    /// Removes the course with its units, unit content and enrollments.
    async fn delete_course(&self, id: CourseId) -> Result<bool, RepositoryError>;

    async fn create_unit(&self, unit: &NewUnit) -> Result<Unit, RepositoryError>;

    async fn get_unit(&self, id: UnitId) -> Result<Option<Unit>, RepositoryError>;

    /// Units of a course ordered by `order`.
    async fn list_units(&self, course_id: CourseId) -> Result<Vec<Unit>, RepositoryError>;

    async fn update_unit(
        &self,
        id: UnitId,
        changes: &UnitChanges,
    ) -> Result<Option<Unit>, RepositoryError>;

    async fn delete_unit(&self, id: UnitId) -> Result<bool, RepositoryError>;

    /// Opens a unit of work for multi-row course authoring.
    async fn begin(&self) -> Result<Box<dyn CourseTransaction>, RepositoryError>;
}

/// Inserts made through a transaction become visible only after `commit`.
/// Dropping it uncommitted discards all of them.
#[async_trait]
pub trait CourseTransaction: Send {
    async fn insert_course(&mut self, course: &NewCourse) -> Result<Course, RepositoryError>;

    async fn insert_unit(&mut self, unit: &NewUnit) -> Result<Unit, RepositoryError>;

    async fn insert_quiz(&mut self, quiz: &NewQuiz) -> Result<Quiz, RepositoryError>;

    async fn insert_audio_sentence(
        &mut self,
        audio: &NewAudioSentence,
    ) -> Result<AudioSentence, RepositoryError>;

    async fn commit(self: Box<Self>) -> Result<(), RepositoryError>;
}
