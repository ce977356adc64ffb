use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use super::pg_error::query_failed;
use super::rows::{ENROLLMENT_COLUMNS, EnrollmentRow, UserRow};
use crate::application::ports::{EnrollmentRepository, RepositoryError};
use crate::domain::{CourseId, Enrollment, User, UserId};

pub struct PgEnrollmentRepository {
    pool: PgPool,
}

impl PgEnrollmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EnrollmentRepository for PgEnrollmentRepository {
    #[instrument(skip(self), fields(student_id = %student_id, course_id = %course_id))]
    async fn create(
        &self,
        student_id: UserId,
        course_id: CourseId,
    ) -> Result<Enrollment, RepositoryError> {
        let sql = format!(
            "INSERT INTO enrollments (student_id, course_id) VALUES ($1, $2) \
             RETURNING {ENROLLMENT_COLUMNS}"
        );
        let row = sqlx::query_as::<_, EnrollmentRow>(&sql)
            .bind(student_id.as_i64())
            .bind(course_id.as_i64())
            .fetch_one(&self.pool)
            .await
            .map_err(query_failed)?;
        Ok(row.into())
    }

    #[instrument(skip(self), fields(student_id = %student_id, course_id = %course_id))]
    async fn find(
        &self,
        student_id: UserId,
        course_id: CourseId,
    ) -> Result<Option<Enrollment>, RepositoryError> {
        let sql = format!(
            "SELECT {ENROLLMENT_COLUMNS} FROM enrollments WHERE student_id = $1 AND course_id = $2"
        );
        let row = sqlx::query_as::<_, EnrollmentRow>(&sql)
            .bind(student_id.as_i64())
            .bind(course_id.as_i64())
            .fetch_optional(&self.pool)
            .await
            .map_err(query_failed)?;
        Ok(row.map(Enrollment::from))
    }

    #[instrument(skip(self), fields(student_id = %student_id))]
    async fn list_for_student(
        &self,
        student_id: UserId,
    ) -> Result<Vec<Enrollment>, RepositoryError> {
        let sql = format!(
            "SELECT {ENROLLMENT_COLUMNS} FROM enrollments WHERE student_id = $1 ORDER BY enrolled_at, id"
        );
        let rows = sqlx::query_as::<_, EnrollmentRow>(&sql)
            .bind(student_id.as_i64())
            .fetch_all(&self.pool)
            .await
            .map_err(query_failed)?;
        Ok(rows.into_iter().map(Enrollment::from).collect())
    }

    #[instrument(skip(self), fields(course_id = %course_id))]
    async fn list_students(&self, course_id: CourseId) -> Result<Vec<User>, RepositoryError> {
        let rows = sqlx::query_as::<_, UserRow>(
            "SELECT u.id, u.email, u.password_hash, u.name, u.role, u.is_active, u.created_at \
             FROM users u JOIN enrollments e ON e.student_id = u.id \
             WHERE e.course_id = $1 ORDER BY e.enrolled_at, e.id",
        )
        .bind(course_id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(query_failed)?;
        rows.into_iter().map(User::try_from).collect()
    }
}
