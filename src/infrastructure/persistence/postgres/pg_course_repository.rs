use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::{PgExecutor, PgPool, Postgres, Transaction};
use tracing::{debug, instrument};

use super::pg_error::query_failed;
use super::rows::{
    AUDIO_SENTENCE_COLUMNS, AudioSentenceRow, COURSE_COLUMNS, CourseRow, QUIZ_COLUMNS, QuizRow,
    UNIT_COLUMNS, UnitRow,
};
use crate::application::ports::{CourseRepository, CourseTransaction, RepositoryError};
use crate::domain::{
    AudioSentence, Course, CourseChanges, CourseId, NewAudioSentence, NewCourse, NewQuiz, NewUnit,
    Quiz, Unit, UnitChanges, UnitId, UserId,
};

async fn insert_course<'e>(
    executor: impl PgExecutor<'e>,
    course: &NewCourse,
) -> Result<Course, RepositoryError> {
    let sql = format!(
        "INSERT INTO courses (title, description, teacher_id, is_published) \
         VALUES ($1, $2, $3, $4) RETURNING {COURSE_COLUMNS}"
    );
    let row = sqlx::query_as::<_, CourseRow>(&sql)
        .bind(&course.title)
        .bind(&course.description)
        .bind(course.teacher_id.as_i64())
        .bind(course.is_published)
        .fetch_one(executor)
        .await
        .map_err(query_failed)?;
    Ok(row.into())
}

async fn insert_unit<'e>(
    executor: impl PgExecutor<'e>,
    unit: &NewUnit,
) -> Result<Unit, RepositoryError> {
    let sql = format!(
        "INSERT INTO units (course_id, title, position, content) \
         VALUES ($1, $2, $3, $4) RETURNING {UNIT_COLUMNS}"
    );
    let row = sqlx::query_as::<_, UnitRow>(&sql)
        .bind(unit.course_id.as_i64())
        .bind(&unit.title)
        .bind(unit.order)
        .bind(&unit.content)
        .fetch_one(executor)
        .await
        .map_err(query_failed)?;
    Ok(row.into())
}

pub(super) async fn insert_quiz<'e>(
    executor: impl PgExecutor<'e>,
    quiz: &NewQuiz,
) -> Result<Quiz, RepositoryError> {
    let sql = format!(
        "INSERT INTO quizzes (unit_id, quiz_type, question, correct_answer, options, position) \
         VALUES ($1, $2, $3, $4, $5, $6) RETURNING {QUIZ_COLUMNS}"
    );
    sqlx::query_as::<_, QuizRow>(&sql)
        .bind(quiz.unit_id.as_i64())
        .bind(quiz.quiz_type.as_str())
        .bind(&quiz.question)
        .bind(&quiz.correct_answer)
        .bind(quiz.options.as_ref().map(Json))
        .bind(quiz.order)
        .fetch_one(executor)
        .await
        .map_err(query_failed)?
        .try_into()
}

pub(super) async fn insert_audio_sentence<'e>(
    executor: impl PgExecutor<'e>,
    audio: &NewAudioSentence,
) -> Result<AudioSentence, RepositoryError> {
    let sql = format!(
        "INSERT INTO audio_sentences (unit_id, sentence, audio_path, position) \
         VALUES ($1, $2, $3, $4) RETURNING {AUDIO_SENTENCE_COLUMNS}"
    );
    let row = sqlx::query_as::<_, AudioSentenceRow>(&sql)
        .bind(audio.unit_id.as_i64())
        .bind(&audio.sentence)
        .bind(&audio.audio_path)
        .bind(audio.order)
        .fetch_one(executor)
        .await
        .map_err(query_failed)?;
    Ok(row.into())
}

pub struct PgCourseRepository {
    pool: PgPool,
}

impl PgCourseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CourseRepository for PgCourseRepository {
    #[instrument(skip(self, course), fields(teacher_id = %course.teacher_id))]
    async fn create_course(&self, course: &NewCourse) -> Result<Course, RepositoryError> {
        insert_course(&self.pool, course).await
    }

    #[instrument(skip(self), fields(course_id = %id))]
    async fn get_course(&self, id: CourseId) -> Result<Option<Course>, RepositoryError> {
        let sql = format!("SELECT {COURSE_COLUMNS} FROM courses WHERE id = $1");
        let row = sqlx::query_as::<_, CourseRow>(&sql)
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await
            .map_err(query_failed)?;
        Ok(row.map(Course::from))
    }

    #[instrument(skip(self))]
    async fn list_courses(&self, offset: i64, limit: i64) -> Result<Vec<Course>, RepositoryError> {
        let sql = format!("SELECT {COURSE_COLUMNS} FROM courses ORDER BY id OFFSET $1 LIMIT $2");
        let rows = sqlx::query_as::<_, CourseRow>(&sql)
            .bind(offset)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(query_failed)?;
        Ok(rows.into_iter().map(Course::from).collect())
    }

    #[instrument(skip(self), fields(teacher_id = %teacher_id))]
    async fn list_teacher_courses(
        &self,
        teacher_id: UserId,
    ) -> Result<Vec<Course>, RepositoryError> {
        let sql = format!("SELECT {COURSE_COLUMNS} FROM courses WHERE teacher_id = $1 ORDER BY id");
        let rows = sqlx::query_as::<_, CourseRow>(&sql)
            .bind(teacher_id.as_i64())
            .fetch_all(&self.pool)
            .await
            .map_err(query_failed)?;
        Ok(rows.into_iter().map(Course::from).collect())
    }

    #[instrument(skip(self, changes), fields(course_id = %id))]
    async fn update_course(
        &self,
        id: CourseId,
        changes: &CourseChanges,
    ) -> Result<Option<Course>, RepositoryError> {
        let sql = format!(
            "UPDATE courses SET \
               title = COALESCE($2, title), \
               description = COALESCE($3, description), \
               is_published = COALESCE($4, is_published), \
               updated_at = NOW() \
             WHERE id = $1 RETURNING {COURSE_COLUMNS}"
        );
        let row = sqlx::query_as::<_, CourseRow>(&sql)
            .bind(id.as_i64())
            .bind(&changes.title)
            .bind(&changes.description)
            .bind(changes.is_published)
            .fetch_optional(&self.pool)
            .await
            .map_err(query_failed)?;
        Ok(row.map(Course::from))
    }

    #[instrument(skip(self), fields(course_id = %id))]
    async fn delete_course(&self, id: CourseId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(query_failed)?;
        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self, unit), fields(course_id = %unit.course_id))]
    async fn create_unit(&self, unit: &NewUnit) -> Result<Unit, RepositoryError> {
        insert_unit(&self.pool, unit).await
    }

    #[instrument(skip(self), fields(unit_id = %id))]
    async fn get_unit(&self, id: UnitId) -> Result<Option<Unit>, RepositoryError> {
        let sql = format!("SELECT {UNIT_COLUMNS} FROM units WHERE id = $1");
        let row = sqlx::query_as::<_, UnitRow>(&sql)
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await
            .map_err(query_failed)?;
        Ok(row.map(Unit::from))
    }

    #[instrument(skip(self), fields(course_id = %course_id))]
    async fn list_units(&self, course_id: CourseId) -> Result<Vec<Unit>, RepositoryError> {
        let sql = format!(
            "SELECT {UNIT_COLUMNS} FROM units WHERE course_id = $1 ORDER BY position, id"
        );
        let rows = sqlx::query_as::<_, UnitRow>(&sql)
            .bind(course_id.as_i64())
            .fetch_all(&self.pool)
            .await
            .map_err(query_failed)?;
        Ok(rows.into_iter().map(Unit::from).collect())
    }

    #[instrument(skip(self, changes), fields(unit_id = %id))]
    async fn update_unit(
        &self,
        id: UnitId,
        changes: &UnitChanges,
    ) -> Result<Option<Unit>, RepositoryError> {
        let sql = format!(
            "UPDATE units SET \
               title = COALESCE($2, title), \
               content = COALESCE($3, content), \
               position = COALESCE($4, position) \
             WHERE id = $1 RETURNING {UNIT_COLUMNS}"
        );
        let row = sqlx::query_as::<_, UnitRow>(&sql)
            .bind(id.as_i64())
            .bind(&changes.title)
            .bind(&changes.content)
            .bind(changes.order)
            .fetch_optional(&self.pool)
            .await
            .map_err(query_failed)?;
        Ok(row.map(Unit::from))
    }

    #[instrument(skip(self), fields(unit_id = %id))]
    async fn delete_unit(&self, id: UnitId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM units WHERE id = $1")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(query_failed)?;
        Ok(result.rows_affected() > 0)
    }

    async fn begin(&self) -> Result<Box<dyn CourseTransaction>, RepositoryError> {
        let tx = self.pool.begin().await.map_err(query_failed)?;
        debug!("Opened course authoring transaction");
        Ok(Box::new(PgCourseTransaction { tx }))
    }
}

/// Rolls back on drop unless committed.
pub struct PgCourseTransaction {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl CourseTransaction for PgCourseTransaction {
    async fn insert_course(&mut self, course: &NewCourse) -> Result<Course, RepositoryError> {
        insert_course(&mut *self.tx, course).await
    }

    async fn insert_unit(&mut self, unit: &NewUnit) -> Result<Unit, RepositoryError> {
        insert_unit(&mut *self.tx, unit).await
    }

    async fn insert_quiz(&mut self, quiz: &NewQuiz) -> Result<Quiz, RepositoryError> {
        insert_quiz(&mut *self.tx, quiz).await
    }

    async fn insert_audio_sentence(
        &mut self,
        audio: &NewAudioSentence,
    ) -> Result<AudioSentence, RepositoryError> {
        insert_audio_sentence(&mut *self.tx, audio).await
    }

    async fn commit(self: Box<Self>) -> Result<(), RepositoryError> {
        self.tx.commit().await.map_err(query_failed)
    }
}
