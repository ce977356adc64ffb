use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::types::Json;
use tracing::instrument;

use super::pg_course_repository::{insert_audio_sentence, insert_quiz};
use super::pg_error::query_failed;
use super::rows::{AUDIO_SENTENCE_COLUMNS, AudioSentenceRow, QUIZ_COLUMNS, QuizRow};
use crate::application::ports::{RepositoryError, UnitContentRepository};
use crate::domain::{
    AudioSentence, AudioSentenceChanges, AudioSentenceId, NewAudioSentence, NewQuiz, Quiz,
    QuizChanges, QuizId, UnitId,
};

pub struct PgUnitContentRepository {
    pool: PgPool,
}

impl PgUnitContentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UnitContentRepository for PgUnitContentRepository {
    #[instrument(skip(self, quiz), fields(unit_id = %quiz.unit_id))]
    async fn create_quiz(&self, quiz: &NewQuiz) -> Result<Quiz, RepositoryError> {
        insert_quiz(&self.pool, quiz).await
    }

    #[instrument(skip(self), fields(quiz_id = %id))]
    async fn get_quiz(&self, id: QuizId) -> Result<Option<Quiz>, RepositoryError> {
        let sql = format!("SELECT {QUIZ_COLUMNS} FROM quizzes WHERE id = $1");
        sqlx::query_as::<_, QuizRow>(&sql)
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await
            .map_err(query_failed)?
            .map(Quiz::try_from)
            .transpose()
    }

    #[instrument(skip(self), fields(unit_id = %unit_id))]
    async fn list_quizzes(&self, unit_id: UnitId) -> Result<Vec<Quiz>, RepositoryError> {
        let sql =
            format!("SELECT {QUIZ_COLUMNS} FROM quizzes WHERE unit_id = $1 ORDER BY position, id");
        sqlx::query_as::<_, QuizRow>(&sql)
            .bind(unit_id.as_i64())
            .fetch_all(&self.pool)
            .await
            .map_err(query_failed)?
            .into_iter()
            .map(Quiz::try_from)
            .collect()
    }

    #[instrument(skip(self, changes), fields(quiz_id = %id))]
    async fn update_quiz(
        &self,
        id: QuizId,
        changes: &QuizChanges,
    ) -> Result<Option<Quiz>, RepositoryError> {
        let sql = format!(
            "UPDATE quizzes SET \
               quiz_type = COALESCE($2, quiz_type), \
               question = COALESCE($3, question), \
               correct_answer = COALESCE($4, correct_answer), \
               options = COALESCE($5, options), \
               position = COALESCE($6, position) \
             WHERE id = $1 RETURNING {QUIZ_COLUMNS}"
        );
        sqlx::query_as::<_, QuizRow>(&sql)
            .bind(id.as_i64())
            .bind(changes.quiz_type.map(|t| t.as_str()))
            .bind(&changes.question)
            .bind(&changes.correct_answer)
            .bind(changes.options.as_ref().map(Json))
            .bind(changes.order)
            .fetch_optional(&self.pool)
            .await
            .map_err(query_failed)?
            .map(Quiz::try_from)
            .transpose()
    }

    #[instrument(skip(self), fields(quiz_id = %id))]
    async fn delete_quiz(&self, id: QuizId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM quizzes WHERE id = $1")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(query_failed)?;
        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self, audio), fields(unit_id = %audio.unit_id))]
    async fn create_audio_sentence(
        &self,
        audio: &NewAudioSentence,
    ) -> Result<AudioSentence, RepositoryError> {
        insert_audio_sentence(&self.pool, audio).await
    }

    #[instrument(skip(self), fields(audio_sentence_id = %id))]
    async fn get_audio_sentence(
        &self,
        id: AudioSentenceId,
    ) -> Result<Option<AudioSentence>, RepositoryError> {
        let sql = format!("SELECT {AUDIO_SENTENCE_COLUMNS} FROM audio_sentences WHERE id = $1");
        let row = sqlx::query_as::<_, AudioSentenceRow>(&sql)
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await
            .map_err(query_failed)?;
        Ok(row.map(AudioSentence::from))
    }

    #[instrument(skip(self), fields(unit_id = %unit_id))]
    async fn list_audio_sentences(
        &self,
        unit_id: UnitId,
    ) -> Result<Vec<AudioSentence>, RepositoryError> {
        let sql = format!(
            "SELECT {AUDIO_SENTENCE_COLUMNS} FROM audio_sentences \
             WHERE unit_id = $1 ORDER BY position, id"
        );
        let rows = sqlx::query_as::<_, AudioSentenceRow>(&sql)
            .bind(unit_id.as_i64())
            .fetch_all(&self.pool)
            .await
            .map_err(query_failed)?;
        Ok(rows.into_iter().map(AudioSentence::from).collect())
    }

    #[instrument(skip(self, changes), fields(audio_sentence_id = %id))]
    async fn update_audio_sentence(
        &self,
        id: AudioSentenceId,
        changes: &AudioSentenceChanges,
    ) -> Result<Option<AudioSentence>, RepositoryError> {
        let sql = format!(
            "UPDATE audio_sentences SET \
               sentence = COALESCE($2, sentence), \
               audio_path = COALESCE($3, audio_path), \
               position = COALESCE($4, position) \
             WHERE id = $1 RETURNING {AUDIO_SENTENCE_COLUMNS}"
        );
        let row = sqlx::query_as::<_, AudioSentenceRow>(&sql)
            .bind(id.as_i64())
            .bind(&changes.sentence)
            .bind(&changes.audio_path)
            .bind(changes.order)
            .fetch_optional(&self.pool)
            .await
            .map_err(query_failed)?;
        Ok(row.map(AudioSentence::from))
    }

    #[instrument(skip(self), fields(audio_sentence_id = %id))]
    async fn delete_audio_sentence(&self, id: AudioSentenceId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM audio_sentences WHERE id = $1")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(query_failed)?;
        Ok(result.rows_affected() > 0)
    }
}
