use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::{
    AudioSentence, AudioSentenceChanges, AudioSentenceId, NewAudioSentence, NewQuiz, Quiz,
    QuizChanges, QuizId, UnitId,
};

/// Quizzes and audio sentences attached to units.
#[async_trait]
pub trait UnitContentRepository: Send + Sync {
    async fn create_quiz(&self, quiz: &NewQuiz) -> Result<Quiz, RepositoryError>;

    async fn get_quiz(&self, id: QuizId) -> Result<Option<Quiz>, RepositoryError>;

    async fn list_quizzes(&self, unit_id: UnitId) -> Result<Vec<Quiz>, RepositoryError>;

    async fn update_quiz(
        &self,
        id: QuizId,
        changes: &QuizChanges,
    ) -> Result<Option<Quiz>, RepositoryError>;

    async fn delete_quiz(&self, id: QuizId) -> Result<bool, RepositoryError>;

    async fn create_audio_sentence(
        &self,
        audio: &NewAudioSentence,
    ) -> Result<AudioSentence, RepositoryError>;

    async fn get_audio_sentence(
        &self,
        id: AudioSentenceId,
    ) -> Result<Option<AudioSentence>, RepositoryError>;

    async fn list_audio_sentences(
        &self,
        unit_id: UnitId,
    ) -> Result<Vec<AudioSentence>, RepositoryError>;

    async fn update_audio_sentence(
        &self,
        id: AudioSentenceId,
        changes: &AudioSentenceChanges,
    ) -> Result<Option<AudioSentence>, RepositoryError>;

    async fn delete_audio_sentence(&self, id: AudioSentenceId) -> Result<bool, RepositoryError>;
}
