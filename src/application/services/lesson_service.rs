use std::sync::Arc;

use chrono::{Datelike, NaiveDate};

use super::{AudioLibrary, ServiceError};
use crate::domain::{AudioScope, DailyLesson};

const EMBEDDED_LESSONS: &str = include_str!("../../../data/daily_lessons.json");

/// Themed vocabulary lessons rotated by day of the year.
pub struct LessonService {
    lessons: Vec<DailyLesson>,
    audio: Arc<AudioLibrary>,
}

impl LessonService {
    pub fn new(lessons: Vec<DailyLesson>, audio: Arc<AudioLibrary>) -> Result<Self, ServiceError> {
        if lessons.is_empty() {
            return Err(ServiceError::internal("lesson catalog is empty"));
        }
        Ok(Self { lessons, audio })
    }

    /// Builds the service from the catalog compiled into the binary.
    pub fn embedded(audio: Arc<AudioLibrary>) -> Result<Self, ServiceError> {
        let lessons: Vec<DailyLesson> = serde_json::from_str(EMBEDDED_LESSONS)
            .map_err(|e| ServiceError::internal(format!("lesson catalog: {}", e)))?;
        Self::new(lessons, audio)
    }

    pub fn all(&self) -> &[DailyLesson] {
        &self.lessons
    }

    /// The lesson scheduled for `date`, chosen by day-of-year modulo the
    /// catalog size.
    pub fn lesson_for(&self, date: NaiveDate) -> &DailyLesson {
        let index = date.ordinal() as usize % self.lessons.len();
        &self.lessons[index]
    }

    /// The lesson for `date` with a recording attached to every word.
    pub async fn daily_lesson(&self, date: NaiveDate) -> DailyLesson {
        let mut lesson = self.lesson_for(date).clone();
        let scope = AudioScope::daily(lesson.id);
        for word in &mut lesson.words {
            word.audio_path = Some(self.audio.sentence_audio(&word.word, &scope).await);
        }
        lesson
    }
}
