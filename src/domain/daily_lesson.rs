use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VocabularyWord {
    pub word: String,
    pub translation: String,
    pub explanation: String,
    pub example: String,
    pub example_es: String,
    #[serde(default)]
    pub audio_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyLesson {
    pub id: i64,
    pub theme: String,
    pub words: Vec<VocabularyWord>,
}
