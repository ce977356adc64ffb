use serde::{Deserialize, Serialize};

use super::{AudioSentenceId, UnitId};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AudioSentence {
    pub id: AudioSentenceId,
    pub unit_id: UnitId,
    pub sentence: String,
    pub audio_path: String,
    pub order: i32,
}

#[derive(Debug, Clone)]
pub struct NewAudioSentence {
    pub unit_id: UnitId,
    pub sentence: String,
    pub audio_path: String,
    pub order: i32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AudioSentenceChanges {
    pub sentence: Option<String>,
    pub audio_path: Option<String>,
    pub order: Option<i32>,
}
