use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{QuizId, UnitId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizType {
    FillBlank,
    MultipleChoice,
}

impl QuizType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuizType::FillBlank => "fill_blank",
            QuizType::MultipleChoice => "multiple_choice",
        }
    }
}

impl FromStr for QuizType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fill_blank" => Ok(QuizType::FillBlank),
            "multiple_choice" => Ok(QuizType::MultipleChoice),
            _ => Err(format!("Invalid quiz type: {}", s)),
        }
    }
}

impl fmt::Display for QuizType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quiz {
    pub id: QuizId,
    pub unit_id: UnitId,
    pub quiz_type: QuizType,
    pub question: String,
    pub correct_answer: String,
    pub options: Option<Vec<String>>,
    pub order: i32,
}

#[derive(Debug, Clone)]
pub struct NewQuiz {
    pub unit_id: UnitId,
    pub quiz_type: QuizType,
    pub question: String,
    pub correct_answer: String,
    pub options: Option<Vec<String>>,
    pub order: i32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuizChanges {
    pub quiz_type: Option<QuizType>,
    pub question: Option<String>,
    pub correct_answer: Option<String>,
    pub options: Option<Vec<String>>,
    pub order: Option<i32>,
}
