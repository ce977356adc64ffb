use serde::{Deserialize, Serialize};

/// A single suggested fix inside a checked text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Correction {
    pub error: String,
    pub suggestion: String,
    pub message: String,
    pub rule: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GrammarReport {
    pub original: String,
    pub corrected: String,
    pub has_errors: bool,
    pub corrections: Vec<Correction>,
    /// Set when no checker could process the text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl GrammarReport {
    pub fn new(original: String, corrected: String, corrections: Vec<Correction>) -> Self {
        Self {
            has_errors: !corrections.is_empty(),
            original,
            corrected,
            corrections,
            error: None,
        }
    }

    /// Leaves the text untouched and records why.
    pub fn unchecked(original: &str, reason: impl Into<String>) -> Self {
        Self {
            original: original.to_string(),
            corrected: original.to_string(),
            has_errors: false,
            corrections: Vec::new(),
            error: Some(reason.into()),
        }
    }

    pub fn corrected_if_changed(&self) -> Option<String> {
        self.has_errors.then(|| self.corrected.clone())
    }
}
