use std::sync::Arc;

use tracing::{debug, warn};

use crate::application::ports::GrammarChecker;
use crate::domain::GrammarReport;

/// Runs the configured checkers in order and returns the first report that
/// succeeds. When all of them fail the text comes back unchanged.
pub struct GrammarService {
    strategies: Vec<Arc<dyn GrammarChecker>>,
    language: String,
}

impl GrammarService {
    pub fn new(strategies: Vec<Arc<dyn GrammarChecker>>, language: impl Into<String>) -> Self {
        Self {
            strategies,
            language: language.into(),
        }
    }

    pub async fn check(&self, text: &str) -> GrammarReport {
        if text.trim().is_empty() {
            return GrammarReport::new(text.to_string(), text.to_string(), Vec::new());
        }

        let mut last_failure = None;
        for strategy in &self.strategies {
            match strategy.check(text, &self.language).await {
                Ok(report) => {
                    debug!(
                        checker = strategy.name(),
                        corrections = report.corrections.len(),
                        "Grammar check completed"
                    );
                    return report;
                }
                Err(e) => {
                    warn!(checker = strategy.name(), error = %e, "Grammar checker failed, trying next");
                    last_failure = Some(format!("{}: {}", strategy.name(), e));
                }
            }
        }

        GrammarReport::unchecked(
            text,
            last_failure.unwrap_or_else(|| "no grammar checker configured".to_string()),
        )
    }
}

/// A replacement of `length` characters starting at character `offset`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    pub offset: usize,
    pub length: usize,
    pub replacement: String,
}

/// Applies edits from the highest offset down so earlier offsets stay valid.
/// Offsets count characters, not bytes; ranges past the end are clamped.
pub fn apply_corrections(text: &str, edits: &[TextEdit]) -> String {
    let mut chars: Vec<char> = text.chars().collect();
    let mut ordered: Vec<&TextEdit> = edits.iter().collect();
    ordered.sort_by(|a, b| b.offset.cmp(&a.offset));

    for edit in ordered {
        let start = edit.offset.min(chars.len());
        let end = edit.offset.saturating_add(edit.length).min(chars.len());
        chars.splice(start..end, edit.replacement.chars());
    }

    chars.into_iter().collect()
}
