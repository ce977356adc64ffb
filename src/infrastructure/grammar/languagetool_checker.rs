use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::application::ports::{GrammarCheckError, GrammarChecker};
use crate::application::services::{TextEdit, apply_corrections};
use crate::domain::{Correction, GrammarReport};

/// Grammar checking through a LanguageTool `/v2/check` endpoint.
pub struct LanguageToolChecker {
    client: Client,
    url: String,
}

#[derive(Debug, Deserialize)]
struct CheckResponse {
    matches: Vec<Match>,
}

#[derive(Debug, Deserialize)]
struct Match {
    message: String,
    offset: usize,
    length: usize,
    #[serde(default)]
    replacements: Vec<Replacement>,
    context: MatchContext,
    rule: Rule,
}

#[derive(Debug, Deserialize)]
struct Replacement {
    value: String,
}

#[derive(Debug, Deserialize)]
struct MatchContext {
    text: String,
    offset: usize,
    length: usize,
}

#[derive(Debug, Deserialize)]
struct Rule {
    id: String,
}

impl Match {
    fn flagged_text(&self) -> String {
        self.context
            .text
            .chars()
            .skip(self.context.offset)
            .take(self.context.length)
            .collect()
    }
}

impl LanguageToolChecker {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, GrammarCheckError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GrammarCheckError::ApiRequestFailed(e.to_string()))?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

fn report_from_matches(text: &str, matches: Vec<Match>) -> GrammarReport {
    let mut edits = Vec::new();
    let mut corrections = Vec::new();

    for m in matches {
        let Some(first) = m.replacements.first() else {
            continue;
        };
        edits.push(TextEdit {
            offset: m.offset,
            length: m.length,
            replacement: first.value.clone(),
        });
        corrections.push(Correction {
            error: m.flagged_text(),
            suggestion: first.value.clone(),
            message: m.message,
            rule: m.rule.id,
        });
    }

    GrammarReport::new(
        text.to_string(),
        apply_corrections(text, &edits),
        corrections,
    )
}

#[async_trait]
impl GrammarChecker for LanguageToolChecker {
    fn name(&self) -> &'static str {
        "languagetool"
    }

    async fn check(&self, text: &str, language: &str) -> Result<GrammarReport, GrammarCheckError> {
        let response = self
            .client
            .post(&self.url)
            .form(&[("text", text), ("language", language)])
            .send()
            .await
            .map_err(|e| GrammarCheckError::ApiRequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(GrammarCheckError::ApiRequestFailed(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let body: CheckResponse = response
            .json()
            .await
            .map_err(|e| GrammarCheckError::MalformedResponse(e.to_string()))?;

        Ok(report_from_matches(text, body.matches))
    }
}
