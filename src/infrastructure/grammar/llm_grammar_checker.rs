use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use crate::application::ports::{
    ChatTurn, CompletionRequest, GrammarCheckError, GrammarChecker, LlmClient,
};
use crate::application::services::grammar_instructions;
use crate::domain::{Correction, GrammarReport};

/// Asks the chat model for a strict-JSON correction of the text.
pub struct LlmGrammarChecker {
    llm: Arc<dyn LlmClient>,
}

#[derive(Debug, Deserialize)]
struct LlmCorrection {
    corrected: String,
    #[serde(default)]
    errors: Vec<Correction>,
}

impl LlmGrammarChecker {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }
}

fn parse_reply(original: &str, reply: &str) -> Result<GrammarReport, GrammarCheckError> {
    let parsed: LlmCorrection = serde_json::from_str(reply.trim())
        .map_err(|e| GrammarCheckError::MalformedResponse(e.to_string()))?;

    let mut report = GrammarReport::new(original.to_string(), parsed.corrected, parsed.errors);
    // A rewrite without itemised errors still counts as a correction.
    report.has_errors |= report.corrected != report.original;
    Ok(report)
}

#[async_trait]
impl GrammarChecker for LlmGrammarChecker {
    fn name(&self) -> &'static str {
        "llm"
    }

    async fn check(&self, text: &str, language: &str) -> Result<GrammarReport, GrammarCheckError> {
        let request = CompletionRequest {
            messages: vec![
                ChatTurn::system(grammar_instructions(language)),
                ChatTurn::user(text),
            ],
            json_output: true,
            temperature: Some(0.0),
        };

        let reply = self
            .llm
            .complete(&request)
            .await
            .map_err(|e| GrammarCheckError::ApiRequestFailed(e.to_string()))?;

        parse_reply(text, &reply)
    }
}
