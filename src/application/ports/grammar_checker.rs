use async_trait::async_trait;

use crate::domain::GrammarReport;

/// One strategy in the grammar-correction chain.
#[async_trait]
pub trait GrammarChecker: Send + Sync {
    fn name(&self) -> &'static str;

    async fn check(&self, text: &str, language: &str) -> Result<GrammarReport, GrammarCheckError>;
}

#[derive(Debug, thiserror::Error)]
pub enum GrammarCheckError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("malformed checker response: {0}")]
    MalformedResponse(String),
}
