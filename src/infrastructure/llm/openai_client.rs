use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::is_quota_error;
use crate::application::ports::{ChatTurn, CompletionRequest, LlmClient, LlmClientError};

/// Chat completions against an OpenAI-compatible endpoint.
pub struct OpenAiClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    max_tokens: usize,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: usize,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

impl<'a> From<&'a ChatTurn> for ChatMessage<'a> {
    fn from(turn: &'a ChatTurn) -> Self {
        Self {
            role: turn.role.as_str(),
            content: &turn.content,
        }
    }
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl OpenAiClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        max_tokens: usize,
        temperature: f32,
    ) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: model.into(),
            max_tokens,
            temperature,
        }
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    #[instrument(skip(self, request), fields(model = %self.model, turns = request.messages.len()))]
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmClientError> {
        let body = ChatCompletionRequest {
            model: &self.model,
            messages: request.messages.iter().map(ChatMessage::from).collect(),
            max_tokens: self.max_tokens,
            temperature: request.temperature.unwrap_or(self.temperature),
            response_format: request.json_output.then_some(ResponseFormat {
                kind: "json_object",
            }),
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmClientError::ApiRequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            if is_quota_error(status, &body) {
                return Err(LlmClientError::RateLimited);
            }
            return Err(LlmClientError::ApiRequestFailed(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| LlmClientError::InvalidResponse(e.to_string()))?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| LlmClientError::InvalidResponse("empty choices".to_string()))?;

        debug!(chars = content.chars().count(), "Received completion");
        Ok(content)
    }
}
