use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use crate::application::ports::{SpeechSynthesisError, SpeechSynthesizer};

/// OpenAI `audio/speech` endpoint returning MP3.
pub struct OpenAiSpeechSynthesizer {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    voice: String,
}

#[derive(Serialize)]
struct SpeechRequest<'a> {
    model: &'a str,
    voice: &'a str,
    input: &'a str,
    response_format: &'static str,
}

impl OpenAiSpeechSynthesizer {
    pub fn new(base_url: &str, api_key: &str, model: &str, voice: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
            voice: voice.to_string(),
        }
    }
}

#[async_trait]
impl SpeechSynthesizer for OpenAiSpeechSynthesizer {
    async fn synthesize(
        &self,
        text: &str,
        _language: &str,
    ) -> Result<Vec<u8>, SpeechSynthesisError> {
        let response = self
            .client
            .post(format!("{}/audio/speech", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&SpeechRequest {
                model: &self.model,
                voice: &self.voice,
                input: text,
                response_format: "mp3",
            })
            .send()
            .await
            .map_err(|e| SpeechSynthesisError::ApiRequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SpeechSynthesisError::ApiRequestFailed(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| SpeechSynthesisError::ApiRequestFailed(e.to_string()))?;
        tracing::debug!(model = %self.model, bytes = bytes.len(), "OpenAI speech completed");
        Ok(bytes.to_vec())
    }
}
