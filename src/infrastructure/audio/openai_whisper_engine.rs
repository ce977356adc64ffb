use std::path::Path;

use async_trait::async_trait;
use reqwest::multipart;
use serde::Deserialize;

use crate::application::ports::{TranscriptionEngine, TranscriptionError};
use crate::infrastructure::llm::is_quota_error;

pub struct OpenAiWhisperEngine {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    language: String,
}

#[derive(Deserialize)]
struct TranscriptionResponse {
    text: String,
}

impl OpenAiWhisperEngine {
    pub fn new(
        api_key: String,
        base_url: Option<String>,
        model: Option<String>,
        language: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: base_url
                .unwrap_or_else(|| "https://api.openai.com/v1".to_string())
                .trim_end_matches('/')
                .to_string(),
            model: model.unwrap_or_else(|| "whisper-1".to_string()),
            language: language.into(),
        }
    }
}

fn audio_mime(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("mp3") | Some("mpeg") | Some("mpga") => "audio/mpeg",
        Some("wav") => "audio/wav",
        Some("m4a") | Some("mp4") => "audio/mp4",
        Some("ogg") | Some("oga") => "audio/ogg",
        _ => "audio/webm",
    }
}

#[async_trait]
impl TranscriptionEngine for OpenAiWhisperEngine {
    async fn transcribe(&self, audio_file: &Path) -> Result<String, TranscriptionError> {
        let url = format!("{}/audio/transcriptions", self.base_url);

        let audio_data = tokio::fs::read(audio_file)
            .await
            .map_err(|e| TranscriptionError::ReadFailed(format!("{}: {}", audio_file.display(), e)))?;

        let file_name = audio_file
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("audio.webm")
            .to_string();

        let file_part = multipart::Part::bytes(audio_data)
            .file_name(file_name)
            .mime_str(audio_mime(audio_file))
            .map_err(|e| TranscriptionError::ApiRequestFailed(format!("mime: {}", e)))?;

        let form = multipart::Form::new()
            .text("model", self.model.clone())
            .text("language", self.language.clone())
            .text("response_format", "json")
            .part("file", file_part);

        tracing::debug!(model = %self.model, "Sending audio to OpenAI Whisper API");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| TranscriptionError::ApiRequestFailed(format!("request: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            if is_quota_error(status, &body) {
                return Err(TranscriptionError::QuotaExceeded);
            }
            return Err(TranscriptionError::ApiRequestFailed(format!(
                "status {}: {}",
                status, body
            )));
        }

        let transcript: TranscriptionResponse = response
            .json()
            .await
            .map_err(|e| TranscriptionError::InvalidResponse(format!("body: {}", e)))?;

        tracing::info!(
            chars = transcript.text.chars().count(),
            "OpenAI Whisper transcription completed"
        );

        Ok(transcript.text.trim().to_string())
    }
}

