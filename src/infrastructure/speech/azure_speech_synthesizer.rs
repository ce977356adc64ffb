use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument};

use crate::application::ports::{SpeechSynthesisError, SpeechSynthesizer};

const OUTPUT_FORMAT: &str = "audio-24khz-48kbitrate-mono-mp3";

/// Azure Cognitive Services text-to-speech over the REST endpoint.
pub struct AzureSpeechSynthesizer {
    client: Client,
    endpoint: String,
    api_key: String,
    voice: String,
}

impl AzureSpeechSynthesizer {
    pub fn new(api_key: &str, region: &str, voice: &str) -> Self {
        Self::with_endpoint(
            api_key,
            &format!(
                "https://{}.tts.speech.microsoft.com/cognitiveservices/v1",
                region
            ),
            voice,
        )
    }

    /// Targets a custom or private-link endpoint instead of the regional one.
    pub fn with_endpoint(api_key: &str, endpoint: &str, voice: &str) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.to_string(),
            api_key: api_key.to_string(),
            voice: voice.to_string(),
        }
    }

    /// Locale embedded in the voice name, `en-US` for `en-US-JennyNeural`.
    fn voice_locale(&self, fallback: &str) -> String {
        let parts: Vec<&str> = self.voice.splitn(3, '-').collect();
        match parts.as_slice() {
            [lang, region, _] => format!("{}-{}", lang, region),
            _ => fallback.to_string(),
        }
    }

    fn ssml(&self, text: &str, language: &str) -> String {
        format!(
            "<speak version='1.0' xml:lang='{locale}'><voice name='{voice}'>{text}</voice></speak>",
            locale = self.voice_locale(language),
            voice = self.voice,
            text = escape_xml(text),
        )
    }
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[async_trait]
impl SpeechSynthesizer for AzureSpeechSynthesizer {
    #[instrument(skip(self, text), fields(voice = %self.voice, chars = text.chars().count()))]
    async fn synthesize(
        &self,
        text: &str,
        language: &str,
    ) -> Result<Vec<u8>, SpeechSynthesisError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("Ocp-Apim-Subscription-Key", &self.api_key)
            .header("Content-Type", "application/ssml+xml")
            .header("X-Microsoft-OutputFormat", OUTPUT_FORMAT)
            .header("User-Agent", "tbodemy")
            .body(self.ssml(text, language))
            .send()
            .await
            .map_err(|e| SpeechSynthesisError::ApiRequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SpeechSynthesisError::Canceled(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| SpeechSynthesisError::ApiRequestFailed(e.to_string()))?;
        debug!(bytes = bytes.len(), "Azure synthesis completed");
        Ok(bytes.to_vec())
    }
}

