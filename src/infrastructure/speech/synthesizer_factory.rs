use std::sync::Arc;

use tracing::warn;

use super::{AzureSpeechSynthesizer, DisabledSynthesizer, OpenAiSpeechSynthesizer};
use crate::application::ports::SpeechSynthesizer;
use crate::presentation::config::{OpenAiSettings, SpeechProvider, SpeechSettings};

pub struct SynthesizerFactory;

impl SynthesizerFactory {
    /// Voice for course and lesson sentences, as selected by `speech.provider`.
    pub fn sentence_voice(
        speech: &SpeechSettings,
        openai: &OpenAiSettings,
    ) -> Arc<dyn SpeechSynthesizer> {
        match speech.provider {
            SpeechProvider::Azure if speech.azure_key.is_empty() => {
                warn!("speech.azure_key is not set, sentence audio will use placeholders");
                Arc::new(DisabledSynthesizer::new("Azure Speech key is not configured"))
            }
            SpeechProvider::Azure if !speech.azure_endpoint.is_empty() => {
                Arc::new(AzureSpeechSynthesizer::with_endpoint(
                    &speech.azure_key,
                    &speech.azure_endpoint,
                    &speech.azure_voice,
                ))
            }
            SpeechProvider::Azure => Arc::new(AzureSpeechSynthesizer::new(
                &speech.azure_key,
                &speech.azure_region,
                &speech.azure_voice,
            )),
            SpeechProvider::OpenAi => Self::reply_voice(openai),
        }
    }

    /// Voice for tutor replies in speaking sessions.
    pub fn reply_voice(openai: &OpenAiSettings) -> Arc<dyn SpeechSynthesizer> {
        if openai.api_key.is_empty() {
            warn!("openai.api_key is not set, speech synthesis is disabled");
            return Arc::new(DisabledSynthesizer::new("OpenAI API key is not configured"));
        }
        Arc::new(OpenAiSpeechSynthesizer::new(
            &openai.base_url,
            &openai.api_key,
            &openai.tts_model,
            &openai.tts_voice,
        ))
    }
}
