mod azure_speech_synthesizer;
mod disabled_synthesizer;
mod openai_speech_synthesizer;
mod synthesizer_factory;

pub use azure_speech_synthesizer::AzureSpeechSynthesizer;
pub use disabled_synthesizer::DisabledSynthesizer;
pub use openai_speech_synthesizer::OpenAiSpeechSynthesizer;
pub use synthesizer_factory::SynthesizerFactory;
