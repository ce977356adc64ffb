mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    AuthSettings, DatabaseBackend, DatabaseSettings, GrammarSettings, LoggingSettings,
    OpenAiSettings, ServerSettings, Settings, SpeechProvider, SpeechSettings, StorageSettings,
};
