mod audio_store;
mod course_repository;
mod credentials;
mod enrollment_repository;
mod friendship_repository;
mod grammar_checker;
mod llm_client;
mod message_repository;
mod repository_error;
mod speaking_repository;
mod speech_synthesizer;
mod transcription_engine;
mod unit_content_repository;
mod user_repository;

pub use audio_store::{AudioStore, AudioStoreError};
pub use course_repository::{CourseRepository, CourseTransaction};
pub use credentials::{CredentialError, IssuedToken, PasswordHasher, TokenCodec};
pub use enrollment_repository::EnrollmentRepository;
pub use friendship_repository::FriendshipRepository;
pub use grammar_checker::{GrammarCheckError, GrammarChecker};
pub use llm_client::{ChatTurn, CompletionRequest, LlmClient, LlmClientError};
pub use message_repository::MessageRepository;
pub use repository_error::RepositoryError;
pub use speaking_repository::SpeakingRepository;
pub use speech_synthesizer::{SpeechSynthesisError, SpeechSynthesizer};
pub use transcription_engine::{TranscriptionEngine, TranscriptionError};
pub use unit_content_repository::UnitContentRepository;
pub use user_repository::UserRepository;
