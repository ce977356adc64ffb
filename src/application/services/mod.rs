mod audio_library;
mod auth_service;
mod course_service;
mod enrollment_service;
mod grammar_service;
mod lesson_service;
mod prompts;
mod service_error;
mod social_service;
mod speaking_service;

pub use audio_library::{AudioGenerationError, AudioLibrary, ReplyVoice, content_hash};
pub use auth_service::{AccessGrant, AuthService, Registration};
pub use course_service::{
    AudioSentenceInput, CompleteCourse, ContentItem, CourseInput, CourseService, QuizInput,
    UnitInput, UnitOutline,
};
pub use enrollment_service::EnrollmentService;
pub use grammar_service::{GrammarService, TextEdit, apply_corrections};
pub use lesson_service::LessonService;
pub use prompts::{build_system_prompt, grammar_instructions};
pub use service_error::ServiceError;
pub use social_service::SocialService;
pub use speaking_service::{SessionRequest, SpeakingExchange, SpeakingService};
