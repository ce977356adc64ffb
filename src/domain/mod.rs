mod audio_scope;
mod audio_sentence;
mod course;
mod daily_lesson;
mod enrollment;
mod friendship;
mod grammar;
mod ids;
mod message;
mod message_role;
mod quiz;
mod speaking_message;
mod speaking_session;
mod user;

pub use audio_scope::{AudioKey, AudioScope};
pub use audio_sentence::{AudioSentence, AudioSentenceChanges, NewAudioSentence};
pub use course::{
    Course, CourseChanges, CourseDetails, NewCourse, NewUnit, Unit, UnitChanges, UnitDetails,
};
pub use daily_lesson::{DailyLesson, VocabularyWord};
pub use enrollment::Enrollment;
pub use friendship::{Friendship, FriendshipStatus};
pub use grammar::{Correction, GrammarReport};
pub use ids::{
    AudioSentenceId, CourseId, EnrollmentId, FriendshipId, MessageId, QuizId, SpeakingMessageId,
    SpeakingSessionId, UnitId, UserId,
};
pub use message::{ConversationPreview, Message, NewMessage};
pub use message_role::MessageRole;
pub use quiz::{NewQuiz, Quiz, QuizChanges, QuizType};
pub use speaking_message::{NewSpeakingMessage, SpeakingMessage};
pub use speaking_session::{
    ConversationType, DifficultyLevel, IllegalTransition, NewSpeakingSession, SessionState,
    SpeakingSession, SpeakingSessionDetails,
};
pub use user::{NewUser, User, UserRole};
