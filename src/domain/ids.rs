use std::fmt;

use serde::{Deserialize, Serialize};

/// Declares an `i64` newtype identifier assigned by storage.
macro_rules! entity_id {
    ($($name:ident),+ $(,)?) => {
        $(
            #[derive(
                Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
            )]
            #[serde(transparent)]
            pub struct $name(i64);

            impl $name {
                pub fn from_i64(raw: i64) -> Self {
                    Self(raw)
                }

                pub fn as_i64(&self) -> i64 {
                    self.0
                }
            }

            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, "{}", self.0)
                }
            }
        )+
    };
}

entity_id!(
    UserId,
    CourseId,
    UnitId,
    QuizId,
    AudioSentenceId,
    EnrollmentId,
    FriendshipId,
    MessageId,
    SpeakingSessionId,
    SpeakingMessageId,
);
