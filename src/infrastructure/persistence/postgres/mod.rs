mod pg_course_repository;
mod pg_enrollment_repository;
mod pg_error;
mod pg_friendship_repository;
mod pg_message_repository;
mod pg_speaking_repository;
mod pg_unit_content_repository;
mod pg_user_repository;
mod rows;

pub use pg_course_repository::{PgCourseRepository, PgCourseTransaction};
pub use pg_enrollment_repository::PgEnrollmentRepository;
pub use pg_friendship_repository::PgFriendshipRepository;
pub use pg_message_repository::PgMessageRepository;
pub use pg_speaking_repository::PgSpeakingRepository;
pub use pg_unit_content_repository::PgUnitContentRepository;
pub use pg_user_repository::PgUserRepository;
