mod in_memory_store;
mod pg_pool;
mod postgres;

pub use in_memory_store::{InMemoryCourseTransaction, InMemoryStore};
pub use pg_pool::{ConnectRetryPolicy, create_pool, run_migrations};
pub use postgres::{
    PgCourseRepository, PgCourseTransaction, PgEnrollmentRepository, PgFriendshipRepository,
    PgMessageRepository, PgSpeakingRepository, PgUnitContentRepository, PgUserRepository,
};
