use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::{Message, NewMessage, UserId};

#[async_trait]
pub trait MessageRepository: Send + Sync {
    async fn create(&self, message: &NewMessage) -> Result<Message, RepositoryError>;

    /// Messages exchanged between the two users, newest first.
    async fn between(
        &self,
        a: UserId,
        b: UserId,
        limit: i64,
    ) -> Result<Vec<Message>, RepositoryError>;

    /// Marks everything `sender_id` sent to `receiver_id` as read.
    async fn mark_read(&self, receiver_id: UserId, sender_id: UserId)
    -> Result<u64, RepositoryError>;

    /// Users that exchanged at least one message with `user_id`.
    async fn partners_of(&self, user_id: UserId) -> Result<Vec<UserId>, RepositoryError>;

    async fn unread_count(
        &self,
        receiver_id: UserId,
        sender_id: UserId,
    ) -> Result<i64, RepositoryError>;
}
