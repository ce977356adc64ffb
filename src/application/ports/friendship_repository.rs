use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::{Friendship, FriendshipId, FriendshipStatus, UserId};

#[async_trait]
pub trait FriendshipRepository: Send + Sync {
    /// Any record for the unordered pair, regardless of direction and status.
    async fn find_between(
        &self,
        a: UserId,
        b: UserId,
    ) -> Result<Option<Friendship>, RepositoryError>;

    async fn create(
        &self,
        requester_id: UserId,
        receiver_id: UserId,
    ) -> Result<Friendship, RepositoryError>;

    async fn get(&self, id: FriendshipId) -> Result<Option<Friendship>, RepositoryError>;

    async fn update_status(
        &self,
        id: FriendshipId,
        status: FriendshipStatus,
    ) -> Result<Option<Friendship>, RepositoryError>;

    async fn list_pending_for(&self, receiver_id: UserId)
    -> Result<Vec<Friendship>, RepositoryError>;

    async fn list_accepted_for(&self, user_id: UserId) -> Result<Vec<Friendship>, RepositoryError>;
}
