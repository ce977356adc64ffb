use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use super::pg_error::query_failed;
use super::rows::{FRIENDSHIP_COLUMNS, FriendshipRow};
use crate::application::ports::{FriendshipRepository, RepositoryError};
use crate::domain::{Friendship, FriendshipId, FriendshipStatus, UserId};

pub struct PgFriendshipRepository {
    pool: PgPool,
}

impl PgFriendshipRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_many(
        &self,
        sql: &str,
        user_id: UserId,
    ) -> Result<Vec<Friendship>, RepositoryError> {
        sqlx::query_as::<_, FriendshipRow>(sql)
            .bind(user_id.as_i64())
            .fetch_all(&self.pool)
            .await
            .map_err(query_failed)?
            .into_iter()
            .map(Friendship::try_from)
            .collect()
    }
}

#[async_trait]
impl FriendshipRepository for PgFriendshipRepository {
    #[instrument(skip(self), fields(a = %a, b = %b))]
    async fn find_between(
        &self,
        a: UserId,
        b: UserId,
    ) -> Result<Option<Friendship>, RepositoryError> {
        let sql = format!(
            "SELECT {FRIENDSHIP_COLUMNS} FROM friendships \
             WHERE (requester_id = $1 AND receiver_id = $2) \
                OR (requester_id = $2 AND receiver_id = $1)"
        );
        sqlx::query_as::<_, FriendshipRow>(&sql)
            .bind(a.as_i64())
            .bind(b.as_i64())
            .fetch_optional(&self.pool)
            .await
            .map_err(query_failed)?
            .map(Friendship::try_from)
            .transpose()
    }

    #[instrument(skip(self), fields(requester_id = %requester_id, receiver_id = %receiver_id))]
    async fn create(
        &self,
        requester_id: UserId,
        receiver_id: UserId,
    ) -> Result<Friendship, RepositoryError> {
        let sql = format!(
            "INSERT INTO friendships (requester_id, receiver_id) VALUES ($1, $2) \
             RETURNING {FRIENDSHIP_COLUMNS}"
        );
        sqlx::query_as::<_, FriendshipRow>(&sql)
            .bind(requester_id.as_i64())
            .bind(receiver_id.as_i64())
            .fetch_one(&self.pool)
            .await
            .map_err(query_failed)?
            .try_into()
    }

    #[instrument(skip(self), fields(friendship_id = %id))]
    async fn get(&self, id: FriendshipId) -> Result<Option<Friendship>, RepositoryError> {
        let sql = format!("SELECT {FRIENDSHIP_COLUMNS} FROM friendships WHERE id = $1");
        sqlx::query_as::<_, FriendshipRow>(&sql)
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await
            .map_err(query_failed)?
            .map(Friendship::try_from)
            .transpose()
    }

    #[instrument(skip(self), fields(friendship_id = %id, status = %status))]
    async fn update_status(
        &self,
        id: FriendshipId,
        status: FriendshipStatus,
    ) -> Result<Option<Friendship>, RepositoryError> {
        let sql = format!(
            "UPDATE friendships SET status = $2, updated_at = NOW() WHERE id = $1 \
             RETURNING {FRIENDSHIP_COLUMNS}"
        );
        sqlx::query_as::<_, FriendshipRow>(&sql)
            .bind(id.as_i64())
            .bind(status.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(query_failed)?
            .map(Friendship::try_from)
            .transpose()
    }

    #[instrument(skip(self), fields(receiver_id = %receiver_id))]
    async fn list_pending_for(
        &self,
        receiver_id: UserId,
    ) -> Result<Vec<Friendship>, RepositoryError> {
        let sql = format!(
            "SELECT {FRIENDSHIP_COLUMNS} FROM friendships \
             WHERE receiver_id = $1 AND status = 'pending' ORDER BY created_at, id"
        );
        self.fetch_many(&sql, receiver_id).await
    }

    #[instrument(skip(self), fields(user_id = %user_id))]
    async fn list_accepted_for(&self, user_id: UserId) -> Result<Vec<Friendship>, RepositoryError> {
        let sql = format!(
            "SELECT {FRIENDSHIP_COLUMNS} FROM friendships \
             WHERE (requester_id = $1 OR receiver_id = $1) AND status = 'accepted' \
             ORDER BY updated_at, id"
        );
        self.fetch_many(&sql, user_id).await
    }
}
