use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use super::pg_error::query_failed;
use super::rows::{MESSAGE_COLUMNS, MessageRow};
use crate::application::ports::{MessageRepository, RepositoryError};
use crate::domain::{Message, NewMessage, UserId};

pub struct PgMessageRepository {
    pool: PgPool,
}

impl PgMessageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageRepository for PgMessageRepository {
    #[instrument(skip(self, message), fields(sender_id = %message.sender_id, receiver_id = %message.receiver_id))]
    async fn create(&self, message: &NewMessage) -> Result<Message, RepositoryError> {
        let sql = format!(
            "INSERT INTO messages (sender_id, receiver_id, content, corrected_content) \
             VALUES ($1, $2, $3, $4) RETURNING {MESSAGE_COLUMNS}"
        );
        let row = sqlx::query_as::<_, MessageRow>(&sql)
            .bind(message.sender_id.as_i64())
            .bind(message.receiver_id.as_i64())
            .bind(&message.content)
            .bind(&message.corrected_content)
            .fetch_one(&self.pool)
            .await
            .map_err(query_failed)?;
        Ok(row.into())
    }

    #[instrument(skip(self), fields(a = %a, b = %b))]
    async fn between(
        &self,
        a: UserId,
        b: UserId,
        limit: i64,
    ) -> Result<Vec<Message>, RepositoryError> {
        let sql = format!(
            "SELECT {MESSAGE_COLUMNS} FROM messages \
             WHERE (sender_id = $1 AND receiver_id = $2) OR (sender_id = $2 AND receiver_id = $1) \
             ORDER BY created_at DESC, id DESC LIMIT $3"
        );
        let rows = sqlx::query_as::<_, MessageRow>(&sql)
            .bind(a.as_i64())
            .bind(b.as_i64())
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(query_failed)?;
        Ok(rows.into_iter().map(Message::from).collect())
    }

    #[instrument(skip(self), fields(receiver_id = %receiver_id, sender_id = %sender_id))]
    async fn mark_read(
        &self,
        receiver_id: UserId,
        sender_id: UserId,
    ) -> Result<u64, RepositoryError> {
        let result = sqlx::query(
            "UPDATE messages SET is_read = TRUE \
             WHERE receiver_id = $1 AND sender_id = $2 AND is_read = FALSE",
        )
        .bind(receiver_id.as_i64())
        .bind(sender_id.as_i64())
        .execute(&self.pool)
        .await
        .map_err(query_failed)?;
        Ok(result.rows_affected())
    }

    #[instrument(skip(self), fields(user_id = %user_id))]
    async fn partners_of(&self, user_id: UserId) -> Result<Vec<UserId>, RepositoryError> {
        let ids: Vec<i64> = sqlx::query_scalar(
            "SELECT DISTINCT CASE WHEN sender_id = $1 THEN receiver_id ELSE sender_id END \
             FROM messages WHERE sender_id = $1 OR receiver_id = $1",
        )
        .bind(user_id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(query_failed)?;
        Ok(ids.into_iter().map(UserId::from_i64).collect())
    }

    #[instrument(skip(self), fields(receiver_id = %receiver_id, sender_id = %sender_id))]
    async fn unread_count(
        &self,
        receiver_id: UserId,
        sender_id: UserId,
    ) -> Result<i64, RepositoryError> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM messages \
             WHERE receiver_id = $1 AND sender_id = $2 AND is_read = FALSE",
        )
        .bind(receiver_id.as_i64())
        .bind(sender_id.as_i64())
        .fetch_one(&self.pool)
        .await
        .map_err(query_failed)
    }
}
