use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use super::pg_error::query_failed;
use super::rows::{USER_COLUMNS, UserRow};
use crate::application::ports::{RepositoryError, UserRepository};
use crate::domain::{NewUser, User, UserId};

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self, user), fields(role = %user.role))]
    async fn create(&self, user: &NewUser) -> Result<User, RepositoryError> {
        let sql = format!(
            "INSERT INTO users (email, password_hash, name, role) VALUES ($1, $2, $3, $4) \
             RETURNING {USER_COLUMNS}"
        );
        sqlx::query_as::<_, UserRow>(&sql)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(&user.name)
            .bind(user.role.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(query_failed)?
            .try_into()
    }

    #[instrument(skip(self), fields(user_id = %id))]
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, UserRow>(&sql)
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await
            .map_err(query_failed)?
            .map(User::try_from)
            .transpose()
    }

    #[instrument(skip(self, email))]
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, UserRow>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(query_failed)?
            .map(User::try_from)
            .transpose()
    }

    #[instrument(skip(self))]
    async fn list_students(&self, exclude: Option<UserId>) -> Result<Vec<User>, RepositoryError> {
        let sql = format!(
            "SELECT {USER_COLUMNS} FROM users \
             WHERE role = 'student' AND ($1::BIGINT IS NULL OR id <> $1) ORDER BY id"
        );
        sqlx::query_as::<_, UserRow>(&sql)
            .bind(exclude.map(|id| id.as_i64()))
            .fetch_all(&self.pool)
            .await
            .map_err(query_failed)?
            .into_iter()
            .map(User::try_from)
            .collect()
    }
}
