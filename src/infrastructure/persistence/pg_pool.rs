use std::time::Duration;

use sqlx::{PgPool, postgres::PgPoolOptions};
use tracing::{info, instrument, warn};

use crate::application::ports::RepositoryError;
use crate::presentation::config::DatabaseSettings;

/// How many times to retry an unreachable database, and how long to wait
/// before each attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectRetryPolicy {
    pub retries: u32,
    pub initial_delay: Duration,
}

impl ConnectRetryPolicy {
    pub fn from_settings(settings: &DatabaseSettings) -> Self {
        Self {
            retries: settings.connect_retries,
            initial_delay: Duration::from_millis(settings.connect_retry_delay_ms),
        }
    }

    /// Waits between consecutive attempts, doubling from the initial delay.
    pub fn delays(&self) -> impl Iterator<Item = Duration> {
        let initial = self.initial_delay;
        (0..self.retries).map(move |attempt| initial.saturating_mul(1 << attempt.min(16)))
    }
}

/// Opens the pool for `settings.url`, retrying while the server comes up
/// (containers started alongside the service are often still booting).
#[instrument(skip(settings), fields(max_connections = settings.max_connections))]
pub async fn create_pool(settings: &DatabaseSettings) -> Result<PgPool, RepositoryError> {
    let policy = ConnectRetryPolicy::from_settings(settings);
    let mut delays = policy.delays();
    let mut attempt = 1u32;

    loop {
        let outcome = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .connect(&settings.url)
            .await;

        match outcome {
            Ok(pool) => {
                info!(attempt, "PostgreSQL connection pool established");
                return Ok(pool);
            }
            Err(e) => match delays.next() {
                Some(delay) => {
                    warn!(
                        error = %e,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        "PostgreSQL connection failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                None => {
                    return Err(RepositoryError::ConnectionFailed(format!(
                        "gave up after {} attempts: {}",
                        attempt, e
                    )));
                }
            },
        }
    }
}

/// Applies the embedded `migrations/` directory.
#[instrument(skip(pool))]
pub async fn run_migrations(pool: &PgPool) -> Result<(), RepositoryError> {
    sqlx::migrate!()
        .run(pool)
        .await
        .map_err(|e| RepositoryError::QueryFailed(format!("migration failed: {}", e)))?;
    info!("Database migrations applied");
    Ok(())
}
