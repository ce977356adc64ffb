use crate::application::ports::RepositoryError;

/// Maps driver errors, keeping uniqueness and foreign-key violations apart
/// from ordinary query failures.
pub(super) fn query_failed(err: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(db) = &err {
        if db.is_unique_violation() || db.is_foreign_key_violation() || db.is_check_violation() {
            return RepositoryError::ConstraintViolation(db.message().to_string());
        }
    }
    RepositoryError::QueryFailed(err.to_string())
}

pub(super) fn decode_failed(field: &str, err: String) -> RepositoryError {
    RepositoryError::Decode(format!("{}: {}", field, err))
}
