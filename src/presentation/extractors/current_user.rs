use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use crate::application::services::ServiceError;
use crate::domain::{User, UserRole};
use crate::presentation::error::ApiError;
use crate::presentation::state::AppState;

/// Any signed-in user, resolved from `Authorization: Bearer <token>`.
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

/// A signed-in teacher. Rejects with 403 before the body is read.
#[derive(Debug, Clone)]
pub struct TeacherUser(pub User);

/// A signed-in student. Rejects with 403 before the body is read.
#[derive(Debug, Clone)]
pub struct StudentUser(pub User);

fn bearer_token(parts: &Parts) -> Result<&str, ApiError> {
    let unauthenticated = || ApiError(ServiceError::Unauthorized("Not authenticated".to_string()));
    let value = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(unauthenticated)?;
    let (scheme, token) = value.split_once(' ').ok_or_else(unauthenticated)?;
    if !scheme.eq_ignore_ascii_case("bearer") || token.trim().is_empty() {
        return Err(unauthenticated());
    }
    Ok(token.trim())
}

async fn user_with_role(
    parts: &Parts,
    state: &AppState,
    role: UserRole,
    denial: &str,
) -> Result<User, ApiError> {
    let user = state.auth.authenticate(bearer_token(parts)?).await?;
    if user.role != role {
        return Err(ApiError(ServiceError::forbidden(denial)));
    }
    Ok(user)
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let user = state.auth.authenticate(bearer_token(parts)?).await?;
        Ok(Self(user))
    }
}

impl FromRequestParts<AppState> for TeacherUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        user_with_role(
            parts,
            state,
            UserRole::Teacher,
            "Only teachers can access this resource",
        )
        .await
        .map(Self)
    }
}

impl FromRequestParts<AppState> for StudentUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        user_with_role(
            parts,
            state,
            UserRole::Student,
            "Only students can access this resource",
        )
        .await
        .map(Self)
    }
}
