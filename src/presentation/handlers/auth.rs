use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Form, Json};
use serde::Deserialize;

use crate::application::services::Registration;
use crate::presentation::error::ApiError;
use crate::presentation::extractors::AuthUser;
use crate::presentation::state::AppState;

/// OAuth2 password-grant form; `username` carries the email.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[tracing::instrument(skip(state, registration), fields(role = %registration.role))]
pub async fn register_handler(
    State(state): State<AppState>,
    Json(registration): Json<Registration>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state.auth.register(registration).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

#[tracing::instrument(skip(state, form))]
pub async fn token_handler(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<impl IntoResponse, ApiError> {
    let grant = state.auth.login(&form.username, &form.password).await?;
    Ok(Json(grant))
}

pub async fn me_handler(AuthUser(user): AuthUser) -> impl IntoResponse {
    Json(user)
}
