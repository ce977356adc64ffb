use axum::Json;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::services::{ServiceError, SessionRequest};
use crate::domain::SpeakingSessionId;
use crate::presentation::error::ApiError;
use crate::presentation::extractors::StudentUser;
use crate::presentation::state::AppState;

const AUDIO_FIELD: &str = "audio";

#[tracing::instrument(skip_all, fields(student_id = %student.id))]
pub async fn create_session_handler(
    State(state): State<AppState>,
    StudentUser(student): StudentUser,
    Json(request): Json<SessionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let session = state.speaking.create_session(&student, request).await?;
    Ok((StatusCode::CREATED, Json(session)))
}

pub async fn list_sessions_handler(
    State(state): State<AppState>,
    StudentUser(student): StudentUser,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.speaking.list_sessions(&student).await?))
}

pub async fn get_session_handler(
    State(state): State<AppState>,
    StudentUser(student): StudentUser,
    Path(session_id): Path<SpeakingSessionId>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.speaking.get_session(&student, session_id).await?))
}

pub async fn end_session_handler(
    State(state): State<AppState>,
    StudentUser(student): StudentUser,
    Path(session_id): Path<SpeakingSessionId>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.speaking.end_session(&student, session_id).await?))
}

/// Accepts one recorded utterance as the multipart field `audio`.
#[tracing::instrument(skip(state, student, multipart), fields(student_id = %student.id))]
pub async fn submit_turn_handler(
    State(state): State<AppState>,
    StudentUser(student): StudentUser,
    Path(session_id): Path<SpeakingSessionId>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let malformed = |e: axum::extract::multipart::MultipartError| {
        tracing::warn!(error = %e, "Failed to read multipart");
        ApiError(ServiceError::bad_request(format!(
            "Failed to read multipart: {}",
            e
        )))
    };

    while let Some(field) = multipart.next_field().await.map_err(malformed)? {
        if field.name() != Some(AUDIO_FIELD) {
            continue;
        }
        let file_name = field.file_name().map(str::to_string);
        let data = field.bytes().await.map_err(malformed)?;
        tracing::debug!(bytes = data.len(), file_name = ?file_name, "Audio received");

        let exchange = state
            .speaking
            .submit_turn(&student, session_id, &data, file_name.as_deref())
            .await?;
        return Ok(Json(exchange));
    }

    Err(ApiError(ServiceError::bad_request("Audio file is required")))
}
