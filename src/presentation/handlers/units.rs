use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::services::{AudioSentenceInput, QuizInput, UnitInput};
use crate::domain::{AudioSentenceChanges, AudioSentenceId, QuizChanges, QuizId, UnitChanges, UnitId};
use crate::presentation::error::ApiError;
use crate::presentation::extractors::TeacherUser;
use crate::presentation::state::AppState;

pub async fn create_unit_handler(
    State(state): State<AppState>,
    TeacherUser(teacher): TeacherUser,
    Json(input): Json<UnitInput>,
) -> Result<impl IntoResponse, ApiError> {
    let unit = state.courses.create_unit(&teacher, input).await?;
    Ok((StatusCode::CREATED, Json(unit)))
}

pub async fn get_unit_handler(
    State(state): State<AppState>,
    Path(unit_id): Path<UnitId>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.courses.unit_with_details(unit_id).await?))
}

pub async fn update_unit_handler(
    State(state): State<AppState>,
    TeacherUser(teacher): TeacherUser,
    Path(unit_id): Path<UnitId>,
    Json(changes): Json<UnitChanges>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(
        state.courses.update_unit(&teacher, unit_id, changes).await?,
    ))
}

pub async fn delete_unit_handler(
    State(state): State<AppState>,
    TeacherUser(teacher): TeacherUser,
    Path(unit_id): Path<UnitId>,
) -> Result<StatusCode, ApiError> {
    state.courses.delete_unit(&teacher, unit_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn create_quiz_handler(
    State(state): State<AppState>,
    TeacherUser(teacher): TeacherUser,
    Json(input): Json<QuizInput>,
) -> Result<impl IntoResponse, ApiError> {
    let quiz = state.courses.create_quiz(&teacher, input).await?;
    Ok((StatusCode::CREATED, Json(quiz)))
}

pub async fn unit_quizzes_handler(
    State(state): State<AppState>,
    Path(unit_id): Path<UnitId>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.courses.unit_quizzes(unit_id).await?))
}

pub async fn update_quiz_handler(
    State(state): State<AppState>,
    TeacherUser(teacher): TeacherUser,
    Path(quiz_id): Path<QuizId>,
    Json(changes): Json<QuizChanges>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(
        state.courses.update_quiz(&teacher, quiz_id, changes).await?,
    ))
}

pub async fn delete_quiz_handler(
    State(state): State<AppState>,
    TeacherUser(teacher): TeacherUser,
    Path(quiz_id): Path<QuizId>,
) -> Result<StatusCode, ApiError> {
    state.courses.delete_quiz(&teacher, quiz_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Synthesizes the sentence audio before responding.
#[tracing::instrument(skip_all, fields(teacher_id = %teacher.id, unit_id = %input.unit_id))]
pub async fn create_audio_sentence_handler(
    State(state): State<AppState>,
    TeacherUser(teacher): TeacherUser,
    Json(input): Json<AudioSentenceInput>,
) -> Result<impl IntoResponse, ApiError> {
    let audio = state.courses.create_audio_sentence(&teacher, input).await?;
    Ok((StatusCode::CREATED, Json(audio)))
}

pub async fn unit_audio_sentences_handler(
    State(state): State<AppState>,
    Path(unit_id): Path<UnitId>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.courses.unit_audio_sentences(unit_id).await?))
}

pub async fn update_audio_sentence_handler(
    State(state): State<AppState>,
    TeacherUser(teacher): TeacherUser,
    Path(audio_id): Path<AudioSentenceId>,
    Json(changes): Json<AudioSentenceChanges>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(
        state
            .courses
            .update_audio_sentence(&teacher, audio_id, changes)
            .await?,
    ))
}

pub async fn delete_audio_sentence_handler(
    State(state): State<AppState>,
    TeacherUser(teacher): TeacherUser,
    Path(audio_id): Path<AudioSentenceId>,
) -> Result<StatusCode, ApiError> {
    state
        .courses
        .delete_audio_sentence(&teacher, audio_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
