use axum::Json;
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};

use crate::domain::{Correction, FriendshipId, UserId};
use crate::infrastructure::observability::sanitize_for_log;
use crate::presentation::error::ApiError;
use crate::presentation::extractors::StudentUser;
use crate::presentation::state::AppState;

#[derive(Debug, Deserialize)]
pub struct FriendRequestQuery {
    pub receiver_id: UserId,
}

#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    pub receiver_id: UserId,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct GrammarCheckQuery {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct GrammarCheckResponse {
    pub original: String,
    pub corrected: String,
    pub has_errors: bool,
    pub corrections: Vec<Correction>,
}

pub async fn list_students_handler(
    State(state): State<AppState>,
    StudentUser(student): StudentUser,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.social.list_students(&student).await?))
}

pub async fn send_friend_request_handler(
    State(state): State<AppState>,
    StudentUser(student): StudentUser,
    Query(query): Query<FriendRequestQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let friendship = state
        .social
        .send_friend_request(&student, query.receiver_id)
        .await?;
    Ok(Json(friendship))
}

pub async fn pending_requests_handler(
    State(state): State<AppState>,
    StudentUser(student): StudentUser,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.social.pending_requests(&student).await?))
}

pub async fn accept_friend_request_handler(
    State(state): State<AppState>,
    StudentUser(student): StudentUser,
    Path(request_id): Path<FriendshipId>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(
        state
            .social
            .answer_friend_request(&student, request_id, true)
            .await?,
    ))
}

pub async fn reject_friend_request_handler(
    State(state): State<AppState>,
    StudentUser(student): StudentUser,
    Path(request_id): Path<FriendshipId>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(
        state
            .social
            .answer_friend_request(&student, request_id, false)
            .await?,
    ))
}

pub async fn friends_handler(
    State(state): State<AppState>,
    StudentUser(student): StudentUser,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.social.friends(&student).await?))
}

pub async fn send_message_handler(
    State(state): State<AppState>,
    StudentUser(student): StudentUser,
    Json(request): Json<MessageRequest>,
) -> Result<impl IntoResponse, ApiError> {
    tracing::debug!(
        sender_id = %student.id,
        receiver_id = %request.receiver_id,
        content = %sanitize_for_log(&request.content),
        "Sending message"
    );
    let message = state
        .social
        .send_message(&student, request.receiver_id, request.content)
        .await?;
    Ok(Json(message))
}

pub async fn conversations_handler(
    State(state): State<AppState>,
    StudentUser(student): StudentUser,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.social.conversations(&student).await?))
}

pub async fn conversation_handler(
    State(state): State<AppState>,
    StudentUser(student): StudentUser,
    Path(other_user_id): Path<UserId>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(
        state.social.conversation(&student, other_user_id).await?,
    ))
}

pub async fn grammar_check_handler(
    State(state): State<AppState>,
    StudentUser(_student): StudentUser,
    Query(query): Query<GrammarCheckQuery>,
) -> impl IntoResponse {
    tracing::debug!(text = %sanitize_for_log(&query.text), "Grammar check requested");
    let report = state.social.grammar_check(&query.text).await;
    Json(GrammarCheckResponse {
        original: report.original,
        corrected: report.corrected,
        has_errors: report.has_errors,
        corrections: report.corrections,
    })
}
