use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;
use chrono::Utc;

use crate::presentation::extractors::AuthUser;
use crate::presentation::state::AppState;

pub async fn daily_lesson_handler(
    State(state): State<AppState>,
    AuthUser(_user): AuthUser,
) -> impl IntoResponse {
    let today = Utc::now().date_naive();
    Json(state.lessons.daily_lesson(today).await)
}

pub async fn daily_lessons_handler(
    State(state): State<AppState>,
    AuthUser(_user): AuthUser,
) -> impl IntoResponse {
    Json(state.lessons.all().to_vec())
}
