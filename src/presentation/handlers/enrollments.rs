use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Deserialize;

use crate::domain::CourseId;
use crate::presentation::error::ApiError;
use crate::presentation::extractors::StudentUser;
use crate::presentation::state::AppState;

#[derive(Debug, Deserialize)]
pub struct EnrollmentRequest {
    pub course_id: CourseId,
}

#[tracing::instrument(skip_all, fields(student_id = %student.id, course_id = %request.course_id))]
pub async fn enroll_handler(
    State(state): State<AppState>,
    StudentUser(student): StudentUser,
    Json(request): Json<EnrollmentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let enrollment = state
        .enrollments
        .enroll(&student, request.course_id)
        .await?;
    Ok((StatusCode::CREATED, Json(enrollment)))
}

pub async fn my_enrollments_handler(
    State(state): State<AppState>,
    StudentUser(student): StudentUser,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.enrollments.my_enrollments(&student).await?))
}
