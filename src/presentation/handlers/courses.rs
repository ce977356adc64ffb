use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Deserialize;

use crate::application::services::{CompleteCourse, CourseInput};
use crate::domain::{CourseChanges, CourseId};
use crate::presentation::error::ApiError;
use crate::presentation::extractors::TeacherUser;
use crate::presentation::state::AppState;

#[derive(Debug, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    100
}

#[tracing::instrument(skip_all, fields(teacher_id = %teacher.id))]
pub async fn create_course_handler(
    State(state): State<AppState>,
    TeacherUser(teacher): TeacherUser,
    Json(input): Json<CourseInput>,
) -> Result<impl IntoResponse, ApiError> {
    let course = state.courses.create_course(&teacher, input).await?;
    Ok((StatusCode::CREATED, Json(course)))
}

pub async fn list_courses_handler(
    State(state): State<AppState>,
    Query(page): Query<Pagination>,
) -> Result<impl IntoResponse, ApiError> {
    let courses = state.courses.list_courses(page.skip, page.limit).await?;
    Ok(Json(courses))
}

#[tracing::instrument(skip_all, fields(teacher_id = %teacher.id, units = outline.unidades.len()))]
pub async fn create_complete_course_handler(
    State(state): State<AppState>,
    TeacherUser(teacher): TeacherUser,
    Json(outline): Json<CompleteCourse>,
) -> Result<impl IntoResponse, ApiError> {
    let course = state.courses.create_complete_course(&teacher, outline).await?;
    Ok((StatusCode::CREATED, Json(course)))
}

pub async fn get_course_handler(
    State(state): State<AppState>,
    Path(course_id): Path<CourseId>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.courses.course_details(course_id).await?))
}

pub async fn update_course_handler(
    State(state): State<AppState>,
    TeacherUser(teacher): TeacherUser,
    Path(course_id): Path<CourseId>,
    Json(changes): Json<CourseChanges>,
) -> Result<impl IntoResponse, ApiError> {
    let course = state
        .courses
        .update_course(&teacher, course_id, changes)
        .await?;
    Ok(Json(course))
}

pub async fn delete_course_handler(
    State(state): State<AppState>,
    TeacherUser(teacher): TeacherUser,
    Path(course_id): Path<CourseId>,
) -> Result<StatusCode, ApiError> {
    state.courses.delete_course(&teacher, course_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn my_courses_handler(
    State(state): State<AppState>,
    TeacherUser(teacher): TeacherUser,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.courses.teacher_courses(&teacher).await?))
}

pub async fn course_units_handler(
    State(state): State<AppState>,
    Path(course_id): Path<CourseId>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.courses.course_units(course_id).await?))
}

pub async fn course_students_handler(
    State(state): State<AppState>,
    TeacherUser(teacher): TeacherUser,
    Path(course_id): Path<CourseId>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(
        state.courses.course_students(&teacher, course_id).await?,
    ))
}
