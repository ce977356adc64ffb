use axum::Json;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::services::ServiceError;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// HTTP face of a `ServiceError`.
#[derive(Debug)]
pub struct ApiError(pub ServiceError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            ServiceError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServiceError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ServiceError::Forbidden(_) => StatusCode::FORBIDDEN,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::InvalidState(_) => StatusCode::CONFLICT,
            ServiceError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
            ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self.0 {
            ServiceError::Internal(cause) => {
                tracing::error!(error = %cause, "Request failed");
                "Internal server error".to_string()
            }
            other => {
                tracing::debug!(status = status.as_u16(), error = %other, "Request rejected");
                other.to_string()
            }
        };

        let mut response = (status, Json(ErrorResponse { error: message })).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}
