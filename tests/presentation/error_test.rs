use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use http_body_util::BodyExt;

use tbodemy::application::services::ServiceError;
use tbodemy::presentation::ApiError;

async fn body_of(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn given_internal_error_when_rendering_then_cause_is_hidden() {
    let response =
        ApiError(ServiceError::internal("connection refused on 10.0.0.3")).into_response();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_of(response).await["error"], "Internal server error");
}

#[tokio::test]
async fn given_invalid_state_when_rendering_then_conflict_with_message() {
    let response = ApiError(ServiceError::InvalidState(
        "Speaking session is not active".to_string(),
    ))
    .into_response();

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(
        body_of(response).await["error"],
        "Speaking session is not active"
    );
}

#[test]
fn given_unauthorized_when_rendering_then_bearer_challenge_is_sent() {
    let response = ApiError(ServiceError::Unauthorized("nope".to_string())).into_response();

    assert_eq!(
        response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
        "Bearer"
    );
}

#[test]
fn given_rate_limited_when_mapping_then_too_many_requests() {
    let err = ApiError(ServiceError::RateLimited("quota".to_string()));

    assert_eq!(err.status(), StatusCode::TOO_MANY_REQUESTS);
}
