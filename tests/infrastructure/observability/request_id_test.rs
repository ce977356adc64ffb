use axum::body::Body;
use axum::http::{HeaderValue, Request, StatusCode};
use axum::routing::get;
use axum::{Extension, Router, middleware};
use tower::ServiceExt;

use tbodemy::infrastructure::observability::{REQUEST_ID_HEADER, RequestId, request_id_middleware};

fn echo_router() -> Router {
    Router::new()
        .route(
            "/",
            get(|Extension(id): Extension<RequestId>| async move { id.as_str().to_string() }),
        )
        .route(
            "/boom",
            get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        )
        .layer(middleware::from_fn(request_id_middleware))
}

#[test]
fn given_printable_id_when_parsing_header_then_it_is_kept() {
    let header = HeaderValue::from_static("req-42_abc");

    assert_eq!(RequestId::from_header(Some(&header)).as_str(), "req-42_abc");
}

#[test]
fn given_oversized_or_spaced_id_when_parsing_header_then_fresh_uuid_is_minted() {
    let oversized = HeaderValue::from_str(&"a".repeat(129)).unwrap();
    let spaced = HeaderValue::from_static("two words");

    for header in [&oversized, &spaced] {
        let id = RequestId::from_header(Some(header));
        assert!(uuid::Uuid::parse_str(id.as_str()).is_ok());
    }
    assert!(uuid::Uuid::parse_str(RequestId::from_header(None).as_str()).is_ok());
}

#[tokio::test]
async fn given_caller_id_when_serving_then_handler_sees_it_and_response_echoes_it() {
    let response = echo_router()
        .oneshot(
            Request::builder()
                .uri("/")
                .header(REQUEST_ID_HEADER, "trace-7")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.headers()[REQUEST_ID_HEADER], "trace-7");
    let body = http_body_util::BodyExt::collect(response.into_body())
        .await
        .unwrap()
        .to_bytes();
    assert_eq!(&body[..], b"trace-7");
}

#[tokio::test]
async fn given_failing_handler_when_serving_then_id_is_still_echoed() {
    let response = echo_router()
        .oneshot(Request::builder().uri("/boom").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let echoed = response.headers()[REQUEST_ID_HEADER].to_str().unwrap();
    assert!(uuid::Uuid::parse_str(echoed).is_ok());
}
