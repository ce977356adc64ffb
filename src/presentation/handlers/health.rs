use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Serialize)]
pub struct BannerResponse {
    pub message: String,
    pub version: String,
}

pub async fn health_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
        }),
    )
}

pub async fn root_handler() -> impl IntoResponse {
    Json(BannerResponse {
        message: "Tbodemy API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
