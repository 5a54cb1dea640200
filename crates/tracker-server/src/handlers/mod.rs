//! HTTP handlers

pub mod exercises;
pub mod users;

use axum::{response::Html, Json};
use tracker_core::HealthResponse;

const INDEX_HTML: &str = include_str!("../../static/index.html");

/// Landing page with forms for the API
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}
