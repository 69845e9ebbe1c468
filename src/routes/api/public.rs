use axum::{Router, routing::get};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::response::{ApiResult, JsonApiResponse};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
}

pub fn router() -> Router {
    Router::new().route("/health", get(health))
}

async fn health() -> ApiResult<HealthResponse> {
    JsonApiResponse::ok(HealthResponse {
        status: "ok",
        timestamp: Utc::now(),
    })
}
