use crate::models::responses::HealthResponse;
use crate::SharedState;
use axum::{extract::State, response::Json};
use chrono::Utc;

pub async fn health_check(State(state): State<SharedState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        service: "catalog-service".to_string(),
        status: "running".to_string(),
        upstream: state.config.upstream_url.clone(),
        checked_at: Utc::now().to_rfc3339(),
    })
}
