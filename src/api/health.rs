use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::routing::AppState;

#[derive(Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub model: String,
}

pub async fn health_check(State(app): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus { status: "online", model: app.config().model.clone() })
}
