use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::metrics;
use crate::routing::AppState;

#[derive(Deserialize)]
pub struct ChatRequest {
    /// Forwarded to the backend as-is
    pub messages: Vec<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub intent: &'static str,
    pub message: String,
    pub data: serde_json::Map<String, serde_json::Value>,
}

impl ChatReply {
    pub fn new(message: impl Into<String>) -> Self {
        Self { intent: "chat", message: message.into(), data: serde_json::Map::new() }
    }
}

pub async fn chat(State(app): State<AppState>, Json(req): Json<ChatRequest>) -> Response {
    match relay(&app, req).await {
        Ok(reply) => {
            metrics::record_request("chat", 200);
            Json(reply).into_response()
        }
        Err(err) => {
            tracing::error!("chat relay failed: {}", err);
            metrics::record_request("chat", err.status().as_u16());
            err.into_response()
        }
    }
}

async fn relay(app: &AppState, req: ChatRequest) -> Result<ChatReply, ApiError> {
    let reply = app.infer("chat", req.messages, None).await.map_err(|e| {
        tracing::error!("backend error: {}", e);
        let port = app
            .config()
            .backend_port()
            .map(|p| p.to_string())
            .unwrap_or_else(|| "?".into());
        ApiError::from_backend(e, format!("{} is not running on port {}.", app.backend_name(), port))
    })?;
    Ok(ChatReply::new(reply.content().unwrap_or_default()))
}
