use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use crate::api::command_adapter::{self, EMPTY_REPLY};
use crate::api::error::ApiError;
use crate::connectors::ConnectorError;
use crate::core::entities::FunctionCall;
use crate::metrics;
use crate::routing::AppState;

#[derive(Deserialize)]
pub struct CommandRequest {
    pub command: String,
}

pub async fn parse_command(State(app): State<AppState>, Json(req): Json<CommandRequest>) -> Response {
    match interpret(&app, &req.command).await {
        Ok(call) => {
            metrics::record_request("parse-command", 200);
            Json(call).into_response()
        }
        Err(err) => {
            tracing::error!("parse-command failed: {}", err);
            metrics::record_request("parse-command", err.status().as_u16());
            err.into_response()
        }
    }
}

async fn interpret(app: &AppState, command: &str) -> Result<FunctionCall, ApiError> {
    tracing::info!("parsing command: {}", command);
    let messages = command_adapter::to_conversation(command);

    let raw = match app.infer("parse-command", messages, Some("json")).await {
        Ok(reply) => reply.content().unwrap_or(EMPTY_REPLY).to_string(),
        // A body that isn't JSON is bad model output, same as bad content.
        Err(ConnectorError::Decode(e)) => {
            tracing::warn!("backend reply undecodable: {}", e);
            return Ok(fall_back(command));
        }
        Err(e) => {
            let unavailable = format!("{} is not running", app.backend_name());
            return Err(ApiError::from_backend(e, unavailable));
        }
    };

    match command_adapter::decode_function_call(&raw) {
        Ok(call) => {
            tracing::info!("parsed function: {} with params: {:?}", call.name, call.parameters);
            Ok(call)
        }
        Err(e) => {
            tracing::warn!("parse error: {}, raw: {}", e, raw);
            Ok(fall_back(command))
        }
    }
}

fn fall_back(command: &str) -> FunctionCall {
    metrics::PARSE_FALLBACKS.inc();
    command_adapter::fallback(command)
}
