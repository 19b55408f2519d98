use thiserror::Error;

pub mod ollama;

use crate::core::entities::{InferenceReply, InferenceRequest};

#[async_trait::async_trait]
pub trait Connector: Send + Sync {
    fn name(&self) -> &'static str;
    async fn chat(&self, req: InferenceRequest) -> Result<InferenceReply, ConnectorError>;
}

#[derive(Error, Debug)]
pub enum ConnectorError {
    #[error("backend unreachable: {0}")]
    Unreachable(String),
    #[error("backend returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("undecodable backend response: {0}")]
    Decode(String),
    #[error("transport error: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for ConnectorError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() {
            ConnectorError::Unreachable(e.to_string())
        } else if e.is_decode() {
            ConnectorError::Decode(e.to_string())
        } else {
            ConnectorError::Transport(e.to_string())
        }
    }
}
