use std::time::Duration;

use reqwest::{header, Client};

use crate::config::GatewayConfig;
use crate::connectors::{Connector, ConnectorError};
use crate::core::entities::{InferenceReply, InferenceRequest};

/// Talks to an Ollama-compatible `/api/chat` endpoint, one non-streaming call per request.
pub struct OllamaConnector {
    client: Client,
    url: String,
}

impl OllamaConnector {
    pub fn new(cfg: &GatewayConfig) -> anyhow::Result<Self> {
        let mut builder = Client::builder();
        if let Some(ms) = cfg.timeout_ms {
            builder = builder.timeout(Duration::from_millis(ms));
        }
        let client = builder.build()?;
        Ok(Self { client, url: cfg.backend_url.clone() })
    }
}

#[async_trait::async_trait]
impl Connector for OllamaConnector {
    fn name(&self) -> &'static str {
        "Ollama"
    }

    async fn chat(&self, req: InferenceRequest) -> Result<InferenceReply, ConnectorError> {
        let resp = self
            .client
            .post(&self.url)
            .header(header::CONTENT_TYPE, "application/json")
            .json(&req)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ConnectorError::Status { status: status.as_u16(), body });
        }

        let raw: serde_json::Value = resp.json().await?;
        Ok(InferenceReply { raw })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(format: Option<&str>) -> InferenceRequest {
        InferenceRequest {
            model: "functiongemma:latest".into(),
            messages: vec![json!({"role": "user", "content": "go back"})],
            stream: false,
            format: format.map(String::from),
        }
    }

    fn connector_for(url: String) -> OllamaConnector {
        let cfg = GatewayConfig { backend_url: url, ..GatewayConfig::default() };
        OllamaConnector::new(&cfg).unwrap()
    }

    #[tokio::test]
    async fn posts_payload_and_decodes_reply() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/chat")
            .match_body(mockito::Matcher::Json(json!({
                "model": "functiongemma:latest",
                "messages": [{"role": "user", "content": "go back"}],
                "stream": false,
                "format": "json"
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"message":{"role":"assistant","content":"ok"},"done":true}"#)
            .create_async()
            .await;

        let conn = connector_for(format!("{}/api/chat", server.url()));
        let reply = conn.chat(request(Some("json"))).await.unwrap();

        assert_eq!(reply.content(), Some("ok"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn non_success_status_is_reported() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/chat")
            .with_status(404)
            .with_body(r#"{"error":"model not found"}"#)
            .create_async()
            .await;

        let conn = connector_for(format!("{}/api/chat", server.url()));
        match conn.chat(request(None)).await {
            Err(ConnectorError::Status { status, body }) => {
                assert_eq!(status, 404);
                assert!(body.contains("model not found"));
            }
            other => panic!("expected status error, got {:?}", other.map(|r| r.raw)),
        }
    }

    #[tokio::test]
    async fn non_json_body_is_a_decode_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/chat")
            .with_status(200)
            .with_body("definitely not json")
            .create_async()
            .await;

        let conn = connector_for(format!("{}/api/chat", server.url()));
        let err = conn.chat(request(None)).await.unwrap_err();
        assert!(matches!(err, ConnectorError::Decode(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn refused_connection_is_unreachable() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let conn = connector_for(format!("http://127.0.0.1:{port}/api/chat"));
        let err = conn.chat(request(None)).await.unwrap_err();
        assert!(matches!(err, ConnectorError::Unreachable(_)), "got {err:?}");
    }
}
