use std::sync::Arc;
use std::time::Instant;

use crate::config::GatewayConfig;
use crate::connectors::{self, Connector, ConnectorError};
use crate::core::entities::{InferenceReply, InferenceRequest};
use crate::metrics;

#[derive(Clone)]
pub struct AppState {
    config: Arc<GatewayConfig>,
    backend: Arc<dyn Connector>,
}

impl AppState {
    pub fn new(config: GatewayConfig) -> anyhow::Result<Self> {
        let backend = Arc::new(connectors::ollama::OllamaConnector::new(&config)?);
        Ok(Self::with_backend(config, backend))
    }

    pub fn with_backend(config: GatewayConfig, backend: Arc<dyn Connector>) -> Self {
        Self { config: Arc::new(config), backend }
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// One non-streaming call to the backend with the configured model.
    pub async fn infer(
        &self,
        endpoint: &str,
        messages: Vec<serde_json::Value>,
        format: Option<&str>,
    ) -> Result<InferenceReply, ConnectorError> {
        let req = InferenceRequest {
            model: self.config.model.clone(),
            messages,
            stream: false,
            format: format.map(String::from),
        };
        tracing::info!(
            "sending {} request to {} ({})",
            endpoint,
            self.backend.name(),
            self.config.model
        );
        let started = Instant::now();
        let res = self.backend.chat(req).await;
        metrics::BACKEND_DURATION
            .with_label_values(&[endpoint])
            .observe(started.elapsed().as_secs_f64());
        res
    }
}
