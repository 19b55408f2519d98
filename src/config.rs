use std::net::SocketAddr;

use serde::{Deserialize, Serialize};

/// Process-wide settings, read once at startup.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct GatewayConfig {
    /// Full URL of the backend chat endpoint
    #[serde(default = "default_backend_url")]
    pub backend_url: String,

    /// Model name sent with every inference request
    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Transport timeout for backend calls; unset means the client default (none)
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

fn default_backend_url() -> String {
    "http://localhost:11434/api/chat".to_string()
}

fn default_model() -> String {
    "functiongemma:latest".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
            model: default_model(),
            host: default_host(),
            port: default_port(),
            timeout_ms: None,
        }
    }
}

impl GatewayConfig {
    /// Applies `OLLAMA_URL`, `MODEL_NAME`, `HOST`, `PORT` and `BACKEND_TIMEOUT_MS` on top of `self`.
    pub fn with_overrides<F>(mut self, lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("OLLAMA_URL") {
            self.backend_url = v;
        }
        if let Some(v) = lookup("MODEL_NAME") {
            self.model = v;
        }
        if let Some(v) = lookup("HOST") {
            self.host = v;
        }
        if let Some(v) = lookup("PORT") {
            self.port = v
                .parse()
                .map_err(|e| anyhow::anyhow!("invalid PORT '{}': {}", v, e))?;
        }
        if let Some(v) = lookup("BACKEND_TIMEOUT_MS") {
            let ms = v
                .parse()
                .map_err(|e| anyhow::anyhow!("invalid BACKEND_TIMEOUT_MS '{}': {}", v, e))?;
            self.timeout_ms = Some(ms);
        }
        Ok(self)
    }

    pub fn listen_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr = format!("{}:{}", self.host, self.port).parse()?;
        Ok(addr)
    }

    /// Port the backend listens on, used in operator-facing error messages.
    pub fn backend_port(&self) -> Option<u16> {
        reqwest::Url::parse(&self.backend_url)
            .ok()
            .and_then(|u| u.port_or_known_default())
    }
}

/// Reads `path` as TOML; a missing file yields the defaults. Environment overrides are applied last.
pub async fn load_from_toml(path: &str) -> anyhow::Result<GatewayConfig> {
    let base = match tokio::fs::read_to_string(path).await {
        Ok(text) => toml::from_str(&text)?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::info!("config file {} not found, using defaults", path);
            GatewayConfig::default()
        }
        Err(e) => return Err(e.into()),
    };
    base.with_overrides(|k| std::env::var(k).ok())
}
