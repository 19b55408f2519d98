use voice_nav_gateway::{app, config, observability, routing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    observability::init_tracing();

    let cfg_path = std::env::var("GATEWAY_CONFIG").unwrap_or_else(|_| "config/gateway.toml".into());
    let cfg = config::load_from_toml(&cfg_path).await?;
    let addr = cfg.listen_addr()?;
    tracing::info!("backend {} with model {}", cfg.backend_url, cfg.model);

    let state = routing::AppState::new(cfg)?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("voice-nav gateway listening on {addr}");
    axum::serve(listener, app(state)).await?;
    Ok(())
}
