//! Process entry point: loads configuration, constructs the Upstream
//! Client, and serves the Ollama-compatible HTTP surface (spec §4.1, §6).
//! Everything outside this file is either pure translation or I/O behind
//! the `UpstreamClient` trait; this is the only place those pieces get
//! wired together. Grounded on `gglib-proxy::server::serve`'s route
//! layout, with the teacher's `tracing_subscriber`/`dotenvy` startup
//! sequence.

use std::sync::Arc;

use tracing::info;

use gateway_config::Config;
use gateway_server::state::AppState;
use gateway_server::build_router;
use gateway_upstream::{OpenAiUpstreamClient, UpstreamClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_level.as_filter_directive().parse().unwrap()),
        )
        .compact()
        .init();

    let upstream: Arc<dyn UpstreamClient> = Arc::new(OpenAiUpstreamClient::new(&config)?);
    let port = config.port;
    let state = Arc::new(AppState {
        config: Arc::new(config),
        upstream,
    });

    let app = build_router(state);

    let addr = format!("0.0.0.0:{port}");
    info!("Ollama-compatible gateway listening on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
