use anyhow::Context;
use axum::Json;
use serde::Serialize;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

mod adapters;
mod config;
mod models;
mod routes;

use adapters::ZaiClient;
use config::ServerConfig;
use quantum_search::{QueryGateway, SearchGateway};

const DEFAULT_LOG_FILTER: &str = "quantum_search=info,quantum_search_server=info,tower_http=info";

/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<dyn SearchGateway>,
}

#[derive(Serialize)]
struct HealthCheck {
    status: String,
    message: String,
    version: String,
}

async fn health_check() -> Json<HealthCheck> {
    Json(HealthCheck {
        status: "ok".to_string(),
        message: "Quantum Search API is running".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    tracing::info!("⚛️  Quantum Search API initializing...");

    let config = ServerConfig::from_env().context("Invalid server configuration")?;

    let provider = Arc::new(
        ZaiClient::new(&config.provider).context("Failed to build provider client")?,
    );
    tracing::info!(
        "🔌 Provider client ready: {} (model: {})",
        config.provider.base_url,
        config.provider.model.as_deref().unwrap_or("provider default")
    );

    let gateway = QueryGateway::new(provider.clone(), provider)
        .with_result_count(config.result_count);

    let state = AppState {
        gateway: Arc::new(gateway),
    };

    let router = routes::app(state);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.addr))?;

    tracing::info!("📚 Swagger UI: /swagger-ui");
    tracing::info!("✅ Quantum Search API ready on http://{}", config.addr);

    axum::serve(listener, router).await?;

    Ok(())
}
