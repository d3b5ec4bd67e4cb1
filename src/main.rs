// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use crate::application::assistant_service::AssistantService;
use crate::application::dashboard_service::DashboardService;
use crate::application::dashboard_store::DashboardStore;
use crate::application::transform::TransformOptions;
use crate::infrastructure::config::load_settings;
use crate::infrastructure::http_repository::HttpEnergyRepository;
use crate::presentation::app_state::AppState;
use crate::presentation::routes::router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let settings = load_settings()?;

    // Initialize tracing; RUST_LOG wins over the configured filter
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.logging.filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Create repository (infrastructure layer)
    let repository = Arc::new(HttpEnergyRepository::from_settings(&settings.backend)?);

    // Create services (application layer)
    let dashboard_service = DashboardService::new(
        repository.clone(),
        settings.backend.user_id.clone(),
        TransformOptions {
            currency_symbol: settings.dashboard.currency_symbol.clone(),
        },
        settings.dashboard.schema_mismatch,
    );
    let assistant = AssistantService::new(repository);

    // Create application state
    let state = Arc::new(AppState {
        store: DashboardStore::new(dashboard_service),
        assistant,
        page_size: settings.dashboard.page_size,
    });

    // Initial load, the equivalent of the dashboard mounting
    let initial = state.clone();
    tokio::spawn(async move {
        initial.store.refresh().await;
    });

    // Start server
    let addr: SocketAddr = settings
        .server
        .bind_addr
        .parse()
        .with_context(|| format!("Invalid bind address {}", settings.server.bind_addr))?;
    tracing::info!(
        "Starting energy-dashboard on {} (backend {})",
        addr,
        settings.backend.base_url
    );

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router(state)).await?;

    Ok(())
}
