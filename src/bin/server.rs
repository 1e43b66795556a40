//! RESQ HTTP Server Binary
//!
//! This is the main entry point for the RESQ REST API server.
//! It initializes the advisory client and node registry, sets up the HTTP
//! router, and starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! ADVISORY_API_KEY=... ADMIN_ACCESS_KEY=... \
//!   cargo run --bin resq-server --features "local-registry,http-server"
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `ADVISORY_API_KEY`: API key for the advisory endpoint (required)
//! - `ADVISORY_BASE_URL`: Advisory REST base URL (optional)
//! - `ADMIN_ACCESS_KEY`: Credential gating the admin node listing (required)
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use resq_rust::advisory::GeminiClient;
use resq_rust::config::{AdvisoryConfig, ServerConfig};
use resq_rust::http::{auth::AdminGuard, create_router, AppState};
use resq_rust::registry::LocalRegistry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting RESQ HTTP Server");

    let advisory_config = AdvisoryConfig::from_env().map_err(|e| anyhow::anyhow!(e))?;
    let server_config = ServerConfig::from_env().map_err(|e| anyhow::anyhow!(e))?;

    let advisory = Arc::new(GeminiClient::new(
        advisory_config.api_key,
        advisory_config.base_url,
        advisory_config.fast_model,
        advisory_config.reasoning_model,
    ));
    let registry = Arc::new(LocalRegistry::new());
    info!("Advisory client and registry initialized");

    // Create application state
    let state = AppState::new(
        advisory,
        registry,
        AdminGuard::new(&server_config.admin_access_key),
    );

    // Create router with all endpoints
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", server_config.host, server_config.port).parse()?;

    info!("Server listening on http://{}", addr);
    info!("API documentation: http://{}/health", addr);

    // Start the server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
