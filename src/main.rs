// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Fixed-Window Guard Service
//!
//! Serves the demo endpoints behind per-client fixed-window rate limits.
//!
//! ## Configuration
//!
//! Configuration is loaded from an optional JSON file named by `CONFIG_FILE`,
//! then overridden by environment variables:
//!
//! - `BIND_ADDR`: Server bind address (default: 0.0.0.0:8080)
//! - `RATE_WINDOW_MS`: Window length for every limiter (default: 60000)
//! - `SECURE_MAX_REQUESTS`: Secure endpoint limit per window (default: 100)
//! - `SENSITIVE_MAX_REQUESTS`: Sensitive endpoint limit per window (default: 50)
//! - `SWEEP_ENABLED`, `SWEEP_INTERVAL_SECS`, `SWEEP_GRACE_MS`: stale record eviction
//! - `API_KEY`: Demo API key (default: secret123)
//! - `RETRY_AFTER_HINT`: Send `Retry-After` on 429 (default: false)
//! - `METRICS_ENABLED`: Expose `/metrics` (default: true)
//!
//! Limits are per process. Running several replicas gives each its own
//! independent counters.

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use fixed_window_guard::{
    clock::MonotonicClock,
    config::Config,
    handlers::{router, AppState},
    sweeper,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().json())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let config = Config::load()?;
    config.validate()?;
    info!(
        bind_addr = %config.bind_addr,
        secure_max = config.limits.secure_endpoint.max_requests,
        sensitive_max = config.limits.sensitive.max_requests,
        window_ms = config.limits.secure_endpoint.window_ms,
        sweep_enabled = config.sweep.enabled,
        "Starting fixed-window guard"
    );

    let addr: SocketAddr = config.bind_addr.parse()?;
    let sweep_enabled = config.sweep.enabled;
    let state = AppState::new(config, Arc::new(MonotonicClock::new()))
        .map_err(|e| anyhow::anyhow!("failed to build metrics registry: {e}"))?;
    let state = Arc::new(state);

    if sweep_enabled {
        sweeper::spawn(state.clone());
    }

    let app = router(state);

    let listener = TcpListener::bind(addr).await?;
    info!(addr = %addr, "Server listening");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
