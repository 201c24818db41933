//! Server setup and lifecycle for the SixDegrees service.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use config::Config;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tokio::net::TcpListener;
use tokio::signal;
use tracing_subscriber::EnvFilter;

use crate::error::{ApiError, Result};
use crate::routes::create_router;
use crate::state::AppState;

const METRICS_UPKEEP_INTERVAL: Duration = Duration::from_secs(5);

/// The SixDegrees HTTP server.
pub struct SixDegreesServer {
    state: Arc<AppState>,
}

impl SixDegreesServer {
    /// Creates a new server instance over an empty store.
    pub fn new(config: Config) -> Result<Self> {
        Ok(Self::with_state(Arc::new(AppState::new(config)?)))
    }

    /// Creates a server instance from an existing `AppState`.
    pub fn with_state(state: Arc<AppState>) -> Self {
        Self { state }
    }

    /// Runs the HTTP server.
    ///
    /// This method blocks until the server is shut down (e.g., via Ctrl+C).
    pub async fn run(self) -> Result<()> {
        let server = &self.state.config.server;
        let addr: SocketAddr = format!("{}:{}", server.host, server.port)
            .parse()
            .map_err(|e| ApiError::Configuration(format!("Invalid address: {e}")))?;

        let router = create_router(self.state.clone());

        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| ApiError::Server(format!("Failed to bind to {addr}: {e}")))?;

        tracing::info!(
            %addr,
            reference = %self.state.engine.reference(),
            "SixDegrees server starting"
        );

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| ApiError::Server(format!("Server error: {e}")))?;

        tracing::info!("SixDegrees server stopped");
        Ok(())
    }

    /// Returns a reference to the application state.
    #[must_use]
    pub fn state(&self) -> &Arc<AppState> {
        &self.state
    }
}

/// Signal handler for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        },
        () = terminate => {
            tracing::info!("Received terminate signal, initiating graceful shutdown");
        },
    }
}

/// Initializes the global tracing subscriber.
///
/// `RUST_LOG` takes precedence; otherwise `default_level` applies.
pub fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    if tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .is_err()
    {
        tracing::debug!("Tracing subscriber already initialized");
    }
}

/// Installs the global Prometheus recorder and schedules its upkeep.
pub fn install_metrics() -> Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| ApiError::Configuration(format!("Failed to install metrics recorder: {e}")))?;

    let upkeep = handle.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(METRICS_UPKEEP_INTERVAL);
        loop {
            interval.tick().await;
            upkeep.run_upkeep();
        }
    });

    Ok(handle)
}

/// Entry point for running the server from an assembled configuration.
pub async fn run_server(config: Config) -> Result<()> {
    let mut state = AppState::new(config)?;
    if state.config.observability.metrics_enabled {
        state = state.with_metrics(install_metrics()?);
        tracing::info!("Prometheus metrics enabled at /metrics");
    }

    SixDegreesServer::with_state(Arc::new(state)).run().await
}

/// Entry point for running the server from the environment.
///
/// Loads configuration (defaults, `SD_CONFIG_FILE`, environment variables),
/// then initializes tracing and serves until shutdown.
pub async fn run_from_env() -> Result<()> {
    let config = config::load()?;
    init_tracing(&config.observability.logging_level);
    run_server(config).await
}
