//! # Environment Variable Loader
//!
//! Loads configuration from environment variables following 12-factor app
//! principles.
//!
//! # Naming Convention
//! - `SV_*`: HTTP server settings
//! - `GR_*`: Graph query settings
//! - `OB_*`: Observability settings

use crate::config::{
    Config, GraphConfig, ObservabilityConfig, ServerConfig, default_logging_level,
    default_metrics_enabled, default_reference_actor_id, default_server_host, default_server_port,
    default_top_actors_limit,
};
use crate::error::ConfigError;
use std::env;

/// Load configuration from environment variables.
///
/// Unset variables fall back to defaults. A variable that is set but cannot
/// be parsed is an error rather than being silently ignored.
///
/// ## Usage
/// ```rust,no_run
/// use config::load_from_env;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = load_from_env()?;
///     println!("Reference actor: {}", config.graph.reference_actor_id);
///     Ok(())
/// }
/// ```
///
/// ## Environment Variables
/// ### Server Settings (`SV_*`)
/// - `SV_HOST`: Bind address (default: "0.0.0.0")
/// - `SV_PORT`: Bind port (default: 8080)
///
/// ### Graph Settings (`GR_*`)
/// - `GR_REFERENCE_ACTOR_ID`: Reference actor id (default: "nm0000102")
/// - `GR_TOP_ACTORS_LIMIT`: Length of the actor ranking (default: 10)
///
/// ### Observability Settings (`OB_*`)
/// - `OB_METRICS_ENABLED`: Enable metrics (true/false, default: true)
/// - `OB_LOGGING_LEVEL`: Logging level (trace/debug/info/warn/error, default:
///   "info")
pub fn load_from_env() -> Result<Config, ConfigError> {
    Ok(Config {
        server: load_server_from_env()?,
        graph: load_graph_from_env()?,
        observability: load_observability_from_env()?,
    })
}

fn load_server_from_env() -> Result<ServerConfig, ConfigError> {
    Ok(ServerConfig {
        host: env::var("SV_HOST").unwrap_or_else(|_| default_server_host()),
        port: parse_env_or("SV_PORT", default_server_port())?,
    })
}

fn load_graph_from_env() -> Result<GraphConfig, ConfigError> {
    Ok(GraphConfig {
        reference_actor_id: env::var("GR_REFERENCE_ACTOR_ID")
            .unwrap_or_else(|_| default_reference_actor_id()),
        top_actors_limit: parse_env_or("GR_TOP_ACTORS_LIMIT", default_top_actors_limit())?,
    })
}

fn load_observability_from_env() -> Result<ObservabilityConfig, ConfigError> {
    Ok(ObservabilityConfig {
        metrics_enabled: parse_env_or("OB_METRICS_ENABLED", default_metrics_enabled())?,
        logging_level: env::var("OB_LOGGING_LEVEL").unwrap_or_else(|_| default_logging_level()),
    })
}

fn parse_env<T>(key: &str) -> Option<Result<T, ConfigError>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw = env::var(key).ok()?;
    Some(raw.trim().parse::<T>().map_err(|e| ConfigError::Env {
        key: key.to_string(),
        reason: format!("{raw:?}: {e}"),
    }))
}

fn parse_env_or<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    parse_env(key).unwrap_or(Ok(default))
}
