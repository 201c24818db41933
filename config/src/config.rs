//! # Configuration Structures
//!
//! This module defines the configuration structures for the SixDegrees
//! service.
//!
//! All configuration structures:
//! - Use `serde` for serialization/deserialization, with a default for every
//!   field so partial files are accepted
//! - Use `validator` for input validation

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Main configuration structure for the SixDegrees service.
///
/// ## Usage
/// ```rust,no_run
/// use config::Config;
///
/// let config = Config::default();
/// println!("Listening on {}:{}", config.server.host, config.server.port);
/// ```
///
/// ## Fields
/// - `server`: HTTP listener settings
/// - `graph`: Reference actor and ranking settings
/// - `observability`: Metrics and logging
#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default, PartialEq)]
pub struct Config {
    /// HTTP listener configuration
    #[serde(default)]
    #[validate(nested)]
    pub server: ServerConfig,

    /// Graph query configuration
    #[serde(default)]
    #[validate(nested)]
    pub graph: GraphConfig,

    /// Observability configuration (metrics, logging)
    #[serde(default)]
    #[validate(nested)]
    pub observability: ObservabilityConfig,
}

/// HTTP listener configuration.
///
/// ## Fields
/// - `host`: Bind address (default: "0.0.0.0")
/// - `port`: Bind port (default: 8080)
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    #[validate(length(min = 1, max = 255))]
    pub host: String,

    #[serde(default = "default_server_port")]
    #[validate(range(min = 1, max = 65535))]
    pub port: u16,
}

pub(crate) fn default_server_host() -> String {
    "0.0.0.0".to_string()
}

pub(crate) fn default_server_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
        }
    }
}

/// Graph query configuration.
///
/// ## Fields
/// - `reference_actor_id`: Actor every Bacon number is measured against
///   (default: "nm0000102", Kevin Bacon)
/// - `top_actors_limit`: Length of the out-degree ranking (default: 10)
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct GraphConfig {
    #[serde(default = "default_reference_actor_id")]
    #[validate(length(min = 1, max = 255))]
    pub reference_actor_id: String,

    #[serde(default = "default_top_actors_limit")]
    #[validate(range(min = 1, max = 1000))]
    pub top_actors_limit: usize,
}

pub(crate) fn default_reference_actor_id() -> String {
    sd_core::DEFAULT_REFERENCE_ACTOR_ID.to_string()
}

pub(crate) fn default_top_actors_limit() -> usize {
    10
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            reference_actor_id: default_reference_actor_id(),
            top_actors_limit: default_top_actors_limit(),
        }
    }
}

/// Observability configuration.
///
/// ## Fields
/// - `metrics_enabled`: Install the Prometheus recorder (default: true)
/// - `logging_level`: Default tracing level (default: "info")
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct ObservabilityConfig {
    #[serde(default = "default_metrics_enabled")]
    pub metrics_enabled: bool,

    #[serde(default = "default_logging_level")]
    #[validate(custom(function = "validate_logging_level"))]
    pub logging_level: String,
}

pub(crate) fn default_metrics_enabled() -> bool {
    true
}

pub(crate) fn default_logging_level() -> String {
    "info".to_string()
}

fn validate_logging_level(value: &str) -> Result<(), validator::ValidationError> {
    match value {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(validator::ValidationError::new("Invalid logging level")),
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: default_metrics_enabled(),
            logging_level: default_logging_level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.graph.reference_actor_id, "nm0000102");
        assert_eq!(config.graph.top_actors_limit, 10);
        assert!(config.observability.metrics_enabled);
    }

    #[test]
    fn test_nested_validation_reaches_sections() {
        let mut config = Config::default();
        config.graph.reference_actor_id = String::new();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.graph.top_actors_limit = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_logging_level_validation() {
        for level in ["trace", "debug", "info", "warn", "error"] {
            assert!(validate_logging_level(level).is_ok());
        }
        assert!(validate_logging_level("verbose").is_err());
        assert!(validate_logging_level("INFO").is_err());
    }

    #[test]
    fn test_partial_section_uses_field_defaults() {
        let config: Config = serde_json::from_str(r#"{"graph": {"top_actors_limit": 25}}"#).unwrap();
        assert_eq!(config.graph.top_actors_limit, 25);
        assert_eq!(config.graph.reference_actor_id, "nm0000102");
        assert_eq!(config.server, ServerConfig::default());
    }
}
