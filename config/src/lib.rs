//! # Configuration System
//!
//! Centralized configuration management for the SixDegrees service.
//!
//! This crate provides:
//! - Configuration structures for the server, graph and observability
//! - Environment variable loading (12-factor app principles)
//! - Configuration file loading (TOML/YAML)
//! - Configuration precedence (env > file > defaults)
//! - Configuration validation
//!
//! # Best Practices
//!
//! - Uses `validator` crate for input validation
//! - Follows 12-factor app configuration principles
//! - Provides clear error messages for invalid configuration

pub mod config;
pub mod error;
pub mod file_loader;
pub mod loader;
pub mod precedence;

use std::path::Path;

pub use config::{Config, GraphConfig, ObservabilityConfig, ServerConfig};
pub use error::ConfigError;
pub use file_loader::{ConfigFileError, load_from_file, load_from_toml, load_from_yaml};
pub use loader::load_from_env;
pub use precedence::merge_configs;
pub use validator::Validate;

/// Environment variable naming the optional configuration file.
pub const CONFIG_FILE_ENV: &str = "SD_CONFIG_FILE";

/// Assemble the effective configuration.
///
/// Defaults are overridden by the file named in `SD_CONFIG_FILE` (if set),
/// which is in turn overridden by environment variables. The merged result
/// is validated before it is returned.
pub fn load() -> Result<Config, ConfigError> {
    let file_config = match std::env::var(CONFIG_FILE_ENV) {
        Ok(path) if !path.trim().is_empty() => load_from_file(Path::new(path.trim()))?,
        _ => Config::default(),
    };
    let env_config = load_from_env()?;

    let config = merge_configs(Config::default(), file_config, "file", env_config, "env");
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;
    use std::fs;
    use tempfile::TempDir;

    const ENV_KEYS: &[&str] = &[
        CONFIG_FILE_ENV,
        "SV_HOST",
        "SV_PORT",
        "GR_REFERENCE_ACTOR_ID",
        "GR_TOP_ACTORS_LIMIT",
        "OB_METRICS_ENABLED",
        "OB_LOGGING_LEVEL",
    ];

    fn clear_env() {
        for key in ENV_KEYS {
            unsafe {
                env::remove_var(key);
            }
        }
    }

    #[test]
    #[serial]
    fn test_load_defaults() {
        clear_env();
        let config = load().unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    #[serial]
    fn test_env_overrides_file() {
        clear_env();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sixdegrees.toml");
        fs::write(
            &path,
            r#"
[server]
port = 9000

[graph]
reference_actor_id = "nm0000001"
"#,
        )
        .unwrap();

        unsafe {
            env::set_var(CONFIG_FILE_ENV, &path);
            env::set_var("SV_PORT", "9100");
        }
        let config = load();
        clear_env();

        let config = config.unwrap();
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.graph.reference_actor_id, "nm0000001");
        assert_eq!(config.graph.top_actors_limit, 10);
    }

    #[test]
    #[serial]
    fn test_invalid_merged_config_is_rejected() {
        clear_env();
        unsafe {
            env::set_var("OB_LOGGING_LEVEL", "chatty");
        }
        let result = load();
        clear_env();

        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    #[serial]
    fn test_missing_file_is_an_error() {
        clear_env();
        unsafe {
            env::set_var(CONFIG_FILE_ENV, "/nonexistent/sixdegrees.yaml");
        }
        let result = load();
        clear_env();

        assert!(matches!(
            result,
            Err(ConfigError::File(ConfigFileError::FileNotFound(_)))
        ));
    }
}
