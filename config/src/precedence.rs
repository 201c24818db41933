//! # Configuration Precedence
//!
//! Merges configuration from multiple sources with precedence rules.
//!
//! # Precedence Order
//! 1. Environment variables (highest priority)
//! 2. Configuration file
//! 3. Default values (lowest priority)
//!
//! An override only wins for fields where it differs from the built-in
//! default, so a source that leaves a field unset never clobbers a value
//! supplied by a lower-priority source.

use crate::config::{
    Config, GraphConfig, ObservabilityConfig, ServerConfig, default_logging_level,
    default_metrics_enabled, default_reference_actor_id, default_server_host, default_server_port,
    default_top_actors_limit,
};

/// Merge configuration sources with precedence: env > file > defaults.
///
/// ## Usage
/// ```rust,no_run
/// use config::{Config, merge_configs, load_from_file, load_from_env};
/// use std::path::Path;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let from_file = load_from_file(Path::new("sixdegrees.toml"))?;
///     let from_env = load_from_env()?;
///
///     let _config = merge_configs(Config::default(), from_file, "file", from_env, "env");
///     Ok(())
/// }
/// ```
pub fn merge_configs(
    defaults: Config,
    file_config: Config,
    file_source_name: &str,
    env_config: Config,
    env_source_name: &str,
) -> Config {
    let config = merge_with_logging(defaults, file_config, file_source_name);
    merge_with_logging(config, env_config, env_source_name)
}

fn merge_with_logging(mut base: Config, override_config: Config, source_name: &str) -> Config {
    let mut changes = Vec::new();

    merge_server(&mut base.server, &override_config.server, &mut changes);
    merge_graph(&mut base.graph, &override_config.graph, &mut changes);
    merge_observability(
        &mut base.observability,
        &override_config.observability,
        &mut changes,
    );

    if !changes.is_empty() {
        tracing::info!("Configuration from {}: {:?}", source_name, changes);
    }

    base
}

fn merge_server(base: &mut ServerConfig, override_config: &ServerConfig, changes: &mut Vec<String>) {
    if override_config.host != default_server_host() && override_config.host != base.host {
        changes.push(format!("server.host = {}", override_config.host));
        base.host.clone_from(&override_config.host);
    }
    if override_config.port != default_server_port() && override_config.port != base.port {
        changes.push(format!("server.port = {}", override_config.port));
        base.port = override_config.port;
    }
}

fn merge_graph(base: &mut GraphConfig, override_config: &GraphConfig, changes: &mut Vec<String>) {
    if override_config.reference_actor_id != default_reference_actor_id()
        && override_config.reference_actor_id != base.reference_actor_id
    {
        changes.push(format!(
            "graph.reference_actor_id = {}",
            override_config.reference_actor_id
        ));
        base.reference_actor_id
            .clone_from(&override_config.reference_actor_id);
    }
    if override_config.top_actors_limit != default_top_actors_limit()
        && override_config.top_actors_limit != base.top_actors_limit
    {
        changes.push(format!(
            "graph.top_actors_limit = {}",
            override_config.top_actors_limit
        ));
        base.top_actors_limit = override_config.top_actors_limit;
    }
}

fn merge_observability(
    base: &mut ObservabilityConfig,
    override_config: &ObservabilityConfig,
    changes: &mut Vec<String>,
) {
    if override_config.metrics_enabled != default_metrics_enabled()
        && override_config.metrics_enabled != base.metrics_enabled
    {
        changes.push(format!(
            "observability.metrics_enabled = {}",
            override_config.metrics_enabled
        ));
        base.metrics_enabled = override_config.metrics_enabled;
    }
    if override_config.logging_level != default_logging_level()
        && override_config.logging_level != base.logging_level
    {
        changes.push(format!(
            "observability.logging_level = {}",
            override_config.logging_level
        ));
        base.logging_level
            .clone_from(&override_config.logging_level);
    }
}
