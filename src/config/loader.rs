//! Multi-source config loading.
//!
//! Priority, lowest to highest: built-in defaults, YAML file, environment.
//! CLI flags are applied on top by the binary.

use std::path::Path;

use crate::config::schema::{parse_flag, ServerConfig};
use crate::error::{AuthorshipError, Result};

/// Environment variables read for the connection string, first match wins.
pub const DATABASE_ENV_VARS: &[&str] = &["POSTGRES_CONNECTION_STRING", "DATABASE_URL"];

/// Environment variable for the schema-initialization flag.
pub const INIT_ENV_VAR: &str = "DATABASE_INIT";

/// Load defaults, then the YAML file at `path` if given, then the process
/// environment.
pub fn load_config(path: Option<&Path>) -> Result<ServerConfig> {
    let mut config = match path {
        Some(p) => load_file(p)?,
        None => ServerConfig::default(),
    };
    apply_env(&mut config, |key| std::env::var(key).ok())?;
    Ok(config)
}

/// Parse a YAML config file.
pub fn load_file(path: &Path) -> Result<ServerConfig> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        AuthorshipError::Config(format!("cannot read {}: {e}", path.display()))
    })?;
    let config = serde_yaml::from_str(&text)?;
    tracing::debug!("loaded config from {}", path.display());
    Ok(config)
}

/// Overlay environment values onto `config`.
///
/// `lookup` abstracts the environment so tests don't touch process state.
/// Empty values are ignored for the connection string.
pub fn apply_env(
    config: &mut ServerConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<()> {
    if let Some(url) = DATABASE_ENV_VARS
        .iter()
        .filter_map(|&key| lookup(key))
        .find(|v| !v.trim().is_empty())
    {
        config.database = url;
    }

    if let Some(raw) = lookup(INIT_ENV_VAR) {
        config.init_db = parse_flag(&raw).ok_or_else(|| {
            AuthorshipError::Config(format!("{INIT_ENV_VAR}: expected a boolean, got {raw:?}"))
        })?;
    }
    Ok(())
}
