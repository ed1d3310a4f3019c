//! Configuration data structures for the server.
//!
//! Defines the YAML config format. Every field has a default, so an empty
//! file (or no file) is a valid configuration.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Root configuration.
///
/// Loaded from a YAML file, environment variables, and CLI flags, merged in
/// that order of increasing priority by [`crate::config::loader`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Connection string: a SQLite path, a `file:` URI, or `:memory:`.
    #[serde(default = "default_database")]
    pub database: String,

    /// Drop and recreate the schema before serving.
    #[serde(default)]
    pub init_db: bool,

    /// Socket address the HTTP server binds.
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Serve the GraphiQL explorer on `GET`.
    #[serde(default = "default_graphiql")]
    pub graphiql: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            database: default_database(),
            init_db: false,
            listen: default_listen(),
            graphiql: default_graphiql(),
        }
    }
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

fn default_database() -> String {
    "authorship.db".to_string()
}

fn default_listen() -> String {
    "127.0.0.1:5000".to_string()
}

fn default_graphiql() -> bool {
    true
}

// ---------------------------------------------------------------------------
// Boolean-like values
// ---------------------------------------------------------------------------

/// Parse a loose boolean (`1`, `true`, `yes`, `on` and their negatives),
/// case-insensitive.
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq as pa_eq;
    use test_case::test_case;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.database, "authorship.db");
        assert!(!config.init_db);
        assert_eq!(config.listen, "127.0.0.1:5000");
        assert!(config.graphiql);
    }

    #[test]
    fn empty_yaml_yields_defaults() {
        let config: ServerConfig = serde_yaml::from_str("{}").unwrap();
        pa_eq!(config, ServerConfig::default());
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let yaml = "database: /var/lib/authors.db\ninit_db: true\n";
        let config: ServerConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.database, "/var/lib/authors.db");
        assert!(config.init_db);
        assert_eq!(config.listen, "127.0.0.1:5000");
        assert!(config.graphiql);
    }

    #[test]
    fn yaml_round_trip() {
        let config = ServerConfig {
            database: ":memory:".into(),
            init_db: true,
            listen: "0.0.0.0:8080".into(),
            graphiql: false,
        };
        let yaml = serde_yaml::to_string(&config).unwrap();
        let back: ServerConfig = serde_yaml::from_str(&yaml).unwrap();
        pa_eq!(back, config);
    }

    #[test_case("1", Some(true) ; "one")]
    #[test_case("true", Some(true) ; "true lowercase")]
    #[test_case("TRUE", Some(true) ; "true uppercase")]
    #[test_case(" yes ", Some(true) ; "yes padded")]
    #[test_case("on", Some(true) ; "on")]
    #[test_case("0", Some(false) ; "zero")]
    #[test_case("false", Some(false) ; "false")]
    #[test_case("off", Some(false) ; "off")]
    #[test_case("", Some(false) ; "empty")]
    #[test_case("maybe", None ; "garbage")]
    fn flag_parsing(input: &str, expected: Option<bool>) {
        pa_eq!(parse_flag(input), expected);
    }
}
