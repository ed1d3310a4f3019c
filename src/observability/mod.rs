//! Structured logging setup.

use tracing_subscriber::EnvFilter;

/// Filter used when no log variable is set.
pub const DEFAULT_FILTER: &str = "authorship=info";

/// Variables consulted for the filter directive, first match wins.
pub const LOG_ENV_VARS: &[&str] = &["AUTHORSHIP_LOG", "RUST_LOG"];

/// Pick the filter directive from `lookup`, falling back to
/// [`DEFAULT_FILTER`]. Blank values count as unset.
pub fn filter_directive(lookup: impl Fn(&str) -> Option<String>) -> String {
    LOG_ENV_VARS
        .iter()
        .filter_map(|&key| lookup(key))
        .find(|value| !value.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_FILTER.to_string())
}

/// Install a compact stderr subscriber. Later calls are no-ops.
///
/// A directive that does not parse falls back to [`DEFAULT_FILTER`].
pub fn init_logging() {
    let directive = filter_directive(|key| std::env::var(key).ok());
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt()
        .compact()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn vars(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test_case(&[], DEFAULT_FILTER ; "nothing set")]
    #[test_case(&[("RUST_LOG", "debug")], "debug" ; "rust log only")]
    #[test_case(&[("AUTHORSHIP_LOG", "authorship=trace"), ("RUST_LOG", "debug")], "authorship=trace" ; "crate variable wins")]
    #[test_case(&[("AUTHORSHIP_LOG", "  "), ("RUST_LOG", "warn")], "warn" ; "blank crate variable is skipped")]
    fn directive_selection(pairs: &'static [(&'static str, &'static str)], expected: &str) {
        assert_eq!(filter_directive(vars(pairs)), expected);
    }

    #[test]
    fn init_logging_twice_is_harmless() {
        init_logging();
        init_logging();
    }
}
