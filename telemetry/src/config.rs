//! Configuration via environment variables
//!
//! CLI flags read their `TELEMETRY_*` variables through clap. The helpers here
//! cover the settings that still honour the names older deployments used,
//! logging a deprecation warning when only the old name is set.

use std::time::Duration;

use crate::datastore::DEFAULT_HTTP_TIMEOUT;
use crate::logging::LogFormat;

/// Get an environment variable with fallback to a deprecated name
///
/// Returns the value of `new_name` when set. If only `old_name` is set its
/// value is returned and a deprecation warning is logged.
pub fn get_env_with_fallback(new_name: &str, old_name: &str) -> Option<String> {
    if let Ok(val) = std::env::var(new_name) {
        return Some(val);
    }
    if let Ok(val) = std::env::var(old_name) {
        tracing::warn!(
            "Environment variable '{}' is deprecated, use '{}' instead",
            old_name,
            new_name
        );
        return Some(val);
    }
    None
}

/// Like [`get_env_with_fallback`], parsed into `T`
///
/// Unset or unparsable values yield `default`.
pub fn get_env_with_fallback_parse<T: std::str::FromStr>(
    new_name: &str,
    old_name: &str,
    default: T,
) -> T {
    get_env_with_fallback(new_name, old_name)
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

/// Interpret a boolean flag value (`1/true/yes/on`)
pub fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Logging settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Output format
    pub format: LogFormat,
    /// Emit debug level events
    pub debug: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Json,
            debug: false,
        }
    }
}

impl LoggingConfig {
    /// Load from `TELEMETRY_LOG_FORMAT` (old: `LOG_FORMAT`) and
    /// `TELEMETRY_LOG_DEBUG` (old: `DEBUG`)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let format = get_env_with_fallback_parse(
            "TELEMETRY_LOG_FORMAT",
            "LOG_FORMAT",
            defaults.format,
        );
        let debug = get_env_with_fallback("TELEMETRY_LOG_DEBUG", "DEBUG")
            .map(|value| is_truthy(&value))
            .unwrap_or(defaults.debug);
        Self { format, debug }
    }

    /// Override with explicitly given CLI values
    pub fn with_overrides(mut self, format: Option<LogFormat>, debug: bool) -> Self {
        if let Some(format) = format {
            self.format = format;
        }
        self.debug |= debug;
        self
    }
}

/// Request timeout of the HTTP store
///
/// `TELEMETRY_HTTP_TIMEOUT_SECS` (old: `HTTP_TIMEOUT_SECS`), 30 seconds when
/// unset.
pub fn http_timeout_from_env() -> Duration {
    let secs = get_env_with_fallback_parse(
        "TELEMETRY_HTTP_TIMEOUT_SECS",
        "HTTP_TIMEOUT_SECS",
        DEFAULT_HTTP_TIMEOUT.as_secs(),
    );
    Duration::from_secs(secs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_get_env_with_fallback_new_name() {
        std::env::set_var("TEST_TELEMETRY_NEW_VAR", "new_value");
        std::env::remove_var("TEST_TELEMETRY_OLD_VAR");

        let result = get_env_with_fallback("TEST_TELEMETRY_NEW_VAR", "TEST_TELEMETRY_OLD_VAR");
        assert_eq!(result, Some("new_value".to_string()));

        std::env::remove_var("TEST_TELEMETRY_NEW_VAR");
    }

    #[test]
    #[serial]
    fn test_get_env_with_fallback_old_name() {
        std::env::remove_var("TEST_TELEMETRY_NEW_VAR2");
        std::env::set_var("TEST_TELEMETRY_OLD_VAR2", "old_value");

        let result = get_env_with_fallback("TEST_TELEMETRY_NEW_VAR2", "TEST_TELEMETRY_OLD_VAR2");
        assert_eq!(result, Some("old_value".to_string()));

        std::env::remove_var("TEST_TELEMETRY_OLD_VAR2");
    }

    #[test]
    #[serial]
    fn test_get_env_with_fallback_new_takes_precedence() {
        std::env::set_var("TEST_TELEMETRY_NEW_VAR3", "new_value");
        std::env::set_var("TEST_TELEMETRY_OLD_VAR3", "old_value");

        let result = get_env_with_fallback("TEST_TELEMETRY_NEW_VAR3", "TEST_TELEMETRY_OLD_VAR3");
        assert_eq!(result, Some("new_value".to_string()));

        std::env::remove_var("TEST_TELEMETRY_NEW_VAR3");
        std::env::remove_var("TEST_TELEMETRY_OLD_VAR3");
    }

    #[test]
    #[serial]
    fn test_get_env_with_fallback_parse_invalid_uses_default() {
        std::env::set_var("TEST_TELEMETRY_NEW_VAR5", "not-a-number");

        let result: u64 =
            get_env_with_fallback_parse("TEST_TELEMETRY_NEW_VAR5", "TEST_TELEMETRY_OLD_VAR5", 7);
        assert_eq!(result, 7);

        std::env::remove_var("TEST_TELEMETRY_NEW_VAR5");
    }

    #[test]
    fn test_is_truthy() {
        for value in ["1", "true", "TRUE", "yes", "on", " On "] {
            assert!(is_truthy(value), "{value}");
        }
        for value in ["0", "false", "", "nope"] {
            assert!(!is_truthy(value), "{value}");
        }
    }

    #[test]
    #[serial]
    fn test_logging_config_from_deprecated_names() {
        std::env::remove_var("TELEMETRY_LOG_FORMAT");
        std::env::remove_var("TELEMETRY_LOG_DEBUG");
        std::env::set_var("LOG_FORMAT", "console");
        std::env::set_var("DEBUG", "true");

        let config = LoggingConfig::from_env();
        assert_eq!(config.format, LogFormat::Console);
        assert!(config.debug);

        std::env::remove_var("LOG_FORMAT");
        std::env::remove_var("DEBUG");
    }

    #[test]
    #[serial]
    fn test_logging_config_defaults_and_overrides() {
        std::env::remove_var("TELEMETRY_LOG_FORMAT");
        std::env::remove_var("TELEMETRY_LOG_DEBUG");
        std::env::remove_var("LOG_FORMAT");
        std::env::remove_var("DEBUG");

        let config = LoggingConfig::from_env();
        assert_eq!(config, LoggingConfig::default());

        let config = config.with_overrides(Some(LogFormat::Console), true);
        assert_eq!(config.format, LogFormat::Console);
        assert!(config.debug);
    }

    #[test]
    #[serial]
    fn test_http_timeout_from_env() {
        std::env::remove_var("TELEMETRY_HTTP_TIMEOUT_SECS");
        std::env::remove_var("HTTP_TIMEOUT_SECS");
        assert_eq!(http_timeout_from_env(), Duration::from_secs(30));

        std::env::set_var("HTTP_TIMEOUT_SECS", "5");
        assert_eq!(http_timeout_from_env(), Duration::from_secs(5));
        std::env::remove_var("HTTP_TIMEOUT_SECS");
    }
}
