//! CLI error types with miette diagnostics.
//!
//! Maps `ConfigError` and `CoreError` into user-facing errors with
//! actionable help text. Discovery failures are not errors here unless
//! `--fail-on-error` asks for them.

use miette::Diagnostic;
use thiserror::Error;

use promprobe_config::ConfigError;
use promprobe_core::CoreError;

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const DISCOVERY_FAILED: i32 = 3;
    pub const CONFIG: i32 = 4;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Configuration ────────────────────────────────────────────────

    #[error("No target configured")]
    #[diagnostic(
        code(promprobe::no_config),
        help(
            "Pass --address, set PROMPROBE_ADDRESS, or create a config file with:\n\
             promprobe --address http://prometheus:9090 config init\n\
             Expected at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error("Configuration file not found: {path}")]
    #[diagnostic(
        code(promprobe::config_not_found),
        help("Check the --config path, or omit it to use the default location.")
    )]
    ConfigNotFound { path: String },

    #[error("Configuration file already exists: {path}")]
    #[diagnostic(
        code(promprobe::config_exists),
        help("Use --force to overwrite it.")
    )]
    ConfigExists { path: String },

    #[error(transparent)]
    #[diagnostic(code(promprobe::config))]
    Config(Box<ConfigError>),

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(
        code(promprobe::validation),
        help("The address must be an http:// or https:// URL, e.g. http://prometheus:9090")
    )]
    Validation { field: String, reason: String },

    #[error("TLS setup failed: {message}")]
    #[diagnostic(
        code(promprobe::tls),
        help("Check that ca_cert points at a readable PEM file, or use --insecure (-k).")
    )]
    Tls { message: String },

    // ── Discovery ────────────────────────────────────────────────────

    #[error("Discovery failed: {description}")]
    #[diagnostic(
        code(promprobe::discovery_failed),
        help("Run with -v for request details.")
    )]
    DiscoveryFailed { description: String },

    // ── IO / Serialization ───────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render JSON: {0}")]
    #[diagnostic(code(promprobe::json))]
    Json(#[from] serde_json::Error),

    #[error("Failed to render YAML: {0}")]
    #[diagnostic(code(promprobe::yaml))]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NoConfig { .. }
            | Self::ConfigNotFound { .. }
            | Self::ConfigExists { .. }
            | Self::Config(_)
            | Self::Tls { .. } => exit_code::CONFIG,
            Self::Validation { .. } => exit_code::USAGE,
            Self::DiscoveryFailed { .. } => exit_code::DISCOVERY_FAILED,
            _ => exit_code::GENERAL,
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::NotFound { path } => CliError::ConfigNotFound { path },
            ConfigError::Io(e) => CliError::Io(e),
            other => CliError::Config(Box::new(other)),
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Config { message } => CliError::Validation {
                field: "address".into(),
                reason: message,
            },

            CoreError::Tls { message } => CliError::Tls { message },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct_per_category() {
        let config = CliError::NoConfig { path: "x".into() };
        let usage = CliError::Validation {
            field: "address".into(),
            reason: "bad".into(),
        };
        let discovery = CliError::DiscoveryFailed {
            description: "down".into(),
        };

        assert_eq!(config.exit_code(), exit_code::CONFIG);
        assert_eq!(usage.exit_code(), exit_code::USAGE);
        assert_eq!(discovery.exit_code(), exit_code::DISCOVERY_FAILED);
    }

    #[test]
    fn core_config_error_becomes_validation() {
        let err = CliError::from(CoreError::Config {
            message: "unsupported scheme 'ftp'".into(),
        });
        assert!(matches!(err, CliError::Validation { ref field, .. } if field == "address"));
    }

    #[test]
    fn core_tls_error_is_a_config_failure() {
        let err = CliError::from(CoreError::Tls {
            message: "CA cert not readable".into(),
        });
        assert!(matches!(err, CliError::Tls { .. }));
        assert_eq!(err.exit_code(), exit_code::CONFIG);
    }

    #[test]
    fn missing_config_file_keeps_its_path() {
        let err = CliError::from(ConfigError::NotFound {
            path: "/nope.toml".into(),
        });
        assert!(matches!(err, CliError::ConfigNotFound { ref path } if path == "/nope.toml"));
    }
}
