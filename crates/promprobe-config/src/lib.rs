//! Target configuration for promprobe.
//!
//! Loads a `TargetConf` from a TOML or JSON file plus `PROMPROBE_*`
//! environment variables, resolves credentials, and translates the result
//! into `promprobe_core::TargetConfig`. Core never reads files itself.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Json, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use promprobe_core::{BackendAuth, MappingProfile, TargetConfig, TlsVerification};

pub const ENV_PREFIX: &str = "PROMPROBE_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("config file not found: {path}")]
    NotFound { path: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── File format ─────────────────────────────────────────────────────

/// On-disk description of one monitored target.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TargetConf {
    /// Backend URL (e.g. "http://prometheus:9090").
    #[serde(default)]
    pub address: String,

    /// Accept self-signed certificates.
    #[serde(default)]
    pub insecure: bool,

    /// Path to a custom CA certificate (PEM).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca_cert: Option<PathBuf>,

    /// Request timeout in seconds. Unset means no client-side timeout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,

    /// Bearer token (plaintext -- prefer `bearer_token_env`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bearer_token: Option<String>,

    /// Environment variable holding the bearer token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bearer_token_env: Option<String>,

    /// Username for basic auth.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Password for basic auth.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// Override of the discovery query expression.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,

    /// Override of the address attached to discovered entities.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_ip_address: Option<String>,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the default config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "promprobe", "promprobe").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("promprobe");
    p
}

// ── Loading ─────────────────────────────────────────────────────────

/// Load a `TargetConf` from `path` (or the default path) plus environment.
///
/// An explicitly given path must exist; the default path may be absent,
/// leaving environment variables as the only source. `.json` files are
/// read as JSON, everything else as TOML.
pub fn load_target_conf(path: Option<&Path>) -> Result<TargetConf, ConfigError> {
    let path = match path {
        Some(p) if !p.exists() => {
            return Err(ConfigError::NotFound {
                path: p.display().to_string(),
            });
        }
        Some(p) => p.to_path_buf(),
        None => config_path(),
    };

    let figment = Figment::new().merge(Serialized::defaults(TargetConf::default()));
    let figment = if is_json(&path) {
        figment.merge(Json::file(&path))
    } else {
        figment.merge(Toml::file(&path))
    };
    let figment = figment.merge(Env::prefixed(ENV_PREFIX));

    Ok(figment.extract()?)
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"))
}

// ── Saving ──────────────────────────────────────────────────────────

/// Serialize `conf` as TOML to `path`, creating parent directories.
pub fn save_target_conf(path: &Path, conf: &TargetConf) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(conf)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Validation & translation ────────────────────────────────────────

/// Check the address: present, a URL, http or https.
pub fn validate(conf: &TargetConf) -> Result<(), ConfigError> {
    let address = conf.address.trim();
    if address.is_empty() {
        return Err(ConfigError::Validation {
            field: "address".into(),
            reason: "must not be empty".into(),
        });
    }

    let url: url::Url = address.parse().map_err(|e| ConfigError::Validation {
        field: "address".into(),
        reason: format!("invalid URL '{address}': {e}"),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::Validation {
            field: "address".into(),
            reason: format!("expected an http or https URL, got '{address}'"),
        });
    }

    if conf.timeout == Some(0) {
        return Err(ConfigError::Validation {
            field: "timeout".into(),
            reason: "must be greater than zero".into(),
        });
    }
    Ok(())
}

/// Resolve backend credentials.
///
/// Order: `bearer_token_env` → `bearer_token` → `username` + `password`.
pub fn resolve_auth(conf: &TargetConf) -> Result<BackendAuth, ConfigError> {
    if let Some(ref env_name) = conf.bearer_token_env {
        return std::env::var(env_name)
            .map(|token| BackendAuth::Bearer(SecretString::from(token)))
            .map_err(|_| ConfigError::Validation {
                field: "bearer_token_env".into(),
                reason: format!("environment variable '{env_name}' is not set"),
            });
    }

    if let Some(ref token) = conf.bearer_token {
        return Ok(BackendAuth::Bearer(SecretString::from(token.clone())));
    }

    match (&conf.username, &conf.password) {
        (Some(username), Some(password)) => Ok(BackendAuth::Basic {
            username: username.clone(),
            password: SecretString::from(password.clone()),
        }),
        (Some(_), None) => Err(ConfigError::Validation {
            field: "password".into(),
            reason: "username is set but password is missing".into(),
        }),
        (None, Some(_)) => Err(ConfigError::Validation {
            field: "username".into(),
            reason: "password is set but username is missing".into(),
        }),
        (None, None) => Ok(BackendAuth::None),
    }
}

/// Build a `TargetConfig` from a loaded `TargetConf`.
///
/// This is the single boundary where file types cross into core types.
pub fn to_target_config(conf: &TargetConf) -> Result<TargetConfig, ConfigError> {
    validate(conf)?;

    let tls = if conf.insecure {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ref ca_path) = conf.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else {
        TlsVerification::SystemDefaults
    };

    let mut mapping = MappingProfile::default();
    if let Some(ref query) = conf.query {
        mapping.query.clone_from(query);
    }
    if let Some(ref ip) = conf.entity_ip_address {
        mapping.ip_address.clone_from(ip);
    }

    Ok(TargetConfig {
        address: conf.address.trim().to_owned(),
        auth: resolve_auth(conf)?,
        tls,
        timeout: conf.timeout.map(Duration::from_secs),
        mapping,
    })
}
