// ── Runtime target configuration ──
//
// Describes *how* to reach one metrics backend and how to shape the
// entities it yields. Never touches disk: `promprobe-config` (or any other
// caller) builds a `TargetConfig` and hands it in.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;

use crate::mapper::MappingProfile;

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification (self-signed certs).
    DangerAcceptInvalid,
}

/// How to authenticate with the backend.
#[derive(Debug, Clone, Default)]
pub enum BackendAuth {
    #[default]
    None,
    Bearer(SecretString),
    Basic {
        username: String,
        password: SecretString,
    },
}

/// Configuration for a single monitored target.
///
/// Immutable once handed to the discovery client.
#[derive(Debug, Clone)]
pub struct TargetConfig {
    /// Backend address exactly as configured (e.g. `http://prometheus:9090`).
    /// Reported verbatim as the target identifier.
    pub address: String,
    pub auth: BackendAuth,
    pub tls: TlsVerification,
    /// Request timeout. `None` defers to the caller's own deadline.
    pub timeout: Option<Duration>,
    pub mapping: MappingProfile,
}

impl TargetConfig {
    /// A config with defaults for everything but the address.
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            auth: BackendAuth::default(),
            tls: TlsVerification::default(),
            timeout: None,
            mapping: MappingProfile::default(),
        }
    }
}
