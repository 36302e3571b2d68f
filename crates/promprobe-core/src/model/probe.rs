// ── Probe protocol messages ──
//
// Request/response shapes exchanged with the orchestration server for
// target registration, validation and discovery.

use serde::{Deserialize, Serialize};
use strum::Display;

use super::entity::Entity;

/// One key/value identifying or configuring a target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountValue {
    pub key: String,
    pub string_value: String,
}

impl AccountValue {
    pub fn new(key: impl Into<String>, string_value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            string_value: string_value.into(),
        }
    }
}

/// Everything the server needs to create a target for this probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetInfo {
    pub probe_category: String,
    pub target_type: String,
    pub identity_field: String,
    pub account_values: Vec<AccountValue>,
}

/// Result of validating a target. Empty `errors` means valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResponse {
    #[serde(default)]
    pub errors: Vec<ErrorDescriptor>,
}

impl ValidationResponse {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorSeverity {
    Critical,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDescriptor {
    pub severity: ErrorSeverity,
    pub description: String,
}

impl ErrorDescriptor {
    pub fn critical(description: impl Into<String>) -> Self {
        Self {
            severity: ErrorSeverity::Critical,
            description: description.into(),
        }
    }
}

/// Outcome of one discovery cycle.
///
/// Entities and errors never coexist: a cycle either mapped the query
/// result (possibly to nothing) or failed to obtain one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum DiscoveryResponse {
    Success { entities: Vec<Entity> },
    Failure { errors: Vec<ErrorDescriptor> },
}

impl DiscoveryResponse {
    /// A failed cycle carrying a single critical error.
    pub fn critical(description: impl Into<String>) -> Self {
        Self::Failure {
            errors: vec![ErrorDescriptor::critical(description)],
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Discovered entities; empty for a failed cycle.
    pub fn entities(&self) -> &[Entity] {
        match self {
            Self::Success { entities } => entities,
            Self::Failure { .. } => &[],
        }
    }

    /// Reported errors; empty for a successful cycle.
    pub fn errors(&self) -> &[ErrorDescriptor] {
        match self {
            Self::Success { .. } => &[],
            Self::Failure { errors } => errors,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn failure_has_no_entities() {
        let resp = DiscoveryResponse::critical("boom");
        assert!(!resp.is_success());
        assert!(resp.entities().is_empty());
        assert_eq!(resp.errors().len(), 1);
        assert_eq!(resp.errors()[0].severity, ErrorSeverity::Critical);
    }

    #[test]
    fn success_has_no_errors() {
        let resp = DiscoveryResponse::Success {
            entities: Vec::new(),
        };
        assert!(resp.is_success());
        assert!(resp.errors().is_empty());
    }

    #[test]
    fn response_is_tagged_on_the_wire() {
        let json = serde_json::to_value(DiscoveryResponse::critical("down")).unwrap();
        assert_eq!(json["outcome"], "failure");
        assert_eq!(json["errors"][0]["severity"], "CRITICAL");
        assert_eq!(json["errors"][0]["description"], "down");
    }
}
