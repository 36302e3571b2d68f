// ── Core error types ──
//
// Errors raised by promprobe-core itself. Query failures during a
// discovery cycle are NOT raised -- they are reported in-band through
// `DiscoveryResponse::Failure`. `CoreError` only covers construction-time
// failures; `BuildError` covers a single entity that could not be built.

use thiserror::Error;

/// Construction-time error for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("TLS setup failed: {message}")]
    Tls { message: String },
}

/// Building the HTTP client only fails on TLS material or the URL.
impl From<promprobe_api::Error> for CoreError {
    fn from(err: promprobe_api::Error) -> Self {
        match err {
            promprobe_api::Error::Tls(message) => CoreError::Tls { message },
            other => CoreError::Config {
                message: other.to_string(),
            },
        }
    }
}

/// Failure to build a single topology entity or commodity.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuildError {
    #[error("entity id must not be empty")]
    EmptyId,

    #[error("commodity {commodity} has non-finite {field}: {value}")]
    NonFinite {
        commodity: String,
        field: &'static str,
        value: f64,
    },

    #[error("commodity {commodity} has negative capacity: {value}")]
    NegativeCapacity { commodity: String, value: f64 },
}

/// Render an error with its whole `source()` chain, `outer: inner: root`.
///
/// `reqwest` keeps the interesting part ("Connection refused") in the
/// source chain, not in its own `Display`.
pub fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(inner) = source {
        let text = inner.to_string();
        if !out.contains(&text) {
            out.push_str(": ");
            out.push_str(&text);
        }
        source = inner.source();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Error)]
    #[error("query failed")]
    struct Outer(#[source] Inner);

    #[derive(Debug, Error)]
    #[error("connection refused")]
    struct Inner;

    #[test]
    fn error_chain_includes_sources() {
        assert_eq!(error_chain(&Outer(Inner)), "query failed: connection refused");
    }

    #[test]
    fn error_chain_skips_repeated_text() {
        #[derive(Debug, Error)]
        #[error("transport: connection refused")]
        struct Wrapping(#[source] Inner);

        assert_eq!(
            error_chain(&Wrapping(Inner)),
            "transport: connection refused"
        );
    }

    #[test]
    fn tls_error_keeps_its_message() {
        let core = CoreError::from(promprobe_api::Error::Tls("invalid CA cert".into()));
        assert!(matches!(
            core,
            CoreError::Tls { ref message } if message == "invalid CA cert"
        ));
    }
}
