use thiserror::Error;

/// Top-level error type for the `promprobe-api` crate.
///
/// Covers every way a query against the backend can fail: transport,
/// backend-side evaluation, and response decoding. `promprobe-core` treats
/// these as opaque and reports them in-band.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Backend ─────────────────────────────────────────────────────
    /// Structured error from the query API (`{"status":"error", ...}`),
    /// or a non-success HTTP status without a usable envelope.
    #[error("Prometheus API error (HTTP {status}, {error_type}): {message}")]
    Api {
        error_type: String,
        message: String,
        status: u16,
    },

    /// The query evaluated to something other than the expected result type.
    #[error("Unexpected result type: expected {expected}, got {actual}")]
    UnexpectedResultType {
        expected: &'static str,
        actual: &'static str,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}
