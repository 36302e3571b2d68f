// Prometheus query API HTTP client
//
// Wraps `reqwest::Client` with `/api/v1` URL construction, credential
// injection and envelope unwrapping. One request per call: no retries,
// no caching, no state carried between calls.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::auth::Credentials;
use crate::error::Error;
use crate::models::{ApiResponse, QueryData, Sample};
use crate::transport::TransportConfig;

const BODY_PREVIEW_CHARS: usize = 200;

/// Raw HTTP client for a Prometheus-compatible query API.
///
/// Handles the `{ status, data, errorType, error }` envelope. All methods
/// return the unwrapped `data` payload -- the envelope is stripped before
/// the caller sees it.
#[derive(Debug, Clone)]
pub struct PrometheusClient {
    http: reqwest::Client,
    base_url: Url,
    credentials: Credentials,
}

impl PrometheusClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// `base_url` is the server root (e.g. `http://prometheus:9090`), or the
    /// path prefix when the server runs behind a proxy with `--web.route-prefix`.
    pub fn new(
        base_url: Url,
        credentials: Credentials,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self::with_client(http, base_url, credentials))
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url, credentials: Credentials) -> Self {
        Self {
            http,
            base_url,
            credentials,
        }
    }

    /// The backend base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build a full URL for an API path: `{base}/api/v1/{path}`.
    pub(crate) fn api_url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}/api/v1/{path}"))?)
    }

    // ── Queries ──────────────────────────────────────────────────────

    /// Evaluate an instant query at `at`.
    pub async fn query(&self, expr: &str, at: DateTime<Utc>) -> Result<QueryData, Error> {
        let mut url = self.api_url("query")?;
        url.query_pairs_mut()
            .append_pair("query", expr)
            .append_pair("time", &format_time(at));

        self.get(url).await
    }

    /// Evaluate an instant query that must produce an instant vector.
    pub async fn query_vector(&self, expr: &str, at: DateTime<Utc>) -> Result<Vec<Sample>, Error> {
        match self.query(expr, at).await? {
            QueryData::Vector(samples) => Ok(samples),
            other => Err(Error::UnexpectedResultType {
                expected: "vector",
                actual: other.result_type(),
            }),
        }
    }

    // ── Request helpers ──────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {}", url);

        let builder = self.credentials.apply(self.http.get(url));
        let resp = builder.send().await.map_err(Error::Transport)?;

        parse_envelope(resp).await
    }
}

/// Parse the `{ status, data }` envelope, returning `data` on success or an
/// `Error::Api` if `status != "success"` or the HTTP status is not 2xx.
async fn parse_envelope<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
    let status = resp.status();
    let body = resp.text().await.map_err(Error::Transport)?;

    let envelope: ApiResponse<T> = match serde_json::from_str(&body) {
        Ok(envelope) => envelope,
        Err(_) if !status.is_success() => {
            return Err(Error::Api {
                error_type: "http".into(),
                message: preview(&body),
                status: status.as_u16(),
            });
        }
        Err(e) => {
            return Err(Error::Deserialization {
                message: format!("{e} (body preview: {:?})", preview(&body)),
                body,
            });
        }
    };

    for warning in &envelope.warnings {
        warn!(warning = %warning, "query returned a warning");
    }

    if envelope.status != "success" {
        return Err(Error::Api {
            error_type: envelope.error_type.unwrap_or_else(|| "unknown".into()),
            message: envelope
                .error
                .unwrap_or_else(|| format!("status={}", envelope.status)),
            status: status.as_u16(),
        });
    }

    envelope.data.ok_or_else(|| Error::Deserialization {
        message: "success envelope without data".into(),
        body,
    })
}

/// Unix seconds with millisecond precision, the format the API expects.
fn format_time(at: DateTime<Utc>) -> String {
    format!("{}.{:03}", at.timestamp(), at.timestamp_subsec_millis())
}

fn preview(body: &str) -> String {
    body.chars().take(BODY_PREVIEW_CHARS).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client(base: &str) -> PrometheusClient {
        PrometheusClient::with_client(
            reqwest::Client::new(),
            Url::parse(base).unwrap(),
            Credentials::Anonymous,
        )
    }

    #[test]
    fn api_url_without_trailing_slash() {
        let url = client("http://prom:9090").api_url("query").unwrap();
        assert_eq!(url.as_str(), "http://prom:9090/api/v1/query");
    }

    #[test]
    fn api_url_keeps_route_prefix() {
        let url = client("https://proxy.example.com/prometheus/")
            .api_url("query")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://proxy.example.com/prometheus/api/v1/query"
        );
    }

    #[test]
    fn format_time_has_millisecond_precision() {
        let at = DateTime::from_timestamp(1_700_000_000, 42_000_000).unwrap();
        assert_eq!(format_time(at), "1700000000.042");
    }
}
