// ── Metrics query seam ──
//
// The discovery client only needs "evaluate this expression now and give
// me an instant vector". Anything that can do that plugs in here; the
// production implementation is `promprobe_api::PrometheusClient`.

use std::future::Future;

use chrono::{DateTime, Utc};

use promprobe_api::{PrometheusClient, Sample};

/// Evaluates one instant query against a metrics backend.
///
/// Implementations must not retry or cache; every failure is handed back
/// as a single opaque error.
pub trait MetricsQuery: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    fn instant_query(
        &self,
        expr: &str,
        at: DateTime<Utc>,
    ) -> impl Future<Output = Result<Vec<Sample>, Self::Error>> + Send;
}

impl MetricsQuery for PrometheusClient {
    type Error = promprobe_api::Error;

    async fn instant_query(
        &self,
        expr: &str,
        at: DateTime<Utc>,
    ) -> Result<Vec<Sample>, Self::Error> {
        self.query_vector(expr, at).await
    }
}
