#![allow(clippy::unwrap_used)]
// Discovery cycle tests: a fake query backend for the lifecycle contract,
// and a wiremock Prometheus for the end-to-end path.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use promprobe_core::mapper::DEFAULT_QUERY;
use promprobe_core::registration::{PROBE_CATEGORY, TARGET_ID_FIELD, TARGET_TYPE};
use promprobe_core::{
    CommodityType, DiscoveryResponse, DroppedSample, ErrorSeverity, LabelSet, MappingObserver,
    MetricsQuery, ProbeClient, PrometheusDiscoveryClient, Sample, TargetConfig,
};

const ADDRESS: &str = "http://prometheus.example.com:9090";

// ── Helpers ─────────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
struct FakeError(String);

/// Returns a canned result and records every query it receives.
struct FakeQuery {
    result: Result<Vec<Sample>, String>,
    calls: Mutex<Vec<(String, DateTime<Utc>)>>,
}

impl FakeQuery {
    fn ok(samples: Vec<Sample>) -> Self {
        Self {
            result: Ok(samples),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn err(message: &str) -> Self {
        Self {
            result: Err(message.into()),
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl MetricsQuery for FakeQuery {
    type Error = FakeError;

    async fn instant_query(
        &self,
        expr: &str,
        at: DateTime<Utc>,
    ) -> Result<Vec<Sample>, Self::Error> {
        self.calls.lock().unwrap().push((expr.to_owned(), at));
        self.result.clone().map_err(FakeError)
    }
}

#[derive(Default)]
struct Recorder(Mutex<Vec<DroppedSample>>);

impl MappingObserver for Recorder {
    fn sample_dropped(&self, dropped: &DroppedSample) {
        self.0.lock().unwrap().push(dropped.clone());
    }
}

fn sample(page: &str, value: f64) -> Sample {
    let labels: LabelSet = [("job", "rum"), ("page", page)].into_iter().collect();
    Sample::new(labels, 1_700_000_000.0, value)
}

fn client(query: FakeQuery) -> PrometheusDiscoveryClient<FakeQuery> {
    PrometheusDiscoveryClient::with_query(TargetConfig::new(ADDRESS), query)
}

// ── Account values / validation ─────────────────────────────────────

#[test]
fn test_account_values_carry_the_configured_address() {
    let info = client(FakeQuery::ok(Vec::new())).get_account_values();

    assert_eq!(info.probe_category, PROBE_CATEGORY);
    assert_eq!(info.target_type, TARGET_TYPE);
    assert_eq!(info.identity_field, TARGET_ID_FIELD);
    assert_eq!(info.account_values.len(), 1);
    assert_eq!(info.account_values[0].key, TARGET_ID_FIELD);
    assert_eq!(info.account_values[0].string_value, ADDRESS);
}

#[tokio::test]
async fn test_validate_is_always_successful() {
    let probe = client(FakeQuery::err("unreachable"));
    let info = probe.get_account_values();

    let resp = probe.validate(&info.account_values).await;

    assert!(resp.is_valid());
    assert!(probe.query_calls().is_empty());
}

// ── Discovery ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_discover_two_samples() {
    let probe = client(FakeQuery::ok(vec![sample("/home", 12.5), sample("/cart", 7.0)]));

    let resp = probe.discover(&[]).await;

    assert!(resp.is_success());
    assert!(resp.errors().is_empty());
    let entities = resp.entities();
    assert_eq!(entities.len(), 2);
    let used: Vec<_> = entities
        .iter()
        .map(|e| {
            assert_eq!(e.sells.len(), 1);
            assert_eq!(e.sells[0].commodity_type, CommodityType::ResponseTime);
            assert_eq!(e.sells[0].capacity, Some(100.0));
            e.sells[0].used
        })
        .collect();
    assert_eq!(used, vec![Some(12.5), Some(7.0)]);
    assert_eq!(entities[0].id, r#"{job="rum", page="/home"}"#);
    assert_ne!(entities[0].id, entities[1].id);
}

#[tokio::test]
async fn test_discover_runs_the_fixed_query_once() {
    let probe = client(FakeQuery::ok(Vec::new()));
    let before = Utc::now();

    probe.discover(&[]).await;

    let calls = probe.query_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, DEFAULT_QUERY);
    assert!(calls[0].1 >= before);
}

#[tokio::test]
async fn test_discover_empty_vector_is_not_an_error() {
    let resp = client(FakeQuery::ok(Vec::new())).discover(&[]).await;

    assert_eq!(resp, DiscoveryResponse::Success { entities: vec![] });
}

#[tokio::test]
async fn test_discover_query_failure_is_reported_in_band() {
    let resp = client(FakeQuery::err("connection refused"))
        .discover(&[])
        .await;

    assert!(!resp.is_success());
    assert!(resp.entities().is_empty());
    assert_eq!(resp.errors().len(), 1);
    assert_eq!(resp.errors()[0].severity, ErrorSeverity::Critical);
    assert!(resp.errors()[0].description.contains("connection refused"));
}

#[tokio::test]
async fn test_discover_counts_dropped_samples() {
    let recorder = Arc::new(Recorder::default());
    let samples = vec![
        sample("/a", 1.0),
        sample("/b", f64::NAN),
        sample("/c", 3.0),
    ];
    let probe = client(FakeQuery::ok(samples.clone())).with_observer(recorder.clone());

    let resp = probe.discover(&[]).await;

    let dropped = recorder.0.lock().unwrap();
    assert!(resp.errors().is_empty());
    assert_eq!(resp.entities().len() + dropped.len(), samples.len());
    assert_eq!(dropped.len(), 1);
    assert_eq!(dropped[0].index, 1);
}

#[tokio::test]
async fn test_discover_is_repeatable() {
    let probe = client(FakeQuery::ok(vec![sample("/home", 12.5)]));

    let first = probe.discover(&[]).await;
    let second = probe.discover(&[]).await;

    assert_eq!(first, second);
}

// ── End to end against a mock Prometheus ────────────────────────────

#[tokio::test]
async fn test_discover_end_to_end() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/query"))
        .and(query_param("query", DEFAULT_QUERY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "data": {
                "resultType": "vector",
                "result": [
                    { "metric": { "page": "/home" }, "value": [1700000000.0, "12.5"] },
                    { "metric": { "page": "/cart" }, "value": [1700000000.0, "7"] }
                ]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let probe = PrometheusDiscoveryClient::connect(TargetConfig::new(server.uri())).unwrap();
    let resp = probe.discover(&[]).await;

    assert!(resp.is_success(), "unexpected failure: {resp:?}");
    let used: Vec<_> = resp.entities().iter().map(|e| e.sells[0].used).collect();
    assert_eq!(used, vec![Some(12.5), Some(7.0)]);
}

#[tokio::test]
async fn test_discover_end_to_end_backend_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/query"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "status": "error",
            "errorType": "execution",
            "error": "query processing would load too many samples"
        })))
        .mount(&server)
        .await;

    let probe = PrometheusDiscoveryClient::connect(TargetConfig::new(server.uri())).unwrap();
    let resp = probe.discover(&[]).await;

    assert_eq!(resp.errors().len(), 1);
    assert_eq!(resp.errors()[0].severity, ErrorSeverity::Critical);
    assert!(resp.errors()[0].description.contains("too many samples"));
}

#[tokio::test]
async fn test_discover_end_to_end_connection_refused() {
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let probe =
        PrometheusDiscoveryClient::connect(TargetConfig::new(format!("http://{addr}"))).unwrap();

    let resp = probe.discover(&[]).await;

    assert!(resp.entities().is_empty());
    assert_eq!(resp.errors().len(), 1);
    let description = &resp.errors()[0].description;
    assert!(
        description.to_lowercase().contains("connection refused"),
        "got: {description}"
    );
}

// ── Fake inspection ─────────────────────────────────────────────────

trait QueryCalls {
    fn query_calls(&self) -> Vec<(String, DateTime<Utc>)>;
}

impl QueryCalls for PrometheusDiscoveryClient<FakeQuery> {
    fn query_calls(&self) -> Vec<(String, DateTime<Utc>)> {
        self.query().calls.lock().unwrap().clone()
    }
}
