// Query API response types
//
// Models for the Prometheus HTTP API. Every response is wrapped in the
// `ApiResponse<T>` envelope; instant query payloads are tagged by
// `resultType`. Sample values travel as `[unix_seconds, "decimal string"]`.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Label name Prometheus reserves for the metric name.
pub const METRIC_NAME_LABEL: &str = "__name__";

// ── Response Envelope ────────────────────────────────────────────────

/// Standard Prometheus API response envelope.
///
/// ```json
/// { "status": "success", "data": { ... }, "warnings": [] }
/// { "status": "error", "errorType": "bad_data", "error": "..." }
/// ```
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub status: String,
    pub data: Option<T>,
    pub error_type: Option<String>,
    pub error: Option<String>,
    #[serde(default)]
    pub warnings: Vec<String>,
}

// ── Query result ─────────────────────────────────────────────────────

/// Payload of `/api/v1/query`, tagged by `resultType`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "resultType", content = "result", rename_all = "lowercase")]
pub enum QueryData {
    Vector(Vec<Sample>),
    Matrix(Vec<RangeSeries>),
    Scalar(SampleValue),
    String(StringValue),
}

impl QueryData {
    /// The wire name of this result type.
    pub fn result_type(&self) -> &'static str {
        match self {
            Self::Vector(_) => "vector",
            Self::Matrix(_) => "matrix",
            Self::Scalar(_) => "scalar",
            Self::String(_) => "string",
        }
    }
}

/// One element of an instant vector.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Sample {
    pub metric: LabelSet,
    pub value: SampleValue,
}

impl Sample {
    pub fn new(metric: LabelSet, timestamp: f64, value: f64) -> Self {
        Self {
            metric,
            value: SampleValue { timestamp, value },
        }
    }
}

/// One series of a range vector (only seen when an instant query
/// contains a range selector).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RangeSeries {
    pub metric: LabelSet,
    #[serde(default)]
    pub values: Vec<SampleValue>,
}

/// A `[timestamp, "value"]` pair decoded into floats.
///
/// `"NaN"`, `"+Inf"` and `"-Inf"` decode to the matching `f64`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "(f64, String)")]
pub struct SampleValue {
    pub timestamp: f64,
    pub value: f64,
}

impl TryFrom<(f64, String)> for SampleValue {
    type Error = String;

    fn try_from((timestamp, raw): (f64, String)) -> Result<Self, Self::Error> {
        let value = raw
            .parse::<f64>()
            .map_err(|e| format!("invalid sample value {raw:?}: {e}"))?;
        Ok(Self { timestamp, value })
    }
}

/// A `[timestamp, "text"]` pair from a `string` result.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "(f64, String)")]
pub struct StringValue {
    pub timestamp: f64,
    pub value: String,
}

impl From<(f64, String)> for StringValue {
    fn from((timestamp, value): (f64, String)) -> Self {
        Self { timestamp, value }
    }
}

// ── LabelSet ─────────────────────────────────────────────────────────

/// Label name → label value, kept sorted by name.
///
/// `Display` renders the canonical Prometheus form, e.g.
/// `http_requests_total{job="api", method="GET"}`. Two label sets with the
/// same pairs always render identically, whatever order they were built in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelSet(BTreeMap<String, String>);

impl LabelSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// The `__name__` label, if present.
    pub fn metric_name(&self) -> Option<&str> {
        self.get(METRIC_NAME_LABEL)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for LabelSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl fmt::Display for LabelSet {
    /// `name{k="v", ...}` with the rendered `k="v"` pairs sorted as
    /// strings, not by label name: `a0="x"` sorts before `a="y"`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut pairs: Vec<String> = self
            .0
            .iter()
            .filter(|(k, _)| k.as_str() != METRIC_NAME_LABEL)
            .map(|(k, v)| format!("{k}={}", quote(v)))
            .collect();

        if pairs.is_empty() {
            return f.write_str(self.metric_name().unwrap_or("{}"));
        }

        pairs.sort_unstable();
        write!(
            f,
            "{}{{{}}}",
            self.metric_name().unwrap_or(""),
            pairs.join(", ")
        )
    }
}

/// Double-quote `raw` with Go `strconv.Quote` escaping: printable
/// characters pass through, the rest become `\x`, `\u` or `\U` escapes.
fn quote(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 2);
    out.push('"');
    for c in raw.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{07}' => out.push_str("\\a"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0C}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{0B}' => out.push_str("\\v"),
            c if is_printable(c) => out.push(c),
            c if u32::from(c) < 0x80 => out.push_str(&format!("\\x{:02x}", u32::from(c))),
            c if u32::from(c) < 0x1_0000 => out.push_str(&format!("\\u{:04x}", u32::from(c))),
            c => out.push_str(&format!("\\U{:08x}", u32::from(c))),
        }
    }
    out.push('"');
    out
}

/// Go's `unicode.IsPrint` for the characters label values carry in
/// practice: controls, separators other than ASCII space, and the common
/// invisible format characters are not printable.
fn is_printable(c: char) -> bool {
    if c == ' ' {
        return true;
    }
    if c.is_control() || c.is_whitespace() {
        return false;
    }
    !matches!(
        c,
        '\u{AD}'
            | '\u{600}'..='\u{605}'
            | '\u{61C}'
            | '\u{6DD}'
            | '\u{70F}'
            | '\u{180E}'
            | '\u{200B}'..='\u{200F}'
            | '\u{202A}'..='\u{202E}'
            | '\u{2060}'..='\u{2064}'
            | '\u{2066}'..='\u{206F}'
            | '\u{E000}'..='\u{F8FF}'
            | '\u{FEFF}'
            | '\u{FFF9}'..='\u{FFFB}'
            | '\u{F0000}'..='\u{10FFFF}'
    )
}
