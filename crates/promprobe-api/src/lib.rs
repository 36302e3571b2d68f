// promprobe-api: Async Rust client for the Prometheus HTTP query API

pub mod auth;
pub mod client;
pub mod error;
pub mod models;
pub mod transport;

pub use auth::Credentials;
pub use client::PrometheusClient;
pub use error::Error;
pub use models::{LabelSet, QueryData, Sample, SampleValue};
pub use transport::{TlsMode, TransportConfig};
