//! Discovery logic between `promprobe-api` and the orchestration server.
//!
//! - **[`PrometheusDiscoveryClient`]** -- implements [`ProbeClient`]:
//!   account values, target validation, and discovery cycles. Query
//!   failures are reported in-band as [`DiscoveryResponse::Failure`].
//!
//! - **[`EntityMapper`]** -- maps an instant vector to APPLICATION entities,
//!   one per sample, dropping (and reporting to a [`MappingObserver`]) any
//!   sample whose entity cannot be built.
//!
//! - **[`MetricsQuery`]** -- the query seam; implemented for
//!   [`promprobe_api::PrometheusClient`].
//!
//! - **Domain model** ([`model`]) and **registration data**
//!   ([`registration`]).

pub mod config;
pub mod discovery;
pub mod error;
pub mod mapper;
pub mod model;
pub mod query;
pub mod registration;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{BackendAuth, TargetConfig, TlsVerification};
pub use discovery::{ProbeClient, PrometheusDiscoveryClient};
pub use error::{BuildError, CoreError};
pub use mapper::{DroppedSample, EntityMapper, MappingObserver, MappingProfile, TracingObserver};
pub use query::MetricsQuery;

pub use model::{
    AccountValue, ApplicationData, Commodity, CommodityBought, CommodityType, DiscoveryResponse,
    Entity, EntityProperty, EntityType, ErrorDescriptor, ErrorSeverity, TargetInfo,
    ValidationResponse,
};

pub use promprobe_api::{LabelSet, Sample};
