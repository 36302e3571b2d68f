// ── Discovery client ──
//
// Orchestrates one probe operation per call: report account values,
// validate a target, or run a discovery cycle (query + map). Holds only
// the immutable target config and a stateless query handle, so calls can
// overlap freely.

use std::future::Future;
use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info, info_span, Instrument};
use url::Url;

use promprobe_api::transport::{TlsMode, TransportConfig};
use promprobe_api::{Credentials, PrometheusClient};

use crate::config::{BackendAuth, TargetConfig, TlsVerification};
use crate::error::{CoreError, error_chain};
use crate::mapper::{EntityMapper, MappingObserver};
use crate::model::{AccountValue, DiscoveryResponse, TargetInfo, ValidationResponse};
use crate::query::MetricsQuery;
use crate::registration::{PROBE_CATEGORY, TARGET_ID_FIELD, TARGET_TYPE};

// ── ProbeClient ──────────────────────────────────────────────────────

/// The operations the orchestration server invokes on a probe.
pub trait ProbeClient: Send + Sync {
    /// Describe the target this client was configured for.
    fn get_account_values(&self) -> TargetInfo;

    fn validate(
        &self,
        account_values: &[AccountValue],
    ) -> impl Future<Output = ValidationResponse> + Send;

    /// Run one discovery cycle. Never fails: query errors come back as
    /// [`DiscoveryResponse::Failure`].
    fn discover(
        &self,
        account_values: &[AccountValue],
    ) -> impl Future<Output = DiscoveryResponse> + Send;
}

// ── PrometheusDiscoveryClient ────────────────────────────────────────

#[derive(Debug)]
pub struct PrometheusDiscoveryClient<Q = PrometheusClient> {
    config: TargetConfig,
    query: Q,
    mapper: EntityMapper,
}

impl PrometheusDiscoveryClient<PrometheusClient> {
    /// Build the HTTP query client for `config`.
    ///
    /// Fails on an unparseable address or unusable TLS settings; nothing
    /// is sent over the network here.
    pub fn connect(config: TargetConfig) -> Result<Self, CoreError> {
        let base_url = Url::parse(&config.address).map_err(|e| CoreError::Config {
            message: format!("invalid backend address '{}': {e}", config.address),
        })?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(CoreError::Config {
                message: format!(
                    "unsupported scheme '{}' in backend address '{}'",
                    base_url.scheme(),
                    config.address
                ),
            });
        }

        let transport = build_transport(&config);
        let credentials = build_credentials(&config.auth);
        info!(
            address = %config.address,
            auth = credentials.kind(),
            "creating discovery client"
        );

        let query = PrometheusClient::new(base_url, credentials, &transport)?;
        Ok(Self::with_query(config, query))
    }
}

impl<Q: MetricsQuery> PrometheusDiscoveryClient<Q> {
    /// Use an arbitrary query backend.
    pub fn with_query(config: TargetConfig, query: Q) -> Self {
        let mapper = EntityMapper::new(config.mapping.clone());
        Self {
            config,
            query,
            mapper,
        }
    }

    /// Replace the observer that receives samples dropped during mapping.
    pub fn with_observer(mut self, observer: Arc<dyn MappingObserver>) -> Self {
        self.mapper = self.mapper.with_observer(observer);
        self
    }

    pub fn config(&self) -> &TargetConfig {
        &self.config
    }

    /// The underlying query backend.
    pub fn query(&self) -> &Q {
        &self.query
    }
}

impl<Q: MetricsQuery> ProbeClient for PrometheusDiscoveryClient<Q> {
    fn get_account_values(&self) -> TargetInfo {
        TargetInfo {
            probe_category: PROBE_CATEGORY.into(),
            target_type: TARGET_TYPE.into(),
            identity_field: TARGET_ID_FIELD.into(),
            account_values: vec![AccountValue::new(TARGET_ID_FIELD, &self.config.address)],
        }
    }

    async fn validate(&self, account_values: &[AccountValue]) -> ValidationResponse {
        info!(?account_values, "validating target");
        ValidationResponse::default()
    }

    async fn discover(&self, account_values: &[AccountValue]) -> DiscoveryResponse {
        let span = info_span!("discover", address = %self.config.address);

        async move {
            info!(?account_values, "discovering target");
            let query = &self.mapper.profile().query;

            match self.query.instant_query(query, Utc::now()).await {
                Ok(samples) => {
                    let entities = self.mapper.map_samples(&samples);
                    info!(
                        samples = samples.len(),
                        entities = entities.len(),
                        "discovery complete"
                    );
                    DiscoveryResponse::Success { entities }
                }
                Err(e) => {
                    let description = error_chain(&e);
                    error!(error = %description, "error while discovering target");
                    DiscoveryResponse::critical(description)
                }
            }
        }
        .instrument(span)
        .await
    }
}

// ── Helpers ──────────────────────────────────────────────────────────

fn build_transport(config: &TargetConfig) -> TransportConfig {
    let tls = match &config.tls {
        TlsVerification::SystemDefaults => TlsMode::System,
        TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
        TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
    };
    TransportConfig {
        tls,
        timeout: config.timeout,
    }
}

fn build_credentials(auth: &BackendAuth) -> Credentials {
    match auth {
        BackendAuth::None => Credentials::Anonymous,
        BackendAuth::Bearer(token) => Credentials::Bearer {
            token: token.clone(),
        },
        BackendAuth::Basic { username, password } => Credentials::Basic {
            username: username.clone(),
            password: password.clone(),
        },
    }
}
