// ── Sample-to-entity mapping ──
//
// Turns an instant vector into APPLICATION entities, one per sample.
// Each sample is mapped independently: a sample whose entity cannot be
// built is reported to the `MappingObserver` and left out, and the rest
// of the vector is still mapped. The mapper itself never fails.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use promprobe_api::Sample;

use crate::error::BuildError;
use crate::model::{
    ApplicationData, CommodityBuilder, CommodityType, Entity, EntityBuilder, EntityType,
};

/// Response time in milliseconds from the navigation timing exporter.
pub const DEFAULT_QUERY: &str =
    "(navigation_timing_response_end_seconds-navigation_timing_request_start_seconds)*1000";
pub const DEFAULT_APP_TYPE: &str = "webdriver";
/// Placeholder address attached to every entity until per-target
/// resolution exists.
pub const DEFAULT_IP_ADDRESS: &str = "10.10.174.90";
pub const RESPONSE_TIME_CAPACITY: f64 = 100.0;
pub const PROPERTY_NAMESPACE: &str = "DEFAULT";
pub const IP_ADDRESS_PROPERTY: &str = "ipAddress";

// ── MappingProfile ───────────────────────────────────────────────────

/// The fixed inputs of a mapping pass.
#[derive(Debug, Clone, PartialEq)]
pub struct MappingProfile {
    /// Expression evaluated each discovery cycle.
    pub query: String,
    /// `applicationData.type` of every entity.
    pub app_type: String,
    /// Address reported in `applicationData` and the IP property.
    pub ip_address: String,
    /// Capacity of the response-time commodity.
    pub capacity: f64,
}

impl Default for MappingProfile {
    fn default() -> Self {
        Self {
            query: DEFAULT_QUERY.into(),
            app_type: DEFAULT_APP_TYPE.into(),
            ip_address: DEFAULT_IP_ADDRESS.into(),
            capacity: RESPONSE_TIME_CAPACITY,
        }
    }
}

// ── Observer ─────────────────────────────────────────────────────────

/// A sample left out of the mapping result.
#[derive(Debug, Clone, PartialEq)]
pub struct DroppedSample {
    /// Position in the query result.
    pub index: usize,
    /// Canonical labelset rendering.
    pub labels: String,
    pub value: f64,
    pub reason: BuildError,
}

/// Receives per-sample mapping failures.
pub trait MappingObserver: Send + Sync {
    fn sample_dropped(&self, dropped: &DroppedSample);
}

/// Default observer: one structured warning per dropped sample.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl MappingObserver for TracingObserver {
    fn sample_dropped(&self, dropped: &DroppedSample) {
        warn!(
            index = dropped.index,
            labels = %dropped.labels,
            value = dropped.value,
            reason = %dropped.reason,
            "dropping sample: entity could not be built"
        );
    }
}

// ── EntityMapper ─────────────────────────────────────────────────────

#[derive(Clone)]
pub struct EntityMapper {
    profile: MappingProfile,
    observer: Arc<dyn MappingObserver>,
}

impl fmt::Debug for EntityMapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityMapper")
            .field("profile", &self.profile)
            .finish_non_exhaustive()
    }
}

impl EntityMapper {
    pub fn new(profile: MappingProfile) -> Self {
        Self {
            profile,
            observer: Arc::new(TracingObserver),
        }
    }

    /// Replace the observer that receives dropped samples.
    pub fn with_observer(mut self, observer: Arc<dyn MappingObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn profile(&self) -> &MappingProfile {
        &self.profile
    }

    /// Build the entity for one sample.
    ///
    /// Identity and display name are the canonical labelset rendering, so
    /// equal labelsets always yield equal ids.
    pub fn build_entity(&self, sample: &Sample) -> Result<Entity, BuildError> {
        let p = &self.profile;

        let response_time = CommodityBuilder::new(CommodityType::ResponseTime)
            .capacity(p.capacity)
            .used(sample.value.value)
            .create()?;

        let id = sample.metric.to_string();

        EntityBuilder::new(EntityType::Application, id.clone())
            .display_name(id)
            .sells_commodity(response_time)
            .application_data(ApplicationData {
                app_type: p.app_type.clone(),
                ip_address: p.ip_address.clone(),
            })
            .with_property(PROPERTY_NAMESPACE, IP_ADDRESS_PROPERTY, p.ip_address.clone())
            .create()
    }

    /// Map every sample, dropping (and reporting) the ones that fail.
    pub fn map_samples(&self, samples: &[Sample]) -> Vec<Entity> {
        let mut entities = Vec::with_capacity(samples.len());

        for (index, sample) in samples.iter().enumerate() {
            match self.build_entity(sample) {
                Ok(entity) => entities.push(entity),
                Err(reason) => self.observer.sample_dropped(&DroppedSample {
                    index,
                    labels: sample.metric.to_string(),
                    value: sample.value.value,
                    reason,
                }),
            }
        }

        debug!(
            samples = samples.len(),
            entities = entities.len(),
            "mapped query result"
        );
        entities
    }
}
