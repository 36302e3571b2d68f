// ── Domain model ──
//
// Topology entities, the commodities they trade, and the probe protocol
// messages that carry them.

pub mod commodity;
pub mod entity;
pub mod probe;

pub use commodity::{Commodity, CommodityBought, CommodityBuilder, CommodityType};
pub use entity::{ApplicationData, Entity, EntityBuilder, EntityProperty, EntityType};
pub use probe::{
    AccountValue, DiscoveryResponse, ErrorDescriptor, ErrorSeverity, TargetInfo,
    ValidationResponse,
};
