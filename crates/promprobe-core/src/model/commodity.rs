// ── Commodity domain types ──

use serde::{Deserialize, Serialize};
use strum::Display;

use super::entity::EntityType;
use crate::error::BuildError;

/// Kind of resource a commodity represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum CommodityType {
    ResponseTime,
}

/// A typed, quantified resource. `capacity` is the upper bound,
/// `used` the current consumption; units are implied by the type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Commodity {
    pub commodity_type: CommodityType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub used: Option<f64>,
}

/// Commodities an entity buys from one provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommodityBought {
    pub provider_type: EntityType,
    pub provider_id: String,
    pub bought: Vec<Commodity>,
}

/// Builder for [`Commodity`]. Validation happens in [`create`](Self::create).
#[derive(Debug, Clone)]
pub struct CommodityBuilder {
    commodity: Commodity,
}

impl CommodityBuilder {
    pub fn new(commodity_type: CommodityType) -> Self {
        Self {
            commodity: Commodity {
                commodity_type,
                key: None,
                capacity: None,
                used: None,
            },
        }
    }

    pub fn capacity(mut self, capacity: f64) -> Self {
        self.commodity.capacity = Some(capacity);
        self
    }

    pub fn used(mut self, used: f64) -> Self {
        self.commodity.used = Some(used);
        self
    }

    /// Rejects non-finite amounts and negative capacities.
    pub fn create(self) -> Result<Commodity, BuildError> {
        let c = self.commodity;
        let name = || c.commodity_type.to_string();

        if let Some(capacity) = c.capacity {
            if !capacity.is_finite() {
                return Err(BuildError::NonFinite {
                    commodity: name(),
                    field: "capacity",
                    value: capacity,
                });
            }
            if capacity < 0.0 {
                return Err(BuildError::NegativeCapacity {
                    commodity: name(),
                    value: capacity,
                });
            }
        }
        if let Some(used) = c.used.filter(|u| !u.is_finite()) {
            return Err(BuildError::NonFinite {
                commodity: name(),
                field: "used",
                value: used,
            });
        }
        Ok(c)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn builds_response_time_commodity() {
        let c = CommodityBuilder::new(CommodityType::ResponseTime)
            .capacity(100.0)
            .used(12.5)
            .create()
            .unwrap();
        assert_eq!(c.commodity_type, CommodityType::ResponseTime);
        assert_eq!(c.capacity, Some(100.0));
        assert_eq!(c.used, Some(12.5));
        assert!(c.key.is_none());
    }

    #[test]
    fn rejects_nan_used() {
        let err = CommodityBuilder::new(CommodityType::ResponseTime)
            .capacity(100.0)
            .used(f64::NAN)
            .create()
            .unwrap_err();
        assert!(matches!(err, BuildError::NonFinite { field: "used", .. }));
    }

    #[test]
    fn rejects_negative_capacity() {
        let err = CommodityBuilder::new(CommodityType::ResponseTime)
            .capacity(-1.0)
            .create()
            .unwrap_err();
        assert!(matches!(err, BuildError::NegativeCapacity { .. }));
    }

    #[test]
    fn commodity_type_wire_name() {
        assert_eq!(CommodityType::ResponseTime.to_string(), "RESPONSE_TIME");
        assert_eq!(
            serde_json::to_value(CommodityType::ResponseTime).unwrap(),
            "RESPONSE_TIME"
        );
    }
}
