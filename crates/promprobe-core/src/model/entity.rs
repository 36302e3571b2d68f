// ── Topology entity types ──
//
// The vendor-neutral shape reported to the orchestration server. Field
// names serialize in camelCase to match the server's external schema.

use serde::{Deserialize, Serialize};
use strum::Display;

use super::commodity::{Commodity, CommodityBought};
use crate::error::BuildError;

/// Kind of topology node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityType {
    Application,
}

/// Application-specific payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationData {
    /// Protocol / application type tag.
    #[serde(rename = "type")]
    pub app_type: String,
    pub ip_address: String,
}

/// A namespaced `name = value` property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityProperty {
    pub namespace: String,
    pub name: String,
    pub value: String,
}

/// A discovered topology node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    pub entity_type: EntityType,
    pub id: String,
    pub display_name: String,
    #[serde(default)]
    pub sells: Vec<Commodity>,
    /// Always empty for discovered entities.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub buys: Vec<CommodityBought>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_data: Option<ApplicationData>,
    #[serde(default)]
    pub properties: Vec<EntityProperty>,
}

/// Builder for [`Entity`].
///
/// `display_name` falls back to the id when never set.
#[derive(Debug, Clone)]
pub struct EntityBuilder {
    entity_type: EntityType,
    id: String,
    display_name: Option<String>,
    sells: Vec<Commodity>,
    application_data: Option<ApplicationData>,
    properties: Vec<EntityProperty>,
}

impl EntityBuilder {
    pub fn new(entity_type: EntityType, id: impl Into<String>) -> Self {
        Self {
            entity_type,
            id: id.into(),
            display_name: None,
            sells: Vec::new(),
            application_data: None,
            properties: Vec::new(),
        }
    }

    pub fn display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn sells_commodity(mut self, commodity: Commodity) -> Self {
        self.sells.push(commodity);
        self
    }

    pub fn application_data(mut self, data: ApplicationData) -> Self {
        self.application_data = Some(data);
        self
    }

    pub fn with_property(
        mut self,
        namespace: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.properties.push(EntityProperty {
            namespace: namespace.into(),
            name: name.into(),
            value: value.into(),
        });
        self
    }

    pub fn create(self) -> Result<Entity, BuildError> {
        if self.id.trim().is_empty() {
            return Err(BuildError::EmptyId);
        }
        Ok(Entity {
            entity_type: self.entity_type,
            display_name: self.display_name.unwrap_or_else(|| self.id.clone()),
            id: self.id,
            sells: self.sells,
            buys: Vec::new(),
            application_data: self.application_data,
            properties: self.properties,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn display_name_defaults_to_id() {
        let entity = EntityBuilder::new(EntityType::Application, "app-1")
            .create()
            .unwrap();
        assert_eq!(entity.display_name, "app-1");
    }

    #[test]
    fn empty_id_is_rejected() {
        let err = EntityBuilder::new(EntityType::Application, "  ")
            .create()
            .unwrap_err();
        assert_eq!(err, BuildError::EmptyId);
    }

    #[test]
    fn serializes_in_external_schema() {
        let entity = EntityBuilder::new(EntityType::Application, "{page=\"/\"}")
            .application_data(ApplicationData {
                app_type: "webdriver".into(),
                ip_address: "10.0.0.1".into(),
            })
            .create()
            .unwrap();
        let json = serde_json::to_value(&entity).unwrap();
        assert_eq!(json["entityType"], "APPLICATION");
        assert_eq!(json["displayName"], "{page=\"/\"}");
        assert_eq!(json["applicationData"]["type"], "webdriver");
        assert_eq!(json["applicationData"]["ipAddress"], "10.0.0.1");
        assert!(json.get("buys").is_none());
    }
}
