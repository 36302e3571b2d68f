// ── Probe registration data ──
//
// Static identity of this probe as announced to the orchestration server:
// category, target type, the account fields a target is created from, and
// the supply chain the discovered entities belong to.

use serde::{Deserialize, Serialize};
use strum::Display;

use crate::model::{CommodityType, EntityType};

pub const PROBE_CATEGORY: &str = "Custom";
pub const TARGET_TYPE: &str = "Prometheus";
pub const TARGET_ID_FIELD: &str = "targetIdentifier";

/// One field the user fills in when adding a target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountDefinitionEntry {
    pub name: String,
    pub display_name: String,
    pub description: String,
    pub verification_regex: String,
    pub mandatory: bool,
    pub is_secret: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TemplateClass {
    Supplier,
}

/// A commodity slot in a supply chain template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateCommodity {
    pub commodity_type: CommodityType,
    /// Whether instances of this commodity carry a key.
    pub has_key: bool,
}

/// One node of the supply chain this probe contributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplyChainNode {
    pub template_class: TemplateClass,
    pub entity_type: EntityType,
    pub priority: i32,
    pub sells: Vec<TemplateCommodity>,
}

/// Everything announced at registration time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbeInfo {
    pub probe_category: String,
    pub target_type: String,
    pub identity_field: String,
    pub account_definitions: Vec<AccountDefinitionEntry>,
    pub supply_chain: Vec<SupplyChainNode>,
}

pub fn account_definitions() -> Vec<AccountDefinitionEntry> {
    vec![AccountDefinitionEntry {
        name: TARGET_ID_FIELD.into(),
        display_name: "Address".into(),
        description: "URL of the Prometheus server".into(),
        verification_regex: ".*".into(),
        mandatory: true,
        is_secret: false,
    }]
}

/// Applications selling response time; nothing bought.
pub fn supply_chain() -> Vec<SupplyChainNode> {
    vec![SupplyChainNode {
        template_class: TemplateClass::Supplier,
        entity_type: EntityType::Application,
        priority: 0,
        sells: vec![TemplateCommodity {
            commodity_type: CommodityType::ResponseTime,
            has_key: false,
        }],
    }]
}

pub fn probe_info() -> ProbeInfo {
    ProbeInfo {
        probe_category: PROBE_CATEGORY.into(),
        target_type: TARGET_TYPE.into(),
        identity_field: TARGET_ID_FIELD.into(),
        account_definitions: account_definitions(),
        supply_chain: supply_chain(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_field_is_a_mandatory_account_definition() {
        let defs = account_definitions();
        let id = defs.iter().find(|d| d.name == TARGET_ID_FIELD);
        assert!(id.is_some_and(|d| d.mandatory && !d.is_secret));
    }

    #[test]
    fn supply_chain_covers_mapped_entities() {
        let chain = supply_chain();
        assert_eq!(chain.len(), 1);
        assert_eq!(chain[0].entity_type, EntityType::Application);
        assert!(
            chain[0]
                .sells
                .iter()
                .any(|c| c.commodity_type == CommodityType::ResponseTime)
        );
    }
}
