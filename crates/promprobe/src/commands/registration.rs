//! `registration`: account definitions and supply chain of this probe.

use tabled::Tabled;

use promprobe_core::registration::{self, AccountDefinitionEntry, ProbeInfo, SupplyChainNode};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct AccountDefinitionRow {
    #[tabled(rename = "Field")]
    name: String,
    #[tabled(rename = "Display name")]
    display_name: String,
    #[tabled(rename = "Mandatory")]
    mandatory: bool,
    #[tabled(rename = "Secret")]
    secret: bool,
    #[tabled(rename = "Description")]
    description: String,
}

impl From<&AccountDefinitionEntry> for AccountDefinitionRow {
    fn from(d: &AccountDefinitionEntry) -> Self {
        Self {
            name: d.name.clone(),
            display_name: d.display_name.clone(),
            mandatory: d.mandatory,
            secret: d.is_secret,
            description: d.description.clone(),
        }
    }
}

#[derive(Tabled)]
struct SupplyChainRow {
    #[tabled(rename = "Entity")]
    entity_type: String,
    #[tabled(rename = "Class")]
    template_class: String,
    #[tabled(rename = "Priority")]
    priority: i32,
    #[tabled(rename = "Sells")]
    sells: String,
}

impl From<&SupplyChainNode> for SupplyChainRow {
    fn from(n: &SupplyChainNode) -> Self {
        Self {
            entity_type: n.entity_type.to_string(),
            template_class: n.template_class.to_string(),
            priority: n.priority,
            sells: n
                .sells
                .iter()
                .map(|c| c.commodity_type.to_string())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

pub fn handle(global: &GlobalOpts) -> Result<(), CliError> {
    let info = registration::probe_info();
    let out = output::render_single(&global.output, &info, detail)?;
    output::print_output(&out, global.quiet)?;
    Ok(())
}

fn detail(info: &ProbeInfo) -> String {
    let header = output::detail_lines(&[
        ("Probe category:", info.probe_category.clone()),
        ("Target type:", info.target_type.clone()),
        ("Identity field:", info.identity_field.clone()),
    ]);
    let accounts: Vec<AccountDefinitionRow> =
        info.account_definitions.iter().map(Into::into).collect();
    let chain: Vec<SupplyChainRow> = info.supply_chain.iter().map(Into::into).collect();

    format!(
        "{header}\n\nAccount definitions\n{}\n\nSupply chain\n{}",
        output::render_table(&accounts),
        output::render_table(&chain)
    )
}
