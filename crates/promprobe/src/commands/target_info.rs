//! `target-info`: the account values identifying the configured target.

use tabled::Tabled;

use promprobe_core::{AccountValue, ProbeClient, TargetInfo};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct AccountValueRow {
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Value")]
    value: String,
}

impl From<&AccountValue> for AccountValueRow {
    fn from(v: &AccountValue) -> Self {
        Self {
            key: v.key.clone(),
            value: v.string_value.clone(),
        }
    }
}

pub fn handle(client: &impl ProbeClient, global: &GlobalOpts) -> Result<(), CliError> {
    let info = client.get_account_values();
    let out = output::render_single(&global.output, &info, detail)?;
    output::print_output(&out, global.quiet)?;
    Ok(())
}

fn detail(info: &TargetInfo) -> String {
    let header = output::detail_lines(&[
        ("Probe category:", info.probe_category.clone()),
        ("Target type:", info.target_type.clone()),
        ("Identity field:", info.identity_field.clone()),
    ]);
    let rows: Vec<AccountValueRow> = info.account_values.iter().map(Into::into).collect();
    format!("{header}\n\n{}", output::render_table(&rows))
}
