//! `validate`: ask the probe whether the configured target is usable.

use promprobe_core::{ProbeClient, ValidationResponse};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

pub async fn handle(client: &impl ProbeClient, global: &GlobalOpts) -> Result<(), CliError> {
    let info = client.get_account_values();
    let resp = client.validate(&info.account_values).await;

    let color = output::should_color(&global.color);
    let out = output::render_single(&global.output, &resp, |r| detail(r, color))?;
    output::print_output(&out, global.quiet)?;
    Ok(())
}

fn detail(resp: &ValidationResponse, color: bool) -> String {
    if resp.is_valid() {
        return output::ok_text("Target is valid", color);
    }
    let mut lines = vec![output::error_text("Target is invalid", color)];
    lines.extend(
        resp.errors
            .iter()
            .map(|e| format!("  {}: {}", e.severity, e.description)),
    );
    lines.join("\n")
}
