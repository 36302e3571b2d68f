//! `discover`: run one discovery cycle and print the entities or errors.
//!
//! A failed cycle is still a successful command: the failure is part of
//! the response. `--fail-on-error` turns it into exit code 3.

use tabled::Tabled;

use promprobe_core::{DiscoveryResponse, Entity, ErrorDescriptor, ProbeClient};

use crate::cli::{DiscoverArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct EntityRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Type")]
    entity_type: String,
    #[tabled(rename = "Response time")]
    used: String,
    #[tabled(rename = "Capacity")]
    capacity: String,
    #[tabled(rename = "IP")]
    ip_address: String,
}

impl From<&Entity> for EntityRow {
    fn from(e: &Entity) -> Self {
        let commodity = e.sells.first();
        Self {
            id: e.id.clone(),
            entity_type: e.entity_type.to_string(),
            used: fmt_value(commodity.and_then(|c| c.used)),
            capacity: fmt_value(commodity.and_then(|c| c.capacity)),
            ip_address: e
                .application_data
                .as_ref()
                .map_or_else(|| "-".into(), |d| d.ip_address.clone()),
        }
    }
}

#[derive(Tabled)]
struct ErrorRow {
    #[tabled(rename = "Severity")]
    severity: String,
    #[tabled(rename = "Description")]
    description: String,
}

impl From<&ErrorDescriptor> for ErrorRow {
    fn from(e: &ErrorDescriptor) -> Self {
        Self {
            severity: e.severity.to_string(),
            description: e.description.clone(),
        }
    }
}

fn fmt_value(v: Option<f64>) -> String {
    v.map_or_else(|| "-".into(), |v| format!("{v:.2}"))
}

pub async fn handle(
    client: &impl ProbeClient,
    args: &DiscoverArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let info = client.get_account_values();
    let resp = client.discover(&info.account_values).await;

    let color = output::should_color(&global.color);
    let out = output::render_single(&global.output, &resp, |r| detail(r, color))?;
    output::print_output(&out, global.quiet)?;

    if args.fail_on_error && !resp.is_success() {
        return Err(CliError::DiscoveryFailed {
            description: resp
                .errors()
                .iter()
                .map(|e| e.description.as_str())
                .collect::<Vec<_>>()
                .join("; "),
        });
    }
    Ok(())
}

fn detail(resp: &DiscoveryResponse, color: bool) -> String {
    match resp {
        DiscoveryResponse::Success { entities } if entities.is_empty() => {
            output::ok_text("No entities discovered", color)
        }
        DiscoveryResponse::Success { entities } => {
            let rows: Vec<EntityRow> = entities.iter().map(Into::into).collect();
            format!(
                "{}\n{}",
                output::ok_text(&format!("Discovered {} entities", entities.len()), color),
                output::render_table(&rows)
            )
        }
        DiscoveryResponse::Failure { errors } => {
            let rows: Vec<ErrorRow> = errors.iter().map(Into::into).collect();
            format!(
                "{}\n{}",
                output::error_text("Discovery failed", color),
                output::render_table(&rows)
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use promprobe_core::model::{
        ApplicationData, CommodityBuilder, CommodityType, EntityBuilder, EntityType,
    };

    use super::*;

    #[test]
    fn failure_detail_lists_each_error() {
        let text = detail(&DiscoveryResponse::critical("connection refused"), false);
        assert!(text.starts_with("Discovery failed"));
        assert!(text.contains("CRITICAL"));
        assert!(text.contains("connection refused"));
    }

    #[test]
    fn empty_success_has_a_message() {
        let text = detail(&DiscoveryResponse::Success { entities: vec![] }, false);
        assert_eq!(text, "No entities discovered");
    }

    #[test]
    fn entity_row_shows_response_time() -> Result<(), promprobe_core::BuildError> {
        let entity = EntityBuilder::new(EntityType::Application, r#"{page="/"}"#)
            .sells_commodity(
                CommodityBuilder::new(CommodityType::ResponseTime)
                    .capacity(100.0)
                    .used(12.5)
                    .create()?,
            )
            .application_data(ApplicationData {
                app_type: "webdriver".into(),
                ip_address: "10.10.174.90".into(),
            })
            .create()?;

        let row = EntityRow::from(&entity);
        assert_eq!(row.entity_type, "APPLICATION");
        assert_eq!(row.used, "12.50");
        assert_eq!(row.capacity, "100.00");
        assert_eq!(row.ip_address, "10.10.174.90");
        Ok(())
    }
}
