//! `config`: write, inspect and locate the target config file.

use promprobe_config::{TargetConf, save_target_conf, to_target_config};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output;

const REDACTED: &str = "********";

pub fn handle(args: &ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Init { force } => init(force, global),

        ConfigCommand::Show => {
            let conf = redact(config::resolve_conf(global)?);
            let out = output::render_single(&global.output, &conf, detail)?;
            output::print_output(&out, global.quiet)?;
            Ok(())
        }

        ConfigCommand::Path => {
            let path = config::config_file(global).display().to_string();
            output::print_output(&path, global.quiet)
        }
    }
}

fn init(force: bool, global: &GlobalOpts) -> Result<(), CliError> {
    let path = config::config_file(global);
    if path.exists() && !force {
        return Err(CliError::ConfigExists {
            path: path.display().to_string(),
        });
    }

    let address = global.address.clone().ok_or_else(|| CliError::Validation {
        field: "address".into(),
        reason: "pass --address with the Prometheus URL to write".into(),
    })?;
    let conf = TargetConf {
        address,
        insecure: global.insecure,
        timeout: global.timeout,
        ..TargetConf::default()
    };
    to_target_config(&conf)?;

    save_target_conf(&path, &conf)?;
    tracing::info!(path = %path.display(), "wrote target config");
    if !global.quiet {
        eprintln!("Wrote {}", path.display());
    }
    Ok(())
}

fn redact(mut conf: TargetConf) -> TargetConf {
    if conf.bearer_token.is_some() {
        conf.bearer_token = Some(REDACTED.into());
    }
    if conf.password.is_some() {
        conf.password = Some(REDACTED.into());
    }
    conf
}

fn detail(conf: &TargetConf) -> String {
    let opt = |v: Option<String>| v.unwrap_or_else(|| "-".into());
    output::detail_lines(&[
        ("Address:", conf.address.clone()),
        ("Insecure:", conf.insecure.to_string()),
        (
            "CA cert:",
            opt(conf.ca_cert.as_ref().map(|p| p.display().to_string())),
        ),
        ("Timeout:", opt(conf.timeout.map(|t| format!("{t}s")))),
        ("Bearer token:", opt(conf.bearer_token.clone())),
        ("Token env:", opt(conf.bearer_token_env.clone())),
        ("Username:", opt(conf.username.clone())),
        ("Password:", opt(conf.password.clone())),
        ("Query:", opt(conf.query.clone())),
        ("Entity IP:", opt(conf.entity_ip_address.clone())),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secrets_are_redacted() {
        let conf = redact(TargetConf {
            address: "http://prom:9090".into(),
            bearer_token: Some("s3cr3t".into()),
            password: Some("pw".into()),
            username: Some("probe".into()),
            ..TargetConf::default()
        });
        assert_eq!(conf.bearer_token.as_deref(), Some(REDACTED));
        assert_eq!(conf.password.as_deref(), Some(REDACTED));
        assert_eq!(conf.username.as_deref(), Some("probe"));
    }

    #[test]
    fn absent_secrets_stay_absent() {
        let conf = redact(TargetConf::default());
        assert!(conf.bearer_token.is_none());
        assert!(conf.password.is_none());
    }
}
