//! Target resolution: config file + env, then CLI flag overrides.

use std::path::PathBuf;

use promprobe_config::{TargetConf, load_target_conf, to_target_config};
use promprobe_core::TargetConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// The file `--config` points at, or the platform default.
pub fn config_file(global: &GlobalOpts) -> PathBuf {
    global
        .config
        .clone()
        .unwrap_or_else(promprobe_config::config_path)
}

/// Load the target description and apply `--address`, `--insecure`,
/// and `--timeout` on top of it.
pub fn resolve_conf(global: &GlobalOpts) -> Result<TargetConf, CliError> {
    let mut conf = load_target_conf(global.config.as_deref())?;

    if let Some(ref address) = global.address {
        conf.address.clone_from(address);
    }
    if global.insecure {
        conf.insecure = true;
    }
    if global.timeout.is_some() {
        conf.timeout = global.timeout;
    }

    if conf.address.trim().is_empty() {
        return Err(CliError::NoConfig {
            path: config_file(global).display().to_string(),
        });
    }
    Ok(conf)
}

/// Build the core `TargetConfig` the discovery client is created from.
pub fn resolve_target(global: &GlobalOpts) -> Result<TargetConfig, CliError> {
    let conf = resolve_conf(global)?;
    Ok(to_target_config(&conf)?)
}
