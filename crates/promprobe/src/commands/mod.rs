//! Command dispatch: bridges CLI args -> probe operations -> output formatting.

pub mod config_cmd;
pub mod discover;
pub mod registration;
pub mod target_info;
pub mod validate;

use promprobe_core::ProbeClient;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a target-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    client: &impl ProbeClient,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::TargetInfo => target_info::handle(client, global),
        Command::Validate => validate::handle(client, global).await,
        Command::Discover(args) => discover::handle(client, &args, global).await,
        // Registration, Config and Completions are handled before dispatch
        Command::Registration | Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
