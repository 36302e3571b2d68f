//! Clap derive structures for the `promprobe` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// promprobe -- discover application topology from Prometheus metrics
#[derive(Debug, Parser)]
#[command(
    name = "promprobe",
    version,
    about = "Discover application topology from a Prometheus server",
    long_about = "Runs the probe operations of a Prometheus discovery adapter from the\n\
        command line: report account values, validate a target, and run a\n\
        discovery cycle that maps an instant query to APPLICATION entities.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Target config file (TOML or JSON)
    #[arg(long, short = 'f', env = "PROMPROBE_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Prometheus address (overrides the config file)
    #[arg(long, short = 'a', env = "PROMPROBE_ADDRESS", global = true)]
    pub address: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "PROMPROBE_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "PROMPROBE_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (default: none)
    #[arg(long, env = "PROMPROBE_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Commands ─────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the account values identifying the configured target
    #[command(alias = "info")]
    TargetInfo,

    /// Validate the configured target
    Validate,

    /// Run one discovery cycle and print the result
    #[command(alias = "disco")]
    Discover(DiscoverArgs),

    /// Show the account definitions and supply chain announced at registration
    #[command(alias = "reg")]
    Registration,

    /// Manage the target configuration file
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Debug, Args)]
pub struct DiscoverArgs {
    /// Exit with code 3 when discovery reports an error
    #[arg(long)]
    pub fail_on_error: bool,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Write a config file for the target given by --address
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Show the effective configuration (secrets redacted)
    Show,

    /// Print the config file path
    Path,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
