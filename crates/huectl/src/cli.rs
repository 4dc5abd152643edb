//! Clap derive structures for the `huectl` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{ArgGroup, Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// huectl -- find, pair with and switch Philips Hue lights
#[derive(Debug, Parser)]
#[command(
    name = "huectl",
    version,
    about = "Control Philips Hue lights from the command line",
    long_about = "Discover a Hue bridge on the local network, pair with it using the\n\
        link button, then list and switch lights over the CLIP v2 API.\n\n\
        Typical first run:\n  \
        huectl discover\n  \
        huectl register      (after pressing the bridge's link button)\n  \
        huectl list",
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
    /// Path to the config file
    #[arg(long, short = 'c', env = "HUECTL_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Bridge address for this run (not saved)
    #[arg(long, short = 'b', env = "HUECTL_BRIDGE", global = true)]
    pub bridge: Option<String>,

    /// Application key for this run (not saved)
    #[arg(long, env = "HUECTL_APPLICATION_KEY", global = true, hide_env_values = true)]
    pub application_key: Option<String>,

    /// Base URL replacing http(s)://<bridge> for every request
    #[arg(long, env = "HUECTL_BRIDGE_URL", global = true, hide = true)]
    pub bridge_url: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "HUECTL_OUTPUT",
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

    /// Skip TLS certificate verification for bridge requests
    #[arg(long, short = 'k', global = true)]
    pub insecure: bool,

    /// Request timeout in seconds [default: 10]
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
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
    /// Plain text, one value per line (scripting)
    Plain,
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

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Find a bridge on the local network via mDNS and save its address
    Discover(DiscoverArgs),

    /// Pair with the bridge (press its link button first)
    #[command(alias = "pair")]
    Register(RegisterArgs),

    /// List the lights known to the bridge
    #[command(alias = "ls")]
    List,

    /// Switch lights on or off
    #[command(alias = "light")]
    Lights(LightsArgs),

    /// Inspect the CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Discover ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct DiscoverArgs {
    /// Seconds to wait for an advertisement (0 waits until Ctrl-C)
    #[arg(long, short = 'w', default_value = "10")]
    pub wait: u64,
}

// ── Register ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct RegisterArgs {
    /// Device name sent to the bridge as `huectl#<name>`
    #[arg(long, short = 'n')]
    pub device_name: Option<String>,
}

// ── Lights ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct LightsArgs {
    #[command(subcommand)]
    pub command: LightsCommand,
}

#[derive(Debug, Subcommand)]
pub enum LightsCommand {
    /// Turn a light on
    On(LightTarget),

    /// Turn a light off
    Off(LightTarget),
}

/// Which light to act on: a name or an explicit id, never both.
#[derive(Debug, Args)]
#[command(group(
    ArgGroup::new("target")
        .required(true)
        .args(["name", "light_id"])
))]
pub struct LightTarget {
    /// Light name (case-sensitive, exact match)
    pub name: Option<String>,

    /// Light resource id
    #[arg(long)]
    pub light_id: Option<String>,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the saved configuration (keys redacted)
    Show,

    /// Print the config file path
    Path,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
