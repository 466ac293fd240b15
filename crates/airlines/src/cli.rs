//! Clap derive structures for the `airlines` CLI.
//!
//! Shared with build.rs for man page generation, so this module may only
//! depend on clap, clap_complete and humantime.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// airlines -- browse an airline directory, online-aware
#[derive(Debug, Parser)]
#[command(
    name = "airlines",
    version,
    about = "Browse an airline directory from the command line",
    long_about = "List, search and inspect airlines from a bundled JSON document or a\n\
        remote endpoint. `watch` keeps the list live and refetches when\n\
        connectivity comes back.",
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
    /// Config file (defaults to the platform config directory)
    #[arg(long, env = "AIRLINES_CONFIG", global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Where airline data comes from (overrides config)
    #[arg(long, global = true)]
    pub source: Option<SourceArg>,

    /// JSON document to read instead of the bundled one
    #[arg(long, global = true, value_name = "PATH")]
    pub asset: Option<PathBuf>,

    /// Remote base URL; data is fetched from `<URL>/airlines.json`
    #[arg(long, global = true, value_name = "URL")]
    pub url: Option<String>,

    /// Remote request timeout in seconds
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Accept invalid TLS certificates from the remote endpoint
    #[arg(long, short = 'k', global = true)]
    pub insecure: bool,

    /// Output format (defaults to config, then `table`)
    #[arg(long, short = 'o', global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output
    #[arg(long, global = true)]
    pub color: Option<ColorMode>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

// ── Value Enums ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SourceArg {
    /// Local or bundled JSON document
    Asset,
    /// Remote HTTP endpoint
    Remote,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one id per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
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
    /// List airlines, optionally filtered by name or country
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show one airline in detail
    Show(ShowArgs),

    /// Keep the list live, refetching whenever connectivity returns
    Watch(WatchArgs),

    /// Inspect or create the configuration file
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Case-insensitive match on name or country
    #[arg(long, short = 's')]
    pub search: Option<String>,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Airline id (e.g. `LH`)
    pub id: String,
}

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Case-insensitive match on name or country
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Pause between going online and fetching (e.g. `500ms`, `0s`)
    #[arg(long, value_name = "DURATION")]
    pub settle: Option<humantime::Duration>,

    /// Skip connectivity probing and treat the host as online
    #[arg(long, conflicts_with_all = ["probe", "interval"])]
    pub assume_online: bool,

    /// Exit after the first loaded list (or load error)
    #[arg(long)]
    pub once: bool,

    /// `host:port` used to probe connectivity
    #[arg(long, value_name = "ADDR")]
    pub probe: Option<String>,

    /// Pause between connectivity probes (e.g. `5s`)
    #[arg(long, value_name = "DURATION")]
    pub interval: Option<humantime::Duration>,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Display the merged configuration (defaults, file, environment)
    Show,

    /// Print the config file location
    Path,

    /// Write a config file populated with defaults
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
