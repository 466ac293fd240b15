//! CLI flag overrides layered on top of the loaded configuration.
//!
//! `airlines-config` does file + env; this module applies `GlobalOpts`
//! and resolves the output settings the commands render with.

use std::path::PathBuf;

use clap::ValueEnum;

use airlines_config::{Config, SourceKind};

use crate::cli::{ColorMode, GlobalOpts, OutputFormat, SourceArg};
use crate::error::CliError;
use crate::output;

/// Config file path: `--config` / `AIRLINES_CONFIG`, else the platform default.
pub fn config_path(global: &GlobalOpts) -> PathBuf {
    global
        .config
        .clone()
        .unwrap_or_else(airlines_config::config_path)
}

/// Load the config and apply source flags from the command line.
pub fn resolve(global: &GlobalOpts) -> Result<Config, CliError> {
    let mut cfg = airlines_config::load_config(global.config.as_deref())?;
    apply_overrides(&mut cfg, global)?;
    tracing::debug!(kind = ?cfg.source.kind, "resolved configuration");
    Ok(cfg)
}

fn apply_overrides(cfg: &mut Config, global: &GlobalOpts) -> Result<(), CliError> {
    let kind = match (global.source, &global.asset, &global.url) {
        (Some(SourceArg::Asset), _, _) => Some(SourceKind::Asset),
        (Some(SourceArg::Remote), _, _) => Some(SourceKind::Remote),
        (None, Some(_), Some(_)) => {
            return Err(CliError::Validation {
                field: "--source".into(),
                reason: "both --asset and --url given; pick one with --source".into(),
            });
        }
        (None, Some(_), None) => Some(SourceKind::Asset),
        (None, None, Some(_)) => Some(SourceKind::Remote),
        (None, None, None) => None,
    };

    if let Some(kind) = kind {
        cfg.source.kind = kind;
    }
    if let Some(ref path) = global.asset {
        cfg.source.asset_path = Some(path.clone());
    }
    if let Some(ref url) = global.url {
        cfg.source.base_url = Some(url.clone());
    }
    if let Some(timeout) = global.timeout {
        cfg.source.timeout_secs = timeout;
    }
    if global.insecure {
        cfg.source.insecure = true;
    }

    cfg.validate()?;
    Ok(())
}

/// How command output should look.
#[derive(Debug, Clone, Copy)]
pub struct Presentation {
    pub format: OutputFormat,
    pub color: bool,
    pub quiet: bool,
}

impl Presentation {
    /// Flags win; otherwise `[defaults]` from the config, then built-ins.
    pub fn resolve(global: &GlobalOpts, cfg: &Config) -> Self {
        let format = global
            .output
            .or_else(|| OutputFormat::from_str(&cfg.defaults.output, true).ok())
            .unwrap_or(OutputFormat::Table);
        let color = global
            .color
            .or_else(|| ColorMode::from_str(&cfg.defaults.color, true).ok())
            .unwrap_or(ColorMode::Auto);

        Self {
            format,
            color: output::should_color(color),
            quiet: global.quiet,
        }
    }
}
