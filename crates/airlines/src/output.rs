//! Output formatting: table, JSON, YAML, plain.
//!
//! Renders data in the format selected by `--output`. Table uses `tabled`,
//! structured formats use serde, plain emits one identifier per line.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use tabled::{Table, Tabled, settings::Style};

use airlines_core::{Airline, ListView, OFFLINE_MESSAGE};

use crate::cli::{ColorMode, OutputFormat};
use crate::config::Presentation;
use crate::error::CliError;

/// Shown instead of an empty table.
pub const NO_RESULTS: &str = "No airlines found.";

/// Determine whether color output should be enabled.
pub fn should_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none(),
    }
}

/// Formats meant for machines rather than terminals.
pub fn is_structured(format: OutputFormat) -> bool {
    matches!(
        format,
        OutputFormat::Json | OutputFormat::JsonCompact | OutputFormat::Yaml
    )
}

// ── Rows ─────────────────────────────────────────────────────────────

#[derive(Tabled)]
struct AirlineRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Country")]
    country: String,
    #[tabled(rename = "Headquarters")]
    headquarters: String,
    #[tabled(rename = "Fleet")]
    fleet_size: u32,
}

impl From<&Airline> for AirlineRow {
    fn from(a: &Airline) -> Self {
        Self {
            id: a.id.clone(),
            name: a.name.clone(),
            country: a.country.clone(),
            headquarters: a.headquarters.clone(),
            fleet_size: a.fleet_size,
        }
    }
}

fn airline_detail(a: &Airline, color: bool) -> String {
    let title = if color {
        format!("{} ({})", a.name.bold(), a.id.cyan())
    } else {
        format!("{} ({})", a.name, a.id)
    };
    [
        title,
        format!("  Country:      {}", a.country),
        format!("  Headquarters: {}", a.headquarters),
        format!("  Fleet size:   {}", a.fleet_size),
        format!("  Website:      {}", a.website),
        format!("  Logo:         {}", a.logo_url),
    ]
    .join("\n")
}

// ── Render dispatchers ───────────────────────────────────────────────

/// Render an airline list in the chosen format.
///
/// Table and plain formats print [`NO_RESULTS`] for an empty list;
/// structured formats emit an empty array.
pub fn render_airlines(format: OutputFormat, data: &[Airline]) -> Result<String, CliError> {
    match format {
        OutputFormat::Table | OutputFormat::Plain if data.is_empty() => Ok(NO_RESULTS.into()),
        OutputFormat::Table => {
            let rows: Vec<AirlineRow> = data.iter().map(AirlineRow::from).collect();
            Ok(render_table(&rows))
        }
        OutputFormat::Json => Ok(serde_json::to_string_pretty(data)?),
        OutputFormat::JsonCompact => Ok(serde_json::to_string(data)?),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(data)?),
        OutputFormat::Plain => Ok(data
            .iter()
            .map(|a| a.id.as_str())
            .collect::<Vec<_>>()
            .join("\n")),
    }
}

/// Render a single airline in the chosen format.
pub fn render_airline(p: &Presentation, data: &Airline) -> Result<String, CliError> {
    match p.format {
        OutputFormat::Table => Ok(airline_detail(data, p.color)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(data)?),
        OutputFormat::JsonCompact => Ok(serde_json::to_string(data)?),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(data)?),
        OutputFormat::Plain => Ok(data.id.clone()),
    }
}

/// Render one `watch` frame.
///
/// Structured formats serialize the view itself (one document per change,
/// so `json-compact` yields NDJSON); human formats show the list or a
/// status line.
pub fn render_view(p: &Presentation, view: &ListView) -> Result<String, CliError> {
    match (p.format, view) {
        (OutputFormat::Json, _) => Ok(serde_json::to_string_pretty(view)?),
        (OutputFormat::JsonCompact, _) => Ok(serde_json::to_string(view)?),
        (OutputFormat::Yaml, _) => Ok(format!("---\n{}", serde_yaml::to_string(view)?)),
        (_, ListView::Items(items)) => render_airlines(p.format, items),
        (_, ListView::Empty) => Ok(NO_RESULTS.into()),
        (_, ListView::Loading) => Ok(status_line(p.color, "Loading…", Tone::Muted)),
        (_, ListView::Offline) => Ok(status_line(p.color, OFFLINE_MESSAGE, Tone::Warn)),
        (_, ListView::Error(message)) => Ok(status_line(p.color, message, Tone::Error)),
    }
}

#[derive(Clone, Copy)]
enum Tone {
    Muted,
    Warn,
    Error,
}

fn status_line(color: bool, text: &str, tone: Tone) -> String {
    if !color {
        return text.to_owned();
    }
    match tone {
        Tone::Muted => text.dimmed().to_string(),
        Tone::Warn => text.yellow().to_string(),
        Tone::Error => text.red().to_string(),
    }
}

/// One-line banner for the dismissible offline notice (stderr).
pub fn offline_notice(color: bool) -> String {
    let text = "You are offline. The list will refresh when the connection returns.";
    if color {
        format!("{} {text}", "!".yellow().bold())
    } else {
        format!("! {text}")
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}
