//! `airlines list`

use airlines_core::{Airline, fetch_once, filter};

use crate::cli::ListArgs;
use crate::error::CliError;
use crate::output;

use super::Context;

pub async fn handle(args: ListArgs, ctx: &Context) -> Result<(), CliError> {
    let airlines = fetch_once(ctx.source.as_ref()).await?;
    let query = args.search.unwrap_or_default();

    let shown: Vec<Airline> = filter(&airlines, &query).into_iter().cloned().collect();
    tracing::debug!(total = airlines.len(), shown = shown.len(), %query, "filtered airlines");

    let rendered = output::render_airlines(ctx.presentation.format, &shown)?;
    output::print_output(&rendered, ctx.presentation.quiet);
    Ok(())
}
