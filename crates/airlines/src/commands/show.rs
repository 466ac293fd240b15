//! `airlines show <id>`

use airlines_core::{fetch_once, find_by_id};

use crate::cli::ShowArgs;
use crate::error::CliError;
use crate::output;

use super::Context;

pub async fn handle(args: ShowArgs, ctx: &Context) -> Result<(), CliError> {
    let airlines = fetch_once(ctx.source.as_ref()).await?;
    let airline = find_by_id(&airlines, &args.id)?;

    let rendered = output::render_airline(&ctx.presentation, airline)?;
    output::print_output(&rendered, ctx.presentation.quiet);
    Ok(())
}
