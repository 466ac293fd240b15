//! Command dispatch: bridges CLI args -> core operations -> output formatting.

pub mod config_cmd;
pub mod list;
pub mod show;
pub mod watch;

use std::sync::Arc;

use airlines_config::Config;
use airlines_core::AirlineSource;

use crate::cli::Command;
use crate::config::Presentation;
use crate::error::CliError;

/// Everything a data command needs, resolved once in `main`.
pub struct Context {
    pub config: Config,
    pub source: Arc<dyn AirlineSource>,
    pub presentation: Presentation,
}

/// Dispatch a data command to its handler.
pub async fn dispatch(cmd: Command, ctx: &Context) -> Result<(), CliError> {
    match cmd {
        Command::List(args) => list::handle(args, ctx).await,
        Command::Show(args) => show::handle(args, ctx).await,
        Command::Watch(args) => watch::handle(args, ctx).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => Err(CliError::Internal(
            "config and completions are not data commands".into(),
        )),
    }
}
