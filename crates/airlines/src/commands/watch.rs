//! `airlines watch`: the connectivity-gated live list.

use std::sync::Arc;

use airlines_core::{ConnectivityMonitor, Controller, ListView, ProbeMonitor, StaticMonitor};

use crate::cli::WatchArgs;
use crate::error::CliError;
use crate::output;

use super::Context;

pub async fn handle(args: WatchArgs, ctx: &Context) -> Result<(), CliError> {
    let monitor: Arc<dyn ConnectivityMonitor> = if args.assume_online {
        Arc::new(StaticMonitor::online())
    } else {
        let mut probe = ctx.config.probe_config();
        if let Some(addr) = args.probe {
            probe.address = addr;
        }
        if let Some(interval) = args.interval {
            probe.interval = interval.into();
        }
        Arc::new(ProbeMonitor::new(probe))
    };

    let mut controller_config = ctx.config.controller_config();
    if let Some(settle) = args.settle {
        controller_config.settle_delay = settle.into();
    }

    let controller = Controller::new(controller_config, Arc::clone(&ctx.source), monitor);
    if let Some(query) = args.search {
        controller.search(query);
    }
    controller.start()?;

    let outcome = run_loop(&controller, ctx, args.once).await;
    controller.shutdown().await;
    outcome
}

/// Print every view change until Ctrl-C, or until the first settled view
/// with `--once`.
async fn run_loop(controller: &Controller, ctx: &Context, once: bool) -> Result<(), CliError> {
    let p = &ctx.presentation;
    let mut ui = controller.subscribe_ui();
    let mut offline = controller.subscribe_offline();
    let mut notice = controller.subscribe_notice();

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let mut last: Option<ListView> = None;
    loop {
        let view = controller.visible();
        if last.as_ref() != Some(&view) {
            tracing::debug!(?view, "view changed");
            let rendered = output::render_view(p, &view)?;
            match view {
                // Transient states go to stderr so stdout stays parseable.
                ListView::Loading | ListView::Offline if !output::is_structured(p.format) => {
                    if !p.quiet {
                        eprintln!("{rendered}");
                    }
                }
                _ => output::print_output(&rendered, p.quiet),
            }

            if once && view.is_settled() {
                return match view {
                    ListView::Error(message) => Err(CliError::LoadFailed { message }),
                    _ => Ok(()),
                };
            }
            last = Some(view);
        }

        if controller.offline_notice() {
            if !p.quiet {
                eprintln!("{}", output::offline_notice(p.color));
            }
            controller.dismiss_notice();
        }

        tokio::select! {
            biased;
            result = &mut ctrl_c => {
                if let Err(e) = result {
                    tracing::warn!(error = %e, "failed to listen for Ctrl-C");
                }
                tracing::info!("interrupted, shutting down");
                return Ok(());
            }
            changed = ui.changed() => {
                if changed.is_none() {
                    return Ok(());
                }
            }
            _ = offline.changed() => {}
            _ = notice.changed() => {}
        }
    }
}
