//! `wiser watch`: poll the hub until Ctrl-C.
//!
//! Ticks on a fixed interval and lets the coordinator's throttle decide
//! when the hub is actually queried. Failed refreshes are logged by the
//! diagnostic sink and stay on the notification board until the hub
//! answers again.

use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use wiser_core::{NOTIFICATION_ID, RefreshOutcome};

use super::{Session, rooms};
use crate::cli::WatchArgs;
use crate::error::CliError;

pub async fn handle(session: &Session, args: WatchArgs) -> Result<(), CliError> {
    if args.tick == 0 {
        return Err(CliError::Validation {
            field: "tick".into(),
            reason: "must be at least 1 second".into(),
        });
    }

    let cancel = CancellationToken::new();
    let on_ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_ctrl_c.cancel();
        }
    });

    let mut interval = tokio::time::interval(Duration::from_secs(args.tick));
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut refreshes = 0_u64;

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            _ = interval.tick() => {
                match session.coordinator.refresh().await? {
                    RefreshOutcome::Refreshed => {
                        if session.board.dismiss(NOTIFICATION_ID).is_some() {
                            eprintln!("hub is answering again");
                        }
                        rooms::print_rooms(session, &session.coordinator.rooms().await)?;

                        refreshes += 1;
                        if args.count.is_some_and(|count| refreshes >= count) {
                            break;
                        }
                    }
                    RefreshOutcome::Skipped => debug!("waiting for scan interval"),
                    // The diagnostic sink has already logged the notification
                    RefreshOutcome::Failed => debug!("keeping previous data"),
                }
            }
        }
    }

    Ok(())
}
