//! Command dispatch: bridges CLI args -> coordinator calls -> output.

pub mod config_cmd;
pub mod control;
pub mod rooms;
pub mod watch;

use std::sync::Arc;

use wiser_core::{
    CoreError, HubCoordinator, NOTIFICATION_ID, NotificationBoard, RefreshOutcome, RoomId,
    RoomSnapshot,
};

use crate::cli::{Command, OutputFormat};
use crate::error::CliError;

/// Everything a hub-bound command needs.
pub struct Session {
    pub coordinator: HubCoordinator,
    pub board: Arc<NotificationBoard>,
    pub output: OutputFormat,
    pub quiet: bool,
    pub away_temperature: f64,
}

impl Session {
    /// Refresh, turning a soft failure into an error: a one-shot command
    /// has nothing useful to show without data.
    pub async fn refresh(&self) -> Result<RefreshOutcome, CliError> {
        let outcome = self.coordinator.refresh().await?;
        if outcome == RefreshOutcome::Failed {
            return Err(self.fetch_failed());
        }
        Ok(outcome)
    }

    /// Look up a room in the cache, or fail with a not-found error.
    pub async fn room(&self, room: RoomId) -> Result<RoomSnapshot, CliError> {
        let snapshot = self.coordinator.get_room_data(room).await;
        Ok(snapshot.ok_or(CoreError::RoomNotFound { room })?)
    }

    fn fetch_failed(&self) -> CliError {
        match self.board.dismiss(NOTIFICATION_ID) {
            Some(event) => CliError::FetchFailed {
                title: event.title,
                message: event.message,
            },
            None => CliError::FetchFailed {
                title: "Hub refresh failed".into(),
                message: "no details were reported".into(),
            },
        }
    }
}

/// Dispatch a hub-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, session: &Session) -> Result<(), CliError> {
    match cmd {
        Command::Rooms => rooms::list(session).await,
        Command::Room { room } => rooms::show(session, room).await,
        Command::Status => rooms::status(session).await,
        Command::Batteries => rooms::batteries(session).await,
        Command::SetTemp { room, temperature } => {
            control::set_temperature(session, room, temperature).await
        }
        Command::SetMode { room, mode } => control::set_mode(session, room, mode).await,
        Command::Away(args) => control::away(session, args).await,
        Command::Watch(args) => watch::handle(session, args).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => Ok(()),
    }
}
