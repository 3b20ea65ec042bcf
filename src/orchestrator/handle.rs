//! # Control surface handle.
//!
//! [`OrchestratorHandle`] is the clonable entry point the configuration
//! surface uses to mutate settings and request backups. Every method is a
//! message to the control loop; the loop applies updates to its own config
//! snapshot, persists them, and re-arms the scheduler where appropriate.

use std::path::PathBuf;

use tokio::sync::mpsc;

use crate::config::DailyTime;
use crate::error::BackupError;

/// Commands accepted by the control loop.
#[derive(Debug)]
pub(crate) enum Command {
    RequestBackup,
    UpdateInterval(u32),
    UpdateDailyTime(Option<DailyTime>),
    UpdateSourceFolder(PathBuf),
    UpdateDestination(PathBuf),
    Shutdown,
}

/// Clonable handle for driving a running
/// [`BackupOrchestrator`](crate::BackupOrchestrator).
#[derive(Clone)]
pub struct OrchestratorHandle {
    tx: mpsc::Sender<Command>,
}

impl OrchestratorHandle {
    pub(crate) fn new(tx: mpsc::Sender<Command>) -> Self {
        Self { tx }
    }

    /// Requests an immediate backup cycle.
    ///
    /// Rejected with a `BusyRejected` event when a cycle is in flight; the
    /// scheduler's countdown is not affected either way.
    pub async fn request_backup(&self) -> Result<(), BackupError> {
        self.send(Command::RequestBackup).await
    }

    /// Updates the day interval (clamped to `1..=365`) and re-arms the
    /// countdown from now.
    pub async fn update_interval(&self, days: u32) -> Result<(), BackupError> {
        self.send(Command::UpdateInterval(days)).await
    }

    /// Sets or clears the daily wall-clock target and re-arms the countdown.
    pub async fn update_daily_time(&self, time: Option<DailyTime>) -> Result<(), BackupError> {
        self.send(Command::UpdateDailyTime(time)).await
    }

    /// Points future backups at a different source folder.
    pub async fn update_source_folder(&self, path: PathBuf) -> Result<(), BackupError> {
        self.send(Command::UpdateSourceFolder(path)).await
    }

    /// Points future backups at a different destination template.
    pub async fn update_destination(&self, path: PathBuf) -> Result<(), BackupError> {
        self.send(Command::UpdateDestination(path)).await
    }

    /// Asks the control loop to wind down (bounded by the shutdown grace).
    pub async fn shutdown(&self) -> Result<(), BackupError> {
        self.send(Command::Shutdown).await
    }

    async fn send(&self, cmd: Command) -> Result<(), BackupError> {
        self.tx
            .send(cmd)
            .await
            .map_err(|_| BackupError::ChannelClosed)
    }
}
