//! Trait seam for stopping and relaunching the dependent process.

use std::path::Path;

use async_trait::async_trait;

use crate::error::BackupError;

/// Capability to stop and relaunch the dependent external process.
///
/// Both calls are short-lived; the orchestrator additionally bounds them with
/// a timeout so a hung process cannot stall a cycle indefinitely.
#[async_trait]
pub trait ProcessControl: Send + Sync + 'static {
    /// Best-effort termination of every process whose name exactly matches.
    ///
    /// Returns the number of processes terminated; `Ok(0)` when none were
    /// found (absence is not an error).
    async fn stop_by_name(&self, name: &str) -> Result<usize, BackupError>;

    /// Launches the executable as a detached process.
    ///
    /// Fails with [`BackupError::Launch`] when the path is invalid or the OS
    /// refuses to spawn it. This failure leaves the dependent service down,
    /// so callers must report it, never swallow it.
    async fn spawn(&self, path: &Path) -> Result<(), BackupError>;
}
