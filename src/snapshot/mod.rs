//! # Auxiliary configuration snapshot export.
//!
//! Optionally, each backup cycle writes one opaque file into the source
//! folder capturing external configuration state (the classic case: a
//! registry key exported alongside the media library it describes). The
//! format is whatever the configured export command produces; this crate
//! treats it as a passthrough.
//!
//! Export failure is non-fatal: the orchestrator reports it as a warning and
//! the archive proceeds regardless.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use crate::error::BackupError;

/// Capability to export an external configuration snapshot into a directory.
#[async_trait]
pub trait SnapshotExport: Send + Sync + 'static {
    /// Writes the snapshot file into `into_dir` and returns its path.
    async fn export(&self, into_dir: &Path) -> Result<PathBuf, BackupError>;
}

/// Snapshot exporter that shells out to a configured command.
///
/// The target file path (`into_dir/file_name`) is appended as the command's
/// last argument, matching tools like `reg export <key> <file>`.
pub struct CommandSnapshot {
    program: String,
    args: Vec<String>,
    file_name: String,
}

impl CommandSnapshot {
    /// Creates an exporter running `program args... <into_dir>/<file_name>`.
    pub fn new(
        program: impl Into<String>,
        args: Vec<String>,
        file_name: impl Into<String>,
    ) -> Self {
        Self {
            program: program.into(),
            args,
            file_name: file_name.into(),
        }
    }
}

#[async_trait]
impl SnapshotExport for CommandSnapshot {
    async fn export(&self, into_dir: &Path) -> Result<PathBuf, BackupError> {
        let target = into_dir.join(&self.file_name);

        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(&target)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| BackupError::Snapshot {
                error: format!("{}: {e}", self.program),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(BackupError::Snapshot {
                error: format!(
                    "{} exited with {}: {}",
                    self.program,
                    output.status,
                    stderr.trim()
                ),
            });
        }

        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn missing_program_is_a_snapshot_error() {
        let dir = TempDir::new().unwrap();
        let exporter = CommandSnapshot::new("no-such-exporter-a8f3", vec![], "state.reg");
        let err = exporter.export(dir.path()).await.unwrap_err();
        assert_eq!(err.as_label(), "snapshot_export");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn successful_command_returns_target_path() {
        let dir = TempDir::new().unwrap();
        // `touch <target>` stands in for a real exporter.
        let exporter = CommandSnapshot::new("touch", vec![], "state.reg");
        let path = exporter.export(dir.path()).await.unwrap();
        assert_eq!(path, dir.path().join("state.reg"));
        assert!(path.exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn nonzero_exit_is_a_snapshot_error() {
        let dir = TempDir::new().unwrap();
        let exporter = CommandSnapshot::new("false", vec![], "state.reg");
        let err = exporter.export(dir.path()).await.unwrap_err();
        assert!(err.as_message().contains("exited"));
    }
}
