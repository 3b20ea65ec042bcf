//! Error types used by the foldervault runtime.
//!
//! All failures funnel into a single [`BackupError`] enum. The orchestrator
//! catches every variant at the cycle boundary and turns it into a reported
//! event; no error here may crash the control loop or stop future cycles.
//!
//! The type provides helper methods (`as_label`, `as_message`) for
//! logging/metrics, so subscribers can carry a short stable label next to a
//! human-readable reason.

use std::path::PathBuf;

use thiserror::Error;

/// # Errors produced by the backup runtime.
///
/// These cover configuration problems, archive I/O, dependent-process
/// control, the mutual-exclusion guard, snapshot export, and settings
/// persistence.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum BackupError {
    /// Configuration is missing or invalid for the requested operation
    /// (empty source/destination, interval out of range, bad daily time).
    #[error("invalid configuration: {reason}")]
    Config {
        /// What exactly is wrong with the configuration.
        reason: String,
    },

    /// Archive read/write failure (source unreadable, destination not
    /// writable, zip encoding error).
    #[error("archive i/o failure: {error}")]
    Io {
        /// The underlying I/O error message.
        error: String,
    },

    /// The dependent executable could not be launched.
    ///
    /// This leaves the dependent service down, so it must always be
    /// reported, never swallowed.
    #[error("failed to launch {path:?}: {error}")]
    Launch {
        /// Path of the executable that failed to start.
        path: PathBuf,
        /// The underlying spawn error message.
        error: String,
    },

    /// The dependent process could not be stopped.
    ///
    /// Stop is best-effort: absence of the process is `Ok(0)`, not this.
    #[error("failed to stop process {name:?}: {error}")]
    Stop {
        /// Exact process name that was targeted.
        name: String,
        /// The underlying error message.
        error: String,
    },

    /// A backup was requested while another cycle is still in flight.
    #[error("a backup cycle is already in flight")]
    Busy,

    /// The auxiliary snapshot export failed (non-fatal to the cycle).
    #[error("snapshot export failed: {error}")]
    Snapshot {
        /// The underlying export error message.
        error: String,
    },

    /// The settings store could not be read or persisted.
    #[error("settings store failure: {error}")]
    Settings {
        /// The underlying store error message.
        error: String,
    },

    /// The orchestrator control loop has stopped; commands can no longer be
    /// delivered.
    #[error("orchestrator control channel closed")]
    ChannelClosed,
}

impl BackupError {
    /// Wraps an [`std::io::Error`] (or anything displayable) as an archive
    /// I/O failure.
    pub fn io(err: impl std::fmt::Display) -> Self {
        BackupError::Io {
            error: err.to_string(),
        }
    }

    /// Builds a configuration error from a reason string.
    pub fn config(reason: impl Into<String>) -> Self {
        BackupError::Config {
            reason: reason.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use foldervault::BackupError;
    ///
    /// let err = BackupError::Busy;
    /// assert_eq!(err.as_label(), "backup_busy");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            BackupError::Config { .. } => "backup_config",
            BackupError::Io { .. } => "backup_io",
            BackupError::Launch { .. } => "process_launch",
            BackupError::Stop { .. } => "process_stop",
            BackupError::Busy => "backup_busy",
            BackupError::Snapshot { .. } => "snapshot_export",
            BackupError::Settings { .. } => "settings_store",
            BackupError::ChannelClosed => "control_channel_closed",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            BackupError::Config { reason } => format!("config: {reason}"),
            BackupError::Io { error } => format!("io: {error}"),
            BackupError::Launch { path, error } => {
                format!("launch {}: {error}", path.display())
            }
            BackupError::Stop { name, error } => format!("stop {name}: {error}"),
            BackupError::Busy => "busy: cycle in flight".to_string(),
            BackupError::Snapshot { error } => format!("snapshot: {error}"),
            BackupError::Settings { error } => format!("settings: {error}"),
            BackupError::ChannelClosed => "control channel closed".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_stable() {
        assert_eq!(BackupError::config("x").as_label(), "backup_config");
        assert_eq!(BackupError::io("x").as_label(), "backup_io");
        assert_eq!(BackupError::Busy.as_label(), "backup_busy");
    }

    #[test]
    fn messages_carry_detail() {
        let err = BackupError::Stop {
            name: "svc".into(),
            error: "denied".into(),
        };
        assert!(err.as_message().contains("svc"));
        assert!(err.as_message().contains("denied"));
    }
}
