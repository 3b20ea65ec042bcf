//! One archival run: source, timestamped destination, start time.

use std::path::PathBuf;

use chrono::{DateTime, Local};

use crate::config::BackupConfig;
use crate::error::BackupError;

/// Timestamp format spliced into the destination file name.
const STAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Transient description of one archive run.
///
/// Created when a trigger fires, dropped when the cycle finishes; never
/// persisted. The destination is derived from the configured template with
/// the trigger timestamp spliced in before the extension, so every run
/// produces a distinct file and nothing is overwritten.
#[derive(Debug, Clone)]
pub struct ArchiveJob {
    /// Folder being archived.
    pub source: PathBuf,
    /// Final archive path, timestamp included.
    pub destination: PathBuf,
    /// Trigger timestamp the destination was derived from.
    pub started_at: DateTime<Local>,
}

impl ArchiveJob {
    /// Builds a job from the configuration and the trigger timestamp.
    ///
    /// Fails with a config error when either path is empty; existence of the
    /// source directory is checked later, by the archive writer, so that the
    /// process lifecycle still runs around a missing folder.
    pub fn from_config(cfg: &BackupConfig, now: DateTime<Local>) -> Result<Self, BackupError> {
        cfg.validate_for_backup()?;

        let template = &cfg.destination_template;
        let stem = template
            .file_stem()
            .ok_or_else(|| BackupError::config("destination has no file name"))?
            .to_string_lossy();
        let stamp = now.format(STAMP_FORMAT);

        let file_name = match template.extension() {
            Some(ext) => format!("{stem}_{stamp}.{}", ext.to_string_lossy()),
            None => format!("{stem}_{stamp}"),
        };

        let destination = match template.parent() {
            Some(parent) => parent.join(file_name),
            None => PathBuf::from(file_name),
        };

        Ok(Self {
            source: cfg.source_folder.clone(),
            destination,
            started_at: now,
        })
    }
}
