//! # Backup configuration.
//!
//! [`BackupConfig`] is the typed snapshot of everything one backup cycle
//! needs: paths, cadence, the optional daily wall-clock target, and the
//! dependent-process coordinates. The orchestrator owns one instance and
//! mutates it only through its command channel, so reads at trigger time are
//! snapshot-consistent by construction.
//!
//! ## Field semantics
//! - `interval_days`: day interval between runs, valid range `1..=365`
//! - `daily_time`: optional wall-clock target; **takes precedence** over the
//!   interval when set
//! - `start_at_login`: stored for the configuration surface; this crate does
//!   not perform OS login registration
//!
//! ## Example
//! ```
//! use foldervault::{BackupConfig, DailyTime};
//!
//! let mut cfg = BackupConfig::default();
//! cfg.source_folder = "/data/media".into();
//! cfg.destination_template = "/backup/media.zip".into();
//! cfg.daily_time = Some(DailyTime::new(3, 30).unwrap());
//!
//! assert!(cfg.validate_for_backup().is_ok());
//! ```

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use chrono::NaiveTime;

use crate::error::BackupError;

/// Valid range for the day interval.
pub const INTERVAL_RANGE: std::ops::RangeInclusive<u32> = 1..=365;

/// Wall-clock time of day for daily scheduling (`HH:MM`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyTime {
    /// Hour of day, `0..=23`.
    pub hour: u8,
    /// Minute, `0..=59`.
    pub minute: u8,
}

impl DailyTime {
    /// Creates a daily time, rejecting out-of-range components.
    pub fn new(hour: u8, minute: u8) -> Result<Self, BackupError> {
        if hour > 23 || minute > 59 {
            return Err(BackupError::config(format!(
                "daily time {hour:02}:{minute:02} out of range"
            )));
        }
        Ok(Self { hour, minute })
    }

    /// Converts to a [`chrono::NaiveTime`] (seconds = 0).
    pub fn as_naive(&self) -> NaiveTime {
        // Components are range-checked at construction.
        NaiveTime::from_hms_opt(u32::from(self.hour), u32::from(self.minute), 0)
            .unwrap_or(NaiveTime::MIN)
    }
}

impl fmt::Display for DailyTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for DailyTime {
    type Err = BackupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (h, m) = s
            .split_once(':')
            .ok_or_else(|| BackupError::config(format!("daily time {s:?} is not HH:MM")))?;
        let hour: u8 = h
            .parse()
            .map_err(|_| BackupError::config(format!("daily time {s:?}: bad hour")))?;
        let minute: u8 = m
            .parse()
            .map_err(|_| BackupError::config(format!("daily time {s:?}: bad minute")))?;
        DailyTime::new(hour, minute)
    }
}

/// Typed configuration for the backup runtime.
///
/// Loaded from the [`SettingsStore`](crate::settings::SettingsStore) at
/// startup and mutated through the orchestrator's command channel afterwards.
#[derive(Debug, Clone)]
pub struct BackupConfig {
    /// Folder to archive (recursively).
    pub source_folder: PathBuf,
    /// Destination template; the run timestamp is spliced in before the
    /// extension (`/backup/media.zip` → `/backup/media_<ts>.zip`).
    pub destination_template: PathBuf,
    /// Day interval between runs when no daily time is set (`1..=365`).
    pub interval_days: u32,
    /// Optional daily wall-clock target; wins over the interval when set.
    pub daily_time: Option<DailyTime>,
    /// Export the auxiliary configuration snapshot before archiving.
    pub export_snapshot: bool,
    /// Stored flag for the configuration surface; no OS registration here.
    pub start_at_login: bool,
    /// Exact name of the dependent process to stop around the archive.
    pub dependent_process: Option<String>,
    /// Executable to relaunch after the archive phase.
    pub dependent_executable: Option<PathBuf>,
}

impl Default for BackupConfig {
    /// Defaults mirror the settings-store defaults:
    /// - empty paths (a backup cannot run until both are configured)
    /// - `interval_days = 7`
    /// - no daily time, no snapshot export, no login registration
    /// - no dependent process
    fn default() -> Self {
        Self {
            source_folder: PathBuf::new(),
            destination_template: PathBuf::new(),
            interval_days: 7,
            daily_time: None,
            export_snapshot: false,
            start_at_login: false,
            dependent_process: None,
            dependent_executable: None,
        }
    }
}

impl BackupConfig {
    /// Validates the invariants that must hold before a backup can run:
    /// non-empty source and destination, interval within [`INTERVAL_RANGE`].
    ///
    /// Whether `source_folder` actually exists is checked by the cycle
    /// worker, not here; the process lifecycle runs either way.
    pub fn validate_for_backup(&self) -> Result<(), BackupError> {
        if self.source_folder.as_os_str().is_empty() {
            return Err(BackupError::config("source folder is not configured"));
        }
        if self.destination_template.as_os_str().is_empty() {
            return Err(BackupError::config("destination path is not configured"));
        }
        if !INTERVAL_RANGE.contains(&self.interval_days) {
            return Err(BackupError::config(format!(
                "interval {} days outside {INTERVAL_RANGE:?}",
                self.interval_days
            )));
        }
        Ok(())
    }

    /// Clamps an interval update into the valid range.
    pub fn clamp_interval(days: u32) -> u32 {
        days.clamp(*INTERVAL_RANGE.start(), *INTERVAL_RANGE.end())
    }
}
