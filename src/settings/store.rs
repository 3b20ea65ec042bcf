//! # TOML-backed key-value settings store.
//!
//! [`SettingsStore`] holds the durable configuration: paths, interval, daily
//! time, and flags. Every `set` persists immediately, so a crash never loses
//! an acknowledged change. Typed getters take a caller-supplied default and
//! never fail on a missing or mistyped key.
//!
//! [`SettingsStore::load_config`] materializes the typed
//! [`BackupConfig`](crate::config::BackupConfig) with the documented
//! defaults; a malformed stored daily time is ignored with a log warning
//! rather than blocking startup.

use std::fs;
use std::path::{Path, PathBuf};

use log::warn;
use toml::{Table, Value};

use crate::config::{BackupConfig, DailyTime};
use crate::error::BackupError;

/// Well-known settings keys.
pub mod keys {
    /// Folder to archive.
    pub const SOURCE_FOLDER: &str = "source_folder";
    /// Destination archive path template.
    pub const DESTINATION: &str = "destination";
    /// Day interval between runs (default 7).
    pub const INTERVAL_DAYS: &str = "interval_days";
    /// Daily wall-clock target as `HH:MM` (default unset).
    pub const DAILY_TIME: &str = "daily_time";
    /// Export the auxiliary snapshot before archiving (default false).
    pub const EXPORT_SNAPSHOT: &str = "export_snapshot";
    /// Run-at-login flag, stored only (default false).
    pub const START_AT_LOGIN: &str = "start_at_login";
    /// Exact name of the dependent process to stop.
    pub const DEPENDENT_PROCESS: &str = "dependent_process";
    /// Executable to relaunch after archiving.
    pub const DEPENDENT_EXECUTABLE: &str = "dependent_executable";
}

/// Durable key-value store for configuration, with typed defaults.
pub struct SettingsStore {
    path: PathBuf,
    table: Table,
}

impl SettingsStore {
    /// Opens the store at `path`, loading the existing table if the file is
    /// present; a missing file yields an empty store (all defaults).
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, BackupError> {
        let path = path.into();
        let table = match fs::read_to_string(&path) {
            Ok(text) => text.parse::<Table>().map_err(|e| BackupError::Settings {
                error: format!("{}: {e}", path.display()),
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Table::new(),
            Err(e) => {
                return Err(BackupError::Settings {
                    error: format!("{}: {e}", path.display()),
                });
            }
        };
        Ok(Self { path, table })
    }

    /// Returns a string value, or `default` when missing or mistyped.
    pub fn get_str(&self, key: &str, default: &str) -> String {
        match self.table.get(key) {
            Some(Value::String(s)) => s.clone(),
            _ => default.to_string(),
        }
    }

    /// Returns an integer value, or `default` when missing or mistyped.
    pub fn get_u32(&self, key: &str, default: u32) -> u32 {
        match self.table.get(key) {
            Some(Value::Integer(n)) if *n >= 0 && *n <= i64::from(u32::MAX) => *n as u32,
            _ => default,
        }
    }

    /// Returns a boolean value, or `default` when missing or mistyped.
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        match self.table.get(key) {
            Some(Value::Boolean(b)) => *b,
            _ => default,
        }
    }

    /// Sets a key and persists the whole table immediately.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) -> Result<(), BackupError> {
        self.table.insert(key.to_string(), value.into());
        self.persist()
    }

    /// Materializes a typed configuration snapshot with defaults.
    pub fn load_config(&self) -> BackupConfig {
        let daily_time = match self.table.get(keys::DAILY_TIME) {
            Some(Value::String(s)) => match s.parse::<DailyTime>() {
                Ok(t) => Some(t),
                Err(e) => {
                    warn!("ignoring stored daily time: {}", e.as_message());
                    None
                }
            },
            _ => None,
        };

        let opt_str = |key: &str| -> Option<String> {
            let v = self.get_str(key, "");
            if v.is_empty() { None } else { Some(v) }
        };

        BackupConfig {
            source_folder: PathBuf::from(self.get_str(keys::SOURCE_FOLDER, "")),
            destination_template: PathBuf::from(self.get_str(keys::DESTINATION, "")),
            interval_days: BackupConfig::clamp_interval(self.get_u32(keys::INTERVAL_DAYS, 7)),
            daily_time,
            export_snapshot: self.get_bool(keys::EXPORT_SNAPSHOT, false),
            start_at_login: self.get_bool(keys::START_AT_LOGIN, false),
            dependent_process: opt_str(keys::DEPENDENT_PROCESS),
            dependent_executable: opt_str(keys::DEPENDENT_EXECUTABLE).map(PathBuf::from),
        }
    }

    /// Writes every field of `cfg` back to the store and persists once.
    pub fn store_config(&mut self, cfg: &BackupConfig) -> Result<(), BackupError> {
        let t = &mut self.table;
        t.insert(
            keys::SOURCE_FOLDER.into(),
            Value::String(cfg.source_folder.display().to_string()),
        );
        t.insert(
            keys::DESTINATION.into(),
            Value::String(cfg.destination_template.display().to_string()),
        );
        t.insert(
            keys::INTERVAL_DAYS.into(),
            Value::Integer(i64::from(cfg.interval_days)),
        );
        match cfg.daily_time {
            Some(dt) => {
                t.insert(keys::DAILY_TIME.into(), Value::String(dt.to_string()));
            }
            None => {
                t.remove(keys::DAILY_TIME);
            }
        }
        t.insert(
            keys::EXPORT_SNAPSHOT.into(),
            Value::Boolean(cfg.export_snapshot),
        );
        t.insert(
            keys::START_AT_LOGIN.into(),
            Value::Boolean(cfg.start_at_login),
        );
        match &cfg.dependent_process {
            Some(name) => {
                t.insert(keys::DEPENDENT_PROCESS.into(), Value::String(name.clone()));
            }
            None => {
                t.remove(keys::DEPENDENT_PROCESS);
            }
        }
        match &cfg.dependent_executable {
            Some(path) => {
                t.insert(
                    keys::DEPENDENT_EXECUTABLE.into(),
                    Value::String(path.display().to_string()),
                );
            }
            None => {
                t.remove(keys::DEPENDENT_EXECUTABLE);
            }
        }
        self.persist()
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<(), BackupError> {
        let text = toml::to_string_pretty(&self.table).map_err(|e| BackupError::Settings {
            error: e.to_string(),
        })?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| BackupError::Settings {
                    error: format!("{}: {e}", parent.display()),
                })?;
            }
        }
        fs::write(&self.path, text).map_err(|e| BackupError::Settings {
            error: format!("{}: {e}", self.path.display()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let store = SettingsStore::open(dir.path().join("settings.toml")).unwrap();
        let cfg = store.load_config();
        assert_eq!(cfg.interval_days, 7);
        assert!(cfg.daily_time.is_none());
        assert!(!cfg.export_snapshot);
        assert!(cfg.source_folder.as_os_str().is_empty());
    }

    #[test]
    fn set_persists_and_reloads() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.toml");

        let mut store = SettingsStore::open(&path).unwrap();
        store.set(keys::INTERVAL_DAYS, 3i64).unwrap();
        store.set(keys::SOURCE_FOLDER, "/data/media").unwrap();

        let reloaded = SettingsStore::open(&path).unwrap();
        assert_eq!(reloaded.get_u32(keys::INTERVAL_DAYS, 7), 3);
        assert_eq!(reloaded.get_str(keys::SOURCE_FOLDER, ""), "/data/media");
    }

    #[test]
    fn config_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.toml");

        let cfg = BackupConfig {
            source_folder: "/data/media".into(),
            destination_template: "/backup/media.zip".into(),
            interval_days: 14,
            daily_time: Some(DailyTime::new(3, 30).unwrap()),
            export_snapshot: true,
            start_at_login: true,
            dependent_process: Some("media-server".into()),
            dependent_executable: Some("/usr/bin/media-server".into()),
        };

        let mut store = SettingsStore::open(&path).unwrap();
        store.store_config(&cfg).unwrap();

        let loaded = SettingsStore::open(&path).unwrap().load_config();
        assert_eq!(loaded.source_folder, cfg.source_folder);
        assert_eq!(loaded.interval_days, 14);
        assert_eq!(loaded.daily_time, cfg.daily_time);
        assert_eq!(loaded.dependent_process.as_deref(), Some("media-server"));
    }

    #[test]
    fn mistyped_values_fall_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(&path, "interval_days = \"soon\"\ndaily_time = 42\n").unwrap();

        let store = SettingsStore::open(&path).unwrap();
        let cfg = store.load_config();
        assert_eq!(cfg.interval_days, 7);
        assert!(cfg.daily_time.is_none());
    }

    #[test]
    fn out_of_range_interval_is_clamped_on_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(&path, "interval_days = 4000\n").unwrap();

        let cfg = SettingsStore::open(&path).unwrap().load_config();
        assert_eq!(cfg.interval_days, 365);
    }
}
