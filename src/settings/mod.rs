//! # Durable settings for the backup runtime.
//!
//! A small key-value store with typed defaults, backed by one TOML file.
//! The configuration surface writes individual keys; the orchestrator reads
//! a whole [`BackupConfig`](crate::config::BackupConfig) snapshot at startup
//! and persists updates as they arrive on its command channel.

mod store;

pub use store::{keys, SettingsStore};
