//! # Backup orchestration: the control loop and its handle.
//!
//! [`BackupOrchestrator`] composes the scheduler, the archive worker, the
//! dependent-process control, and the optional snapshot exporter. A single
//! control loop owns all state; the archive itself runs on a blocking worker
//! so the one-second tick cadence never stalls.
//!
//! ## High-level architecture
//! ```text
//! Inputs to run():
//!   SettingsStore ──► BackupConfig (loop-owned snapshot)
//!   OrchestratorHandle ──► command channel (updates, manual backup, shutdown)
//!
//! Control loop (tokio::select!):
//!   ticker (1s) ──► Scheduler::tick ──► CountdownTick event
//!        │                 └─ triggered ──► start cycle (busy guard)
//!   commands ──► mutate config + SettingsStore + Scheduler::rearm
//!   cycle completions ──► BackupCompleted / BackupFailed, back to Idle
//!   cancellation ──► ShutdownRequested, bounded drain of in-flight cycle
//!
//! Cycle worker (spawned task, at most one):
//!   Stopping ──► ProcessControl::stop_by_name   (best-effort, bounded)
//!   Stopping ──► SnapshotExport::export          (optional, non-fatal)
//!   Archiving ──► spawn_blocking(archive_folder)
//!   Restarting ──► ProcessControl::spawn         (always, bounded)
//!
//! Event flow:
//!   loop + worker ── publish(Event) ──► Bus ──► listener ──► SubscriberSet
//! ```

mod config;
mod core;
mod handle;
mod state;

pub use self::config::{Clock, OrchestratorConfig};
pub use self::core::BackupOrchestrator;
pub use self::handle::OrchestratorHandle;
pub use self::state::CycleState;
