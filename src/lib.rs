//! # foldervault
//!
//! **Foldervault** is a scheduled folder-archiving library: it periodically
//! compresses a designated directory into a timestamped zip archive,
//! optionally stopping and restarting a dependent external process around
//! the operation, and optionally exporting an auxiliary configuration
//! snapshot alongside the data.
//!
//! ## Architecture
//! ```text
//!  ┌────────────────┐      ┌─────────────────────┐
//!  │ SettingsStore  │─────►│  BackupConfig       │ (loop-owned snapshot)
//!  └────────────────┘      └──────────┬──────────┘
//!                                     ▼
//!  ┌───────────────────────────────────────────────────────────────┐
//!  │ BackupOrchestrator (control loop)                             │
//!  │  - Scheduler (next-run computation, 1s tick)                  │
//!  │  - busy guard (at most one cycle in flight)                   │
//!  │  - Bus (broadcast events) + SubscriberSet (fan-out)           │
//!  └───────┬──────────────────────────────────────────────┬────────┘
//!          │ trigger (elapse or manual)                    │ events
//!          ▼                                               ▼
//!  ┌──────────────────────────────┐            ┌──────────────────────┐
//!  │ CycleWorker (spawned task)   │            │ Subscribe impls      │
//!  │  Stopping:  ProcessControl   │            │ (countdown displays, │
//!  │             SnapshotExport   │            │  logging, metrics)   │
//!  │  Archiving: spawn_blocking   │            └──────────────────────┘
//!  │             archive_folder   │
//!  │  Restarting: ProcessControl  │
//!  └──────────────────────────────┘
//! ```
//!
//! ## Lifecycle
//! ```text
//! SettingsStore ──► BackupOrchestrator::new ──► run(cancellation_token)
//!
//! loop {
//!   ├─► tick (1s): CountdownTick event; on elapse ─► trigger
//!   ├─► trigger:
//!   │     ├─ busy       ─► BusyRejected event, drop
//!   │     ├─ bad config ─► BackupFailed event, scheduler stays armed
//!   │     └─ spawn CycleWorker:
//!   │          stop dependent process (best-effort, bounded)
//!   │          export snapshot (optional, non-fatal)
//!   │          archive folder ─► <stem>_<YYYY-MM-DD_HH-MM-SS>.<ext>
//!   │          restart dependent process (always, success or failure)
//!   ├─► commands: update interval/daily time/paths, persist, re-arm
//!   └─► shutdown: drain in-flight cycle within grace, exit
//! }
//! ```
//!
//! ## Features
//! | Area              | Description                                              | Key types / traits                      |
//! |-------------------|----------------------------------------------------------|------------------------------------------|
//! | **Scheduling**    | Daily wall-clock target or day interval, live countdown. | [`Scheduler`], [`Remaining`]             |
//! | **Archiving**     | Recursive folder→zip, timestamped names, no overwrites.  | [`ArchiveJob`], [`archive_folder`]       |
//! | **Process ctl**   | Stop/relaunch the dependent service around the archive.  | [`ProcessControl`], [`SystemProcesses`]  |
//! | **Snapshot**      | Optional side-channel configuration export.              | [`SnapshotExport`], [`CommandSnapshot`]  |
//! | **Subscriber API**| Hook into runtime events (countdowns, completions).      | [`Subscribe`], [`SubscriberSet`]         |
//! | **Settings**      | TOML-backed key-value store with typed defaults.         | [`SettingsStore`]                        |
//! | **Errors**        | Typed errors, reported as events, never fatal to ticks.  | [`BackupError`]                          |
//!
//! ## Example
//! ```no_run
//! use std::sync::Arc;
//! use tokio_util::sync::CancellationToken;
//! use foldervault::{
//!     BackupOrchestrator, LogWriter, OrchestratorConfig, SettingsStore, Subscribe,
//!     SystemProcesses,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = SettingsStore::open("foldervault.toml")?;
//!     let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(LogWriter)];
//!
//!     let orchestrator = BackupOrchestrator::new(
//!         store,
//!         OrchestratorConfig::default(),
//!         subs,
//!         Arc::new(SystemProcesses::new()),
//!         None,
//!     );
//!
//!     let handle = orchestrator.handle();
//!     let shutdown = CancellationToken::new();
//!
//!     tokio::spawn({
//!         let handle = handle.clone();
//!         async move {
//!             // e.g. wire a UI button:
//!             let _ = handle.request_backup().await;
//!         }
//!     });
//!
//!     orchestrator.run(shutdown).await?;
//!     Ok(())
//! }
//! ```

mod archive;
mod config;
mod error;
mod events;
mod orchestrator;
mod process;
mod schedule;
mod settings;
mod snapshot;
mod subscribers;

pub use archive::{archive_folder, ArchiveJob, ArchiveSummary};
pub use config::{BackupConfig, DailyTime, INTERVAL_RANGE};
pub use error::BackupError;
pub use events::{Bus, Event, EventKind};
pub use orchestrator::{
    BackupOrchestrator, Clock, CycleState, OrchestratorConfig, OrchestratorHandle,
};
pub use process::{ProcessControl, SystemProcesses};
pub use schedule::{Remaining, Scheduler, TickResult};
pub use settings::{keys, SettingsStore};
pub use snapshot::{CommandSnapshot, SnapshotExport};
pub use subscribers::{LogWriter, Subscribe, SubscriberSet};
