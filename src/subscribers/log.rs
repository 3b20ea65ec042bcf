//! # Simple logging subscriber for debugging and demos.
//!
//! [`LogWriter`] prints events to stdout in a human-readable format.
//! This is primarily useful for development, debugging, and examples.
//!
//! ## Output format
//! ```text
//! [triggered] origin=manual
//! [stopped] process="Plex Media Server.exe" killed=1
//! [archive-started] path=/backup/media_2026-08-23_03-00-00.zip
//! [completed] path=/backup/media_2026-08-23_03-00-00.zip entries=42
//! [failed] reason="source folder missing" label=backup_config
//! [busy] origin=manual
//! ```
//!
//! The once-per-second countdown tick is intentionally not printed; it would
//! drown everything else. Implement a custom [`Subscribe`] for countdown
//! displays.

use async_trait::async_trait;

use crate::events::{Event, EventKind};

use super::Subscribe;

/// Simple stdout logging subscriber.
///
/// Prints human-readable event descriptions to stdout for debugging and
/// demonstration purposes. Not intended for production use - implement a
/// custom [`Subscribe`] for structured logging or metrics collection.
#[derive(Default)]
pub struct LogWriter;

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        match e.kind {
            EventKind::CountdownTick => {}
            EventKind::ScheduleArmed => {
                println!(
                    "[armed] cause={:?} remaining={}",
                    e.reason,
                    e.remaining.map(|r| r.to_string()).unwrap_or_default()
                );
            }
            EventKind::BackupTriggered => {
                println!("[triggered] origin={:?}", e.reason);
            }
            EventKind::ProcessStopped => {
                println!("[stopped] process={:?} killed={:?}", e.process, e.reason);
            }
            EventKind::SnapshotExported => {
                println!("[snapshot] path={:?}", e.path);
            }
            EventKind::SnapshotFailed => {
                println!("[snapshot-failed] reason={:?}", e.reason);
            }
            EventKind::ArchiveStarted => {
                println!("[archive-started] path={:?}", e.path);
            }
            EventKind::ProcessStarted => {
                println!("[started] path={:?}", e.path);
            }
            EventKind::ProcessStartFailed => {
                println!("[start-failed] path={:?} reason={:?}", e.path, e.reason);
            }
            EventKind::BackupCompleted => {
                println!("[completed] path={:?} entries={:?}", e.path, e.reason);
            }
            EventKind::BackupFailed => {
                println!("[failed] reason={:?} label={:?}", e.reason, e.label);
            }
            EventKind::BusyRejected => {
                println!("[busy] origin={:?}", e.reason);
            }
            EventKind::Warning => match e.phase {
                Some(p) => println!("[warning] reason={:?} phase={}", e.reason, p.as_label()),
                None => println!("[warning] reason={:?}", e.reason),
            },
            EventKind::ShutdownRequested => {
                println!("[shutdown-requested]");
            }
        }
    }

    fn name(&self) -> &'static str {
        "log_writer"
    }
}
