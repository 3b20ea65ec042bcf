//! # Runtime events emitted by the orchestrator and the cycle worker.
//!
//! The [`EventKind`] enum classifies event types across four categories:
//! - **Countdown events**: the once-per-second schedule tick
//! - **Cycle events**: one backup cycle's progress (stop, snapshot, archive,
//!   restart) and its final outcome
//! - **Schedule events**: re-arming of the next-run computation
//! - **Runtime events**: warnings, busy rejections, shutdown
//!
//! The [`Event`] struct carries additional metadata such as timestamps, the
//! countdown remainder, paths, process names, and failure reasons.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases
//! monotonically. Use `seq` to restore the exact order when events are
//! delivered out of order.
//!
//! ## Example
//! ```rust
//! use foldervault::{Event, EventKind};
//!
//! let ev = Event::new(EventKind::BackupFailed)
//!     .with_reason("source folder missing")
//!     .with_label("backup_config");
//!
//! assert_eq!(ev.kind, EventKind::BackupFailed);
//! assert_eq!(ev.reason.as_deref(), Some("source folder missing"));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::SystemTime;

use crate::orchestrator::CycleState;
use crate::schedule::Remaining;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of runtime events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Countdown events ===
    /// Scheduler tick; the countdown to the next run advanced.
    ///
    /// Sets:
    /// - `remaining`: days/hours/minutes/seconds until the next run
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    CountdownTick,

    // === Schedule events ===
    /// The next-run time was (re)computed.
    ///
    /// Sets:
    /// - `reason`: what re-armed the schedule ("elapsed", "interval",
    ///   "daily_time", "startup")
    /// - `remaining`: fresh countdown to the new target
    /// - `at`, `seq`
    ScheduleArmed,

    // === Cycle events ===
    /// A backup cycle began (scheduled elapse or manual request).
    ///
    /// Sets:
    /// - `reason`: trigger origin ("schedule" or "manual")
    /// - `at`, `seq`
    BackupTriggered,

    /// The dependent process was stopped (best-effort).
    ///
    /// Sets:
    /// - `process`: exact process name targeted
    /// - `reason`: number of instances terminated, as text
    /// - `phase`: `Stopping`
    /// - `at`, `seq`
    ProcessStopped,

    /// The auxiliary configuration snapshot was written into the source
    /// folder.
    ///
    /// Sets:
    /// - `path`: snapshot file path
    /// - `phase`: `Stopping`
    /// - `at`, `seq`
    SnapshotExported,

    /// The auxiliary snapshot export failed (non-fatal).
    ///
    /// Sets:
    /// - `reason`: failure message
    /// - `label`: error label
    /// - `phase`: `Stopping`
    /// - `at`, `seq`
    SnapshotFailed,

    /// The archive job started on the worker.
    ///
    /// Sets:
    /// - `path`: timestamped destination path
    /// - `phase`: `Archiving`
    /// - `at`, `seq`
    ArchiveStarted,

    /// The dependent executable was relaunched after the archive phase.
    ///
    /// Sets:
    /// - `path`: executable path
    /// - `phase`: `Restarting`
    /// - `at`, `seq`
    ProcessStarted,

    /// The dependent executable could not be relaunched.
    ///
    /// The dependent service is down at this point; always surfaced.
    ///
    /// Sets:
    /// - `path`: executable path
    /// - `reason`: failure message
    /// - `label`: error label
    /// - `phase`: `Restarting`
    /// - `at`, `seq`
    ProcessStartFailed,

    /// The backup cycle finished and produced an archive.
    ///
    /// Sets:
    /// - `path`: archive file path
    /// - `reason`: entry count, as text
    /// - `phase`: `Idle` (the cycle is over)
    /// - `at`, `seq`
    BackupCompleted,

    /// The backup cycle finished without producing an archive.
    ///
    /// Sets:
    /// - `reason`: failure message
    /// - `label`: error label
    /// - `phase`: `Idle` (the cycle is over)
    /// - `at`, `seq`
    BackupFailed,

    // === Runtime events ===
    /// A backup was requested while a cycle is in flight; rejected.
    ///
    /// Sets:
    /// - `reason`: trigger origin that was rejected
    /// - `at`, `seq`
    BusyRejected,

    /// Non-fatal condition worth surfacing (bounded process control timed
    /// out, settings persist failure, ...).
    ///
    /// Sets:
    /// - `reason`: warning message
    /// - `label`: optional error label
    /// - `phase`: the cycle phase, for warnings raised inside a cycle
    /// - `at`, `seq`
    Warning,

    /// Shutdown requested; the control loop is winding down.
    ///
    /// Sets:
    /// - `at`, `seq`
    ShutdownRequested,
}

/// Runtime event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Debug, Clone)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,

    /// Countdown remainder (countdown/schedule events).
    pub remaining: Option<Remaining>,
    /// Where the backup cycle stands (cycle events and phase warnings).
    pub phase: Option<CycleState>,
    /// File or executable path, if applicable.
    pub path: Option<Arc<str>>,
    /// Dependent process name, if applicable.
    pub process: Option<Arc<str>>,
    /// Human-readable reason (errors, trigger origin, counts).
    pub reason: Option<Arc<str>>,
    /// Short stable error label (see `BackupError::as_label`).
    pub label: Option<&'static str>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next
    /// sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            remaining: None,
            phase: None,
            path: None,
            process: None,
            reason: None,
            label: None,
        }
    }

    /// Attaches a countdown remainder.
    #[inline]
    pub fn with_remaining(mut self, remaining: Remaining) -> Self {
        self.remaining = Some(remaining);
        self
    }

    /// Attaches the cycle phase.
    #[inline]
    pub fn with_phase(mut self, phase: CycleState) -> Self {
        self.phase = Some(phase);
        self
    }

    /// Attaches a file or executable path.
    #[inline]
    pub fn with_path(mut self, path: impl Into<Arc<str>>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Attaches a dependent process name.
    #[inline]
    pub fn with_process(mut self, name: impl Into<Arc<str>>) -> Self {
        self.process = Some(name.into());
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Attaches a short stable error label.
    #[inline]
    pub fn with_label(mut self, label: &'static str) -> Self {
        self.label = Some(label);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_is_monotonic() {
        let a = Event::new(EventKind::CountdownTick);
        let b = Event::new(EventKind::CountdownTick);
        assert!(b.seq > a.seq);
    }

    #[test]
    fn builder_sets_fields() {
        let ev = Event::new(EventKind::ProcessStopped)
            .with_process("svc")
            .with_reason("2")
            .with_phase(CycleState::Stopping);
        assert_eq!(ev.process.as_deref(), Some("svc"));
        assert_eq!(ev.reason.as_deref(), Some("2"));
        assert_eq!(ev.phase, Some(CycleState::Stopping));
        assert!(ev.path.is_none());
    }
}
