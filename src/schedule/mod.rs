//! # Next-run computation and the countdown tick.
//!
//! The scheduler is deliberately pure: it never reads the clock itself and
//! holds no timers. The orchestrator drives it on a one-second cadence,
//! passing `Local::now()` in, which keeps every scheduling rule unit-testable
//! without mocking time.
//!
//! - [`Scheduler`] - owns `next_run_at` and fires triggers
//! - [`TickResult`] - per-tick countdown plus the trigger flag
//! - [`Remaining`] - days/hours/minutes/seconds decomposition for display

mod remaining;
mod scheduler;

pub use remaining::Remaining;
pub use scheduler::{Scheduler, TickResult};
