//! # Event subscribers for the foldervault runtime.
//!
//! This module provides the [`Subscribe`] trait, the non-blocking
//! [`SubscriberSet`] fan-out, and a built-in [`LogWriter`] for human-readable
//! output.
//!
//! ## Architecture
//! ```text
//! Event flow:
//!   Orchestrator / cycle worker ── publish(Event) ──► Bus
//!                                                      │
//!                                     listener ── SubscriberSet::emit(&Event)
//!                                                      │
//!                                            ┌─────────┼─────────┐
//!                                            ▼         ▼         ▼
//!                                        LogWriter   Metrics   Custom ...
//! ```
//!
//! ## Implementing custom subscribers
//! ```no_run
//! use foldervault::{Event, EventKind, Subscribe};
//! use async_trait::async_trait;
//!
//! struct CompletionCounter;
//!
//! #[async_trait]
//! impl Subscribe for CompletionCounter {
//!     async fn on_event(&self, event: &Event) {
//!         if event.kind == EventKind::BackupCompleted {
//!             // increment a counter, notify a UI, ...
//!         }
//!     }
//! }
//! ```

mod log;
mod set;
mod subscribe;

pub use self::log::LogWriter;
pub use set::SubscriberSet;
pub use subscribe::Subscribe;
