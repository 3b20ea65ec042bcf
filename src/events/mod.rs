//! Runtime events: types and broadcast bus.
//!
//! This module groups the event **data model** and the **bus** used to
//! publish/subscribe to events emitted by the scheduler ticks, the backup
//! cycle worker, and the orchestrator itself.
//!
//! ## Contents
//! - [`EventKind`], [`Event`] event classification and payload metadata
//! - [`Bus`] thin wrapper over `tokio::sync::broadcast`
//!
//! ## Quick reference
//! - **Publishers**: `BackupOrchestrator` (ticks, schedule changes, busy
//!   rejections, final outcomes) and the cycle worker (process stop/start,
//!   snapshot export, archive start).
//! - **Consumers**: the orchestrator's subscriber listener (fans out to the
//!   [`SubscriberSet`](crate::subscribers::SubscriberSet)) and any direct
//!   `Bus::subscribe` receiver (display surfaces, tests).

mod bus;
mod event;

pub use bus::Bus;
pub use event::{Event, EventKind};
