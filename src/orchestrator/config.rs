//! # Runtime options for the control loop.
//!
//! [`OrchestratorConfig`] tunes the orchestrator's machinery, as opposed to
//! [`BackupConfig`](crate::config::BackupConfig) which describes *what* to
//! back up. Tests shrink `tick_period` to drive cycles quickly and swap
//! `clock` for a controllable one to elapse day-scale intervals instantly.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local};

/// Clock the control loop reads on every tick, command, and trigger.
///
/// The scheduler itself never reads the wall clock; every `now` flows
/// through this, so a substituted clock steers the whole loop.
pub type Clock = Arc<dyn Fn() -> DateTime<Local> + Send + Sync>;

/// Runtime options for [`BackupOrchestrator`](crate::BackupOrchestrator).
#[derive(Clone)]
pub struct OrchestratorConfig {
    /// Capacity of the event bus broadcast channel.
    pub bus_capacity: usize,
    /// Cadence of scheduler ticks (and countdown events).
    pub tick_period: Duration,
    /// Upper bound on one dependent-process stop or start call. Expiry is
    /// escalated as a warning; the cycle proceeds.
    pub process_timeout: Duration,
    /// How long shutdown waits for an in-flight cycle before abandoning it.
    pub shutdown_grace: Duration,
    /// Source of the current time.
    pub clock: Clock,
}

impl Default for OrchestratorConfig {
    /// Default options:
    /// - `bus_capacity = 1024`
    /// - `tick_period = 1s` (the countdown granularity)
    /// - `process_timeout = 10s`
    /// - `shutdown_grace = 30s`
    /// - `clock = Local::now`
    fn default() -> Self {
        Self {
            bus_capacity: 1024,
            tick_period: Duration::from_secs(1),
            process_timeout: Duration::from_secs(10),
            shutdown_grace: Duration::from_secs(30),
            clock: Arc::new(Local::now),
        }
    }
}

impl fmt::Debug for OrchestratorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrchestratorConfig")
            .field("bus_capacity", &self.bus_capacity)
            .field("tick_period", &self.tick_period)
            .field("process_timeout", &self.process_timeout)
            .field("shutdown_grace", &self.shutdown_grace)
            .finish_non_exhaustive()
    }
}
