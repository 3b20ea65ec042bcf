//! Cycle state machine.

/// Where the current backup cycle stands.
///
/// Happy path: `Idle → Stopping → Archiving → Restarting → Idle`. Failures
/// do not divert the path — a failed archive still passes through
/// `Restarting` so the dependent service is never left down; the failure is
/// carried on the outcome event instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CycleState {
    /// No cycle in flight; the scheduler counts down.
    #[default]
    Idle,
    /// Stopping the dependent process (and exporting the snapshot).
    Stopping,
    /// The archive job runs on the blocking worker.
    Archiving,
    /// Relaunching the dependent process.
    Restarting,
}

impl CycleState {
    /// Short stable label for logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            CycleState::Idle => "idle",
            CycleState::Stopping => "stopping",
            CycleState::Archiving => "archiving",
            CycleState::Restarting => "restarting",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_idle() {
        assert_eq!(CycleState::default(), CycleState::Idle);
        assert_eq!(CycleState::Idle.as_label(), "idle");
    }
}
