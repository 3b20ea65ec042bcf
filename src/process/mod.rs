//! # Dependent-process control.
//!
//! The backup cycle pauses a dependent external process (to avoid file-lock
//! conflicts on the folder being archived) and relaunches it afterwards.
//! [`ProcessControl`] is the seam; [`SystemProcesses`] is the real
//! implementation, tests substitute a recording fake.

mod control;
mod system;

pub use control::ProcessControl;
pub use system::SystemProcesses;
