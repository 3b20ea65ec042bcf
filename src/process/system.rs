//! OS-backed process control: `sysinfo` enumeration/kill, detached launch.

use std::ffi::OsStr;
use std::path::Path;

use async_trait::async_trait;
use log::debug;
use sysinfo::{ProcessRefreshKind, ProcessesToUpdate, System};
use tokio::process::Command;

use crate::error::BackupError;

use super::ProcessControl;

/// Real process control backed by `sysinfo` and `tokio::process`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemProcesses;

impl SystemProcesses {
    /// Creates the OS-backed controller.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProcessControl for SystemProcesses {
    async fn stop_by_name(&self, name: &str) -> Result<usize, BackupError> {
        let name = name.to_string();
        let target_name = name.clone();
        // Enumeration and kill are blocking; keep them off the runtime.
        let killed = tokio::task::spawn_blocking(move || {
            let mut sys = System::new();
            sys.refresh_processes_specifics(
                ProcessesToUpdate::All,
                true,
                ProcessRefreshKind::nothing(),
            );

            let target = OsStr::new(&target_name);
            let mut killed = 0usize;
            for process in sys.processes().values() {
                if process.name() == target && process.kill() {
                    killed += 1;
                }
            }
            killed
        })
        .await
        .map_err(|e| BackupError::Stop {
            name: name.to_string(),
            error: e.to_string(),
        })?;

        debug!("stop_by_name({name}): terminated {killed}");
        Ok(killed)
    }

    async fn spawn(&self, path: &Path) -> Result<(), BackupError> {
        // The child is detached: dropping the handle leaves it running.
        Command::new(path)
            .spawn()
            .map_err(|e| BackupError::Launch {
                path: path.to_path_buf(),
                error: e.to_string(),
            })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stopping_an_absent_process_is_ok_zero() {
        let ctl = SystemProcesses::new();
        let killed = ctl
            .stop_by_name("foldervault-no-such-process-a8f3")
            .await
            .unwrap();
        assert_eq!(killed, 0);
    }

    #[tokio::test]
    async fn spawning_an_invalid_path_is_a_launch_error() {
        let ctl = SystemProcesses::new();
        let err = ctl
            .spawn(Path::new("/no/such/executable-a8f3"))
            .await
            .unwrap_err();
        assert_eq!(err.as_label(), "process_launch");
    }
}
