//! # BackupOrchestrator: the control loop.
//!
//! One tokio task owns every piece of mutable state (config snapshot,
//! scheduler, busy flag) and multiplexes four inputs with `tokio::select!`:
//! the one-second ticker, the command channel, the cycle-completion channel,
//! and the cancellation token. The archive itself never runs here — a
//! trigger spawns a [`CycleWorker`] which walks the
//! `Stopping → Archiving → Restarting` phases and reports back.
//!
//! ## Invariants
//! - At most one cycle worker is alive at a time (`busy` guard); a trigger
//!   arriving while busy publishes `BusyRejected` and is dropped.
//! - The dependent process is relaunched even when the archive fails.
//! - No failure in a cycle stops the loop; the scheduler always re-arms.
//! - Configuration reads at trigger time are snapshot-consistent: the loop
//!   owns the only mutable copy and applies updates between ticks.

use std::sync::Arc;

use chrono::{DateTime, Local};
use log::warn;
use tokio::sync::{broadcast, mpsc};
use tokio::time::{self, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::archive::{archive_folder, ArchiveJob, ArchiveSummary};
use crate::config::BackupConfig;
use crate::error::BackupError;
use crate::events::{Bus, Event, EventKind};
use crate::orchestrator::config::OrchestratorConfig;
use crate::orchestrator::handle::{Command, OrchestratorHandle};
use crate::orchestrator::state::CycleState;
use crate::process::ProcessControl;
use crate::schedule::Scheduler;
use crate::settings::SettingsStore;
use crate::snapshot::SnapshotExport;
use crate::subscribers::{Subscribe, SubscriberSet};

/// What one finished cycle reports back to the loop.
struct CycleOutcome {
    archive: Result<ArchiveSummary, BackupError>,
}

/// Composes scheduler, archiver, process control, and snapshot export.
pub struct BackupOrchestrator {
    opts: OrchestratorConfig,
    store: SettingsStore,
    cfg: BackupConfig,
    bus: Bus,
    subs: Arc<SubscriberSet>,
    process: Arc<dyn ProcessControl>,
    snapshot: Option<Arc<dyn SnapshotExport>>,
    cmd_tx: mpsc::Sender<Command>,
    cmd_rx: mpsc::Receiver<Command>,
}

impl BackupOrchestrator {
    /// Creates an orchestrator from a settings store and its collaborators.
    ///
    /// The initial [`BackupConfig`] is loaded from `store`; later updates
    /// arrive through the [`OrchestratorHandle`] and are persisted back.
    pub fn new(
        store: SettingsStore,
        opts: OrchestratorConfig,
        subscribers: Vec<Arc<dyn Subscribe>>,
        process: Arc<dyn ProcessControl>,
        snapshot: Option<Arc<dyn SnapshotExport>>,
    ) -> Self {
        let cfg = store.load_config();
        let bus = Bus::new(opts.bus_capacity);
        let subs = Arc::new(SubscriberSet::new(subscribers));
        let (cmd_tx, cmd_rx) = mpsc::channel(64);
        Self {
            opts,
            store,
            cfg,
            bus,
            subs,
            process,
            snapshot,
            cmd_tx,
            cmd_rx,
        }
    }

    /// Clonable control-surface handle (valid while the loop runs).
    pub fn handle(&self) -> OrchestratorHandle {
        OrchestratorHandle::new(self.cmd_tx.clone())
    }

    /// Event bus; subscribe before calling [`BackupOrchestrator::run`] to
    /// observe startup events.
    pub fn bus(&self) -> Bus {
        self.bus.clone()
    }

    /// Current configuration snapshot.
    pub fn config(&self) -> &BackupConfig {
        &self.cfg
    }

    /// Runs the control loop until `shutdown` fires or the handle asks to
    /// stop. An in-flight cycle is drained within the shutdown grace.
    pub async fn run(self, shutdown: CancellationToken) -> Result<(), BackupError> {
        let BackupOrchestrator {
            opts,
            store,
            cfg,
            bus,
            subs,
            process,
            snapshot,
            cmd_tx,
            mut cmd_rx,
        } = self;
        drop(cmd_tx);

        // Fan events out to registered subscribers off the control path.
        let listener = {
            let mut rx = bus.subscribe();
            let subs = Arc::clone(&subs);
            tokio::spawn(async move {
                loop {
                    match rx.recv().await {
                        Ok(ev) => subs.emit(&ev),
                        Err(broadcast::error::RecvError::Lagged(skipped)) => {
                            warn!("event listener lagged; skipped {skipped} events");
                        }
                        Err(broadcast::error::RecvError::Closed) => break,
                    }
                }
            })
        };

        let now = (opts.clock)();
        let scheduler = Scheduler::new(&cfg, now);
        let (done_tx, mut done_rx) = mpsc::channel::<CycleOutcome>(1);

        let mut ctl = ControlLoop {
            opts,
            store,
            cfg,
            bus,
            process,
            snapshot,
            scheduler,
            busy: false,
            done_tx,
        };
        ctl.publish_armed("startup", now);

        let mut ticker = time::interval(ctl.opts.tick_period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    ctl.drain(&mut done_rx).await;
                    break;
                }
                Some(cmd) = cmd_rx.recv() => {
                    if !ctl.apply_command(cmd) {
                        ctl.drain(&mut done_rx).await;
                        break;
                    }
                }
                _ = ticker.tick() => {
                    ctl.on_tick();
                }
                Some(outcome) = done_rx.recv() => {
                    ctl.finish_cycle(outcome);
                }
            }
        }

        listener.abort();
        Ok(())
    }
}

/// Loop-owned state; every method runs on the control task.
struct ControlLoop {
    opts: OrchestratorConfig,
    store: SettingsStore,
    cfg: BackupConfig,
    bus: Bus,
    process: Arc<dyn ProcessControl>,
    snapshot: Option<Arc<dyn SnapshotExport>>,
    scheduler: Scheduler,
    busy: bool,
    done_tx: mpsc::Sender<CycleOutcome>,
}

impl ControlLoop {
    fn on_tick(&mut self) {
        let now = (self.opts.clock)();
        let res = self.scheduler.tick(&self.cfg, now);
        self.bus
            .publish(Event::new(EventKind::CountdownTick).with_remaining(res.remaining));
        if res.triggered {
            self.publish_armed("elapsed", now);
            self.trigger("schedule");
        }
    }

    fn apply_command(&mut self, cmd: Command) -> bool {
        let now = (self.opts.clock)();
        match cmd {
            Command::RequestBackup => self.trigger("manual"),
            Command::UpdateInterval(days) => {
                self.cfg.interval_days = BackupConfig::clamp_interval(days);
                self.persist();
                self.scheduler.rearm(&self.cfg, now);
                self.publish_armed("interval", now);
            }
            Command::UpdateDailyTime(time) => {
                self.cfg.daily_time = time;
                self.persist();
                self.scheduler.rearm(&self.cfg, now);
                self.publish_armed("daily_time", now);
            }
            Command::UpdateSourceFolder(path) => {
                self.cfg.source_folder = path;
                self.persist();
            }
            Command::UpdateDestination(path) => {
                self.cfg.destination_template = path;
                self.persist();
            }
            Command::Shutdown => return false,
        }
        true
    }

    /// Starts one backup cycle unless one is already in flight.
    ///
    /// A configuration that cannot produce a job (empty paths) fails the
    /// trigger without spawning anything; the scheduler stays armed and the
    /// next cycle retries.
    fn trigger(&mut self, origin: &'static str) {
        if self.busy {
            self.bus
                .publish(Event::new(EventKind::BusyRejected).with_reason(origin));
            return;
        }
        self.bus
            .publish(Event::new(EventKind::BackupTriggered).with_reason(origin));

        let job = match ArchiveJob::from_config(&self.cfg, (self.opts.clock)()) {
            Ok(job) => job,
            Err(e) => {
                self.publish_failed(&e);
                return;
            }
        };

        self.busy = true;
        let worker = CycleWorker {
            bus: self.bus.clone(),
            process: Arc::clone(&self.process),
            snapshot: self.snapshot.clone(),
            dependent_process: self.cfg.dependent_process.clone(),
            dependent_executable: self.cfg.dependent_executable.clone(),
            export_snapshot: self.cfg.export_snapshot,
            process_timeout: self.opts.process_timeout,
        };
        let done_tx = self.done_tx.clone();
        tokio::spawn(async move {
            let outcome = worker.run(job).await;
            let _ = done_tx.send(outcome).await;
        });
    }

    fn finish_cycle(&mut self, outcome: CycleOutcome) {
        match outcome.archive {
            Ok(summary) => {
                self.bus.publish(
                    Event::new(EventKind::BackupCompleted)
                        .with_path(summary.destination.display().to_string())
                        .with_reason(summary.entries.to_string())
                        .with_phase(CycleState::Idle),
                );
            }
            Err(e) => self.publish_failed(&e),
        }
        self.busy = false;
    }

    /// Waits out an in-flight cycle on shutdown, bounded by the grace.
    async fn drain(&mut self, done_rx: &mut mpsc::Receiver<CycleOutcome>) {
        self.bus.publish(Event::new(EventKind::ShutdownRequested));
        if !self.busy {
            return;
        }
        match time::timeout(self.opts.shutdown_grace, done_rx.recv()).await {
            Ok(Some(outcome)) => self.finish_cycle(outcome),
            _ => {
                self.bus.publish(
                    Event::new(EventKind::Warning)
                        .with_reason("shutdown grace exceeded; backup cycle abandoned"),
                );
            }
        }
    }

    fn publish_armed(&self, cause: &'static str, now: DateTime<Local>) {
        self.bus.publish(
            Event::new(EventKind::ScheduleArmed)
                .with_reason(cause)
                .with_remaining(self.scheduler.remaining(now)),
        );
    }

    fn publish_failed(&self, e: &BackupError) {
        self.bus.publish(
            Event::new(EventKind::BackupFailed)
                .with_reason(e.as_message())
                .with_label(e.as_label())
                .with_phase(CycleState::Idle),
        );
    }

    fn persist(&mut self) {
        if let Err(e) = self.store.store_config(&self.cfg) {
            warn!("failed to persist settings: {}", e.as_message());
            self.bus.publish(
                Event::new(EventKind::Warning)
                    .with_reason(e.as_message())
                    .with_label(e.as_label()),
            );
        }
    }
}

/// One backup cycle, run on its own task.
///
/// Walks `Stopping → Archiving → Restarting`. The restart phase runs
/// whatever the archive outcome was, so the dependent service is never left
/// down; only the archive result travels back to the loop.
struct CycleWorker {
    bus: Bus,
    process: Arc<dyn ProcessControl>,
    snapshot: Option<Arc<dyn SnapshotExport>>,
    dependent_process: Option<String>,
    dependent_executable: Option<std::path::PathBuf>,
    export_snapshot: bool,
    process_timeout: std::time::Duration,
}

impl CycleWorker {
    async fn run(self, job: ArchiveJob) -> CycleOutcome {
        if let Some(name) = &self.dependent_process {
            match time::timeout(self.process_timeout, self.process.stop_by_name(name)).await {
                Ok(Ok(count)) => {
                    self.bus.publish(
                        Event::new(EventKind::ProcessStopped)
                            .with_process(name.as_str())
                            .with_reason(count.to_string())
                            .with_phase(CycleState::Stopping),
                    );
                }
                // Stop is best-effort and never blocks progress.
                Ok(Err(e)) => {
                    self.warn_phase(CycleState::Stopping, &e.as_message(), Some(e.as_label()))
                }
                Err(_) => self.warn_phase(
                    CycleState::Stopping,
                    "dependent process stop timed out",
                    None,
                ),
            }
        }

        if self.export_snapshot {
            if let Some(exporter) = &self.snapshot {
                match exporter.export(&job.source).await {
                    Ok(path) => {
                        self.bus.publish(
                            Event::new(EventKind::SnapshotExported)
                                .with_path(path.display().to_string())
                                .with_phase(CycleState::Stopping),
                        );
                    }
                    Err(e) => {
                        // Non-fatal: the archive proceeds regardless.
                        self.bus.publish(
                            Event::new(EventKind::SnapshotFailed)
                                .with_reason(e.as_message())
                                .with_label(e.as_label())
                                .with_phase(CycleState::Stopping),
                        );
                    }
                }
            }
        }

        let archive = if job.source.is_dir() {
            self.bus.publish(
                Event::new(EventKind::ArchiveStarted)
                    .with_path(job.destination.display().to_string())
                    .with_phase(CycleState::Archiving),
            );
            let source = job.source.clone();
            let destination = job.destination.clone();
            match tokio::task::spawn_blocking(move || archive_folder(&source, &destination)).await
            {
                Ok(result) => result,
                Err(join_err) => Err(BackupError::io(format!("archive worker: {join_err}"))),
            }
        } else {
            Err(BackupError::config(format!(
                "source folder {} does not exist",
                job.source.display()
            )))
        };

        if let Some(exe) = &self.dependent_executable {
            match time::timeout(self.process_timeout, self.process.spawn(exe)).await {
                Ok(Ok(())) => {
                    self.bus.publish(
                        Event::new(EventKind::ProcessStarted)
                            .with_path(exe.display().to_string())
                            .with_phase(CycleState::Restarting),
                    );
                }
                Ok(Err(e)) => {
                    // The dependent service is down; this must be surfaced.
                    self.bus.publish(
                        Event::new(EventKind::ProcessStartFailed)
                            .with_path(exe.display().to_string())
                            .with_reason(e.as_message())
                            .with_label(e.as_label())
                            .with_phase(CycleState::Restarting),
                    );
                }
                Err(_) => self.warn_phase(
                    CycleState::Restarting,
                    "dependent process start timed out",
                    None,
                ),
            }
        }

        CycleOutcome { archive }
    }

    fn warn_phase(&self, phase: CycleState, message: &str, label: Option<&'static str>) {
        let mut ev = Event::new(EventKind::Warning)
            .with_reason(message)
            .with_phase(phase);
        if let Some(label) = label {
            ev = ev.with_label(label);
        }
        self.bus.publish(ev);
    }
}
