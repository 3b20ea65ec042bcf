//! # Next-run computation and trigger detection.
//!
//! [`Scheduler`] owns a single piece of state, `next_run_at`, and two rules:
//!
//! - **Daily wall-clock target** (when configured): today's occurrence if it
//!   is still in the future, otherwise tomorrow's. Takes precedence over the
//!   day interval.
//! - **Day interval** (otherwise): exactly `now + interval_days` days.
//!
//! [`Scheduler::tick`] is called on a one-second cadence by the orchestrator.
//! It fires `triggered = true` exactly once when `now` reaches the target and
//! immediately re-arms from the configuration it was handed, so a live
//! interval change takes effect on the *next* cycle, never retroactively.
//! The returned countdown is never negative: on the trigger tick it already
//! reflects the freshly re-armed target.
//!
//! # Example
//! ```
//! use chrono::Local;
//! use foldervault::{BackupConfig, Scheduler};
//!
//! let cfg = BackupConfig {
//!     interval_days: 1,
//!     ..BackupConfig::default()
//! };
//! let now = Local::now();
//! let s = Scheduler::new(&cfg, now);
//! assert_eq!(s.next_run_at(), now + chrono::Duration::days(1));
//! ```

use std::time::Duration as StdDuration;

use chrono::{DateTime, Days, Duration as ChronoDuration, Local, NaiveDate, NaiveTime};

use crate::config::BackupConfig;
use crate::schedule::Remaining;

/// Outcome of one scheduler tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickResult {
    /// Countdown to the (possibly just re-armed) next run.
    pub remaining: Remaining,
    /// True exactly once per elapse of the target time.
    pub triggered: bool,
}

/// Computes when the next backup runs and detects elapses.
///
/// Pure with respect to time: `now` is always passed in by the caller.
#[derive(Debug, Clone)]
pub struct Scheduler {
    next_run_at: DateTime<Local>,
}

impl Scheduler {
    /// Creates a scheduler armed from `cfg` relative to `now`.
    pub fn new(cfg: &BackupConfig, now: DateTime<Local>) -> Self {
        Self {
            next_run_at: Self::compute_next_run(cfg, now),
        }
    }

    /// Computes the next run time.
    ///
    /// With a daily time configured: today's occurrence if still strictly in
    /// the future, else tomorrow's. Without one: `now + interval_days` days.
    /// The result is always strictly after `now`.
    ///
    /// A local-time occurrence that does not exist (DST gap) rolls to the
    /// next day; an ambiguous one (DST overlap) resolves to the earlier
    /// instant.
    pub fn compute_next_run(cfg: &BackupConfig, now: DateTime<Local>) -> DateTime<Local> {
        if let Some(daily) = cfg.daily_time {
            let time = daily.as_naive();
            let mut date = now.date_naive();
            for _ in 0..3 {
                if let Some(candidate) = occurrence_on(date, time) {
                    if candidate > now {
                        return candidate;
                    }
                }
                date = date + Days::new(1);
            }
        }
        now + ChronoDuration::days(i64::from(cfg.interval_days))
    }

    /// The currently armed target.
    pub fn next_run_at(&self) -> DateTime<Local> {
        self.next_run_at
    }

    /// Re-arms from `cfg` relative to `now`.
    ///
    /// Called when the interval or daily time changes while idle, so the new
    /// cadence starts from scratch with no double-counting of elapsed time.
    pub fn rearm(&mut self, cfg: &BackupConfig, now: DateTime<Local>) {
        self.next_run_at = Self::compute_next_run(cfg, now);
    }

    /// Advances the countdown by one observation of the clock.
    ///
    /// Fires `triggered` exactly once when `now >= next_run_at`, re-arming
    /// immediately from the current `cfg`. Before the target, the countdown
    /// is monotonically non-increasing (for non-decreasing `now`).
    pub fn tick(&mut self, cfg: &BackupConfig, now: DateTime<Local>) -> TickResult {
        let triggered = now >= self.next_run_at;
        if triggered {
            self.rearm(cfg, now);
        }
        TickResult {
            remaining: self.remaining_from(now),
            triggered,
        }
    }

    /// Countdown from `now` to the armed target (zero when already due).
    pub fn remaining(&self, now: DateTime<Local>) -> Remaining {
        self.remaining_from(now)
    }

    fn remaining_from(&self, now: DateTime<Local>) -> Remaining {
        let left = (self.next_run_at - now).to_std().unwrap_or(StdDuration::ZERO);
        Remaining::from_duration(left)
    }
}

/// Local occurrence of `time` on `date`, or `None` when it falls into a DST
/// gap.
fn occurrence_on(date: NaiveDate, time: NaiveTime) -> Option<DateTime<Local>> {
    date.and_time(time).and_local_timezone(Local).earliest()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DailyTime;
    use chrono::Timelike;

    fn interval_cfg(days: u32) -> BackupConfig {
        BackupConfig {
            interval_days: days,
            ..BackupConfig::default()
        }
    }

    fn daily_cfg(hour: u8, minute: u8) -> BackupConfig {
        BackupConfig {
            daily_time: Some(DailyTime::new(hour, minute).unwrap()),
            ..BackupConfig::default()
        }
    }

    #[test]
    fn interval_only_is_exactly_now_plus_days() {
        let now = Local::now();
        for days in [1u32, 2, 7, 30, 180, 365] {
            let next = Scheduler::compute_next_run(&interval_cfg(days), now);
            assert_eq!(next, now + ChronoDuration::days(i64::from(days)));
        }
    }

    #[test]
    fn daily_time_in_future_is_today() {
        let now = Local::now();
        // A target one hour ahead stays on today's date (skip the wrap hour).
        if now.hour() >= 23 {
            return;
        }
        let cfg = daily_cfg((now.hour() + 1) as u8, 0);
        let next = Scheduler::compute_next_run(&cfg, now);
        assert!(next > now);
        assert_eq!(next.date_naive(), now.date_naive());
    }

    #[test]
    fn daily_time_already_passed_rolls_to_tomorrow() {
        let now = Local::now();
        if now.hour() == 0 {
            return;
        }
        let cfg = daily_cfg((now.hour() - 1) as u8, 0);
        let next = Scheduler::compute_next_run(&cfg, now);
        assert!(next > now);
        assert_eq!(next.date_naive(), now.date_naive() + Days::new(1));
    }

    #[test]
    fn next_run_is_never_in_the_past() {
        let now = Local::now();
        for hour in 0..24u8 {
            let next = Scheduler::compute_next_run(&daily_cfg(hour, 0), now);
            assert!(next > now, "hour {hour} produced a past target");
        }
    }

    #[test]
    fn daily_time_takes_precedence_over_interval() {
        let now = Local::now();
        let mut cfg = daily_cfg(12, 0);
        cfg.interval_days = 30;
        let next = Scheduler::compute_next_run(&cfg, now);
        // Daily targets land within the next 24h; the interval would not.
        assert!(next - now <= ChronoDuration::days(1));
    }

    #[test]
    fn tick_does_not_fire_before_target() {
        let cfg = interval_cfg(1);
        let now = Local::now();
        let mut s = Scheduler::new(&cfg, now);

        let mut last = u64::MAX;
        for offset in [0i64, 1, 60, 3_600, 86_399] {
            let res = s.tick(&cfg, now + ChronoDuration::seconds(offset));
            assert!(!res.triggered, "fired early at +{offset}s");
            let secs = res.remaining.total_seconds();
            assert!(secs <= last, "countdown increased");
            last = secs;
        }
    }

    #[test]
    fn tick_fires_once_and_rearms() {
        let cfg = interval_cfg(1);
        let t0 = Local::now();
        let mut s = Scheduler::new(&cfg, t0);

        let at_target = t0 + ChronoDuration::seconds(86_400);
        let res = s.tick(&cfg, at_target);
        assert!(res.triggered);
        // Re-armed to a fresh full interval; no negative countdown shown.
        assert_eq!(s.next_run_at(), at_target + ChronoDuration::days(1));
        assert!(res.remaining.total_seconds() > 0);

        let next = s.tick(&cfg, at_target + ChronoDuration::seconds(1));
        assert!(!next.triggered, "fired twice for one elapse");
    }

    #[test]
    fn trigger_rearm_reads_current_interval() {
        let cfg = interval_cfg(1);
        let t0 = Local::now();
        let mut s = Scheduler::new(&cfg, t0);

        // Interval changed while the countdown was running.
        let updated = interval_cfg(3);
        let at_target = t0 + ChronoDuration::days(1);
        let res = s.tick(&updated, at_target);
        assert!(res.triggered);
        assert_eq!(s.next_run_at(), at_target + ChronoDuration::days(3));
    }

    #[test]
    fn rearm_resets_without_double_counting() {
        let cfg = interval_cfg(7);
        let t0 = Local::now();
        let mut s = Scheduler::new(&cfg, t0);

        // Three days pass, then the user picks a 2-day interval.
        let later = t0 + ChronoDuration::days(3);
        s.rearm(&interval_cfg(2), later);
        assert_eq!(s.next_run_at(), later + ChronoDuration::days(2));
    }
}
