//! Countdown decomposition for display surfaces.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Time left until the next run, split into display components.
///
/// Produced once per scheduler tick and carried on
/// [`CountdownTick`](crate::events::EventKind::CountdownTick) events.
/// A value of all zeros means the trigger is firing on this tick; negative
/// countdowns are never produced. Serializable so display surfaces can ship
/// it over whatever wire they use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Remaining {
    /// Whole days left.
    pub days: u64,
    /// Hours left after days, `0..24`.
    pub hours: u64,
    /// Minutes left after hours, `0..60`.
    pub minutes: u64,
    /// Seconds left after minutes, `0..60`.
    pub seconds: u64,
}

impl Remaining {
    /// Zero countdown (trigger boundary).
    pub const ZERO: Remaining = Remaining {
        days: 0,
        hours: 0,
        minutes: 0,
        seconds: 0,
    };

    /// Decomposes a duration into days/hours/minutes/seconds.
    pub fn from_duration(d: Duration) -> Self {
        let total = d.as_secs();
        let (days, rest) = (total / 86_400, total % 86_400);
        let (hours, rest) = (rest / 3_600, rest % 3_600);
        let (minutes, seconds) = (rest / 60, rest % 60);
        Self {
            days,
            hours,
            minutes,
            seconds,
        }
    }

    /// Total seconds represented by this countdown.
    pub fn total_seconds(&self) -> u64 {
        self.days * 86_400 + self.hours * 3_600 + self.minutes * 60 + self.seconds
    }
}

impl fmt::Display for Remaining {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} days, {} hours, {} minutes, {:02} seconds",
            self.days, self.hours, self.minutes, self.seconds
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decomposes_mixed_duration() {
        let r = Remaining::from_duration(Duration::from_secs(2 * 86_400 + 3 * 3_600 + 4 * 60 + 5));
        assert_eq!(
            r,
            Remaining {
                days: 2,
                hours: 3,
                minutes: 4,
                seconds: 5
            }
        );
        assert_eq!(r.total_seconds(), 2 * 86_400 + 3 * 3_600 + 4 * 60 + 5);
    }

    #[test]
    fn zero_duration_is_zero() {
        assert_eq!(Remaining::from_duration(Duration::ZERO), Remaining::ZERO);
    }

    #[test]
    fn display_pads_seconds() {
        let r = Remaining::from_duration(Duration::from_secs(61));
        assert_eq!(r.to_string(), "0 days, 0 hours, 1 minutes, 01 seconds");
    }
}
