//! Elapsed time value object

use std::fmt;
use std::time::{Duration as StdDuration, SystemTime};

pub const SECS_PER_MINUTE: u64 = 60;
pub const SECS_PER_HOUR: u64 = 60 * SECS_PER_MINUTE;
pub const SECS_PER_DAY: u64 = 24 * SECS_PER_HOUR;
/// Calendar-free month used for display (30 days)
pub const SECS_PER_MONTH: u64 = 30 * SECS_PER_DAY;
/// Calendar-free year used for display (365 days)
pub const SECS_PER_YEAR: u64 = 365 * SECS_PER_DAY;

/// Time elapsed since some instant, at whole-second precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Elapsed {
    seconds: u64,
}

/// An `Elapsed` split into display units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElapsedParts {
    pub years: u64,
    pub months: u64,
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl Elapsed {
    pub const fn from_secs(seconds: u64) -> Self {
        Self { seconds }
    }

    /// Time from `earlier` to `now`; zero if `earlier` lies in the future
    pub fn between(earlier: SystemTime, now: SystemTime) -> Self {
        let secs = now
            .duration_since(earlier)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Self::from_secs(secs)
    }

    pub const fn as_secs(&self) -> u64 {
        self.seconds
    }

    pub const fn parts(&self) -> ElapsedParts {
        let mut rest = self.seconds;
        let years = rest / SECS_PER_YEAR;
        rest %= SECS_PER_YEAR;
        let months = rest / SECS_PER_MONTH;
        rest %= SECS_PER_MONTH;
        let days = rest / SECS_PER_DAY;
        rest %= SECS_PER_DAY;
        let hours = rest / SECS_PER_HOUR;
        rest %= SECS_PER_HOUR;

        ElapsedParts {
            years,
            months,
            days,
            hours,
            minutes: rest / SECS_PER_MINUTE,
            seconds: rest % SECS_PER_MINUTE,
        }
    }
}

impl From<StdDuration> for Elapsed {
    fn from(d: StdDuration) -> Self {
        Self::from_secs(d.as_secs())
    }
}

impl fmt::Display for Elapsed {
    /// Years, months and days are omitted when zero; hours, minutes and
    /// seconds are always shown.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = self.parts();

        if p.years > 0 {
            write!(f, "{}y ", p.years)?;
        }
        if p.months > 0 {
            write!(f, "{}mo ", p.months)?;
        }
        if p.days > 0 {
            write!(f, "{}d ", p.days)?;
        }
        write!(f, "{}h {}m {}s", p.hours, p.minutes, p.seconds)
    }
}
