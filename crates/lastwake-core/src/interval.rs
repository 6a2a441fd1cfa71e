//! Awake intervals and the reconstructed timeline.

use std::fmt;

use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;

/// Why the machine was awake at the start of an interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WakeReason {
    /// Powered on from fully off.
    ColdBoot,
    /// Resumed from suspend-to-RAM (S3).
    ResumeFromRam,
    /// Resumed from hibernate-to-disk (S4).
    ResumeFromDisk,
}

impl WakeReason {
    /// Label shown in the report's "Wake From" column.
    pub const fn label(self) -> &'static str {
        match self {
            Self::ColdBoot => "S5 (boot)",
            Self::ResumeFromRam => "S3 (RAM)",
            Self::ResumeFromDisk => "S4 (disk)",
        }
    }
}

impl fmt::Display for WakeReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One continuous awake span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub wake: DateTime<Utc>,
    /// When the machine went to sleep again; `None` while still awake.
    pub sleep: Option<DateTime<Utc>>,
    pub reason: WakeReason,
}

impl Interval {
    pub const fn is_open(&self) -> bool {
        self.sleep.is_none()
    }

    /// End of the span, using `now` for an open interval.
    pub fn effective_end(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        self.sleep.unwrap_or(now)
    }

    /// Time spent awake. Clamped to zero if `now` precedes an open wake.
    pub fn awake(&self, now: DateTime<Utc>) -> TimeDelta {
        (self.effective_end(now) - self.wake).max(TimeDelta::zero())
    }
}

/// The reconstructed sequence of awake intervals for one boot.
///
/// Only the reconstructor builds timelines, so a timeline is never empty,
/// starts with the cold boot, and only its last interval can be open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timeline {
    intervals: Vec<Interval>,
}

impl Timeline {
    pub(crate) const fn from_intervals(intervals: Vec<Interval>) -> Self {
        Self { intervals }
    }

    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    /// The cold boot timestamp.
    pub fn boot(&self) -> DateTime<Utc> {
        self.intervals[0].wake
    }

    /// The most recent interval.
    pub fn last(&self) -> &Interval {
        &self.intervals[self.intervals.len() - 1]
    }

    /// Number of completed sleep/wake cycles. The boot interval is not a cycle.
    pub fn cycles(&self) -> usize {
        self.intervals.len() - 1
    }

    /// Whole seconds between the last wake-up and `now`, rounded.
    ///
    /// `None` when the last interval is closed.
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn seconds_since_last_wake_up(&self, now: DateTime<Utc>) -> Option<i64> {
        let last = self.last();
        if !last.is_open() {
            return None;
        }
        let ms = last.awake(now).num_milliseconds();
        Some((ms as f64 / 1000.0).round() as i64)
    }
}
