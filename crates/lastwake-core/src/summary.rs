//! Uptime and awake-time totals for a timeline.

use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;

use crate::interval::Timeline;

const MICROS_PER_DAY: f64 = 86_400_000_000.0;

/// Totals derived from a timeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    /// Days from the cold boot to the end of the last interval.
    pub days_since_boot: f64,
    /// Days spent awake across all intervals.
    pub days_awake: f64,
    /// Completed sleep/wake cycles.
    pub cycles: usize,
}

/// Converts a duration to fractional days.
#[allow(clippy::cast_precision_loss)]
pub fn fractional_days(delta: TimeDelta) -> f64 {
    delta
        .num_microseconds()
        .map_or_else(|| delta.num_seconds() as f64 / 86_400.0, |us| us as f64 / MICROS_PER_DAY)
}

/// Folds a timeline into totals. Open intervals end at `now`.
pub fn summarize(timeline: &Timeline, now: DateTime<Utc>) -> Summary {
    let days_awake = timeline
        .intervals()
        .iter()
        .map(|interval| fractional_days(interval.awake(now)))
        .sum();

    let end = timeline.last().effective_end(now);
    let days_since_boot = fractional_days((end - timeline.boot()).max(TimeDelta::zero()));

    Summary {
        days_since_boot,
        days_awake,
        cycles: timeline.cycles(),
    }
}
