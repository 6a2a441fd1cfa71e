//! Wake/sleep interval reconstruction.
//!
//! # Algorithm Summary
//!
//! The reconstructor tracks the wake that opened the current interval and
//! the most recent sleep marker seen since then.
//!
//! 1. A sleep, hibernate or shutdown marker overwrites the sleep candidate,
//!    so aborted suspend attempts collapse into the last one.
//! 2. A wake marker closes the current interval only when a sleep candidate
//!    exists. Repeated wakes without a sleep in between are ignored.
//! 3. At end of stream the current interval is emitted, open if no sleep
//!    followed its wake.

use chrono::{DateTime, Utc};

use crate::classifier::Classifier;
use crate::error::Error;
use crate::event::{ClassifiedEvent, EventKind, LogEvent};
use crate::interval::{Interval, Timeline, WakeReason};

/// Current reconstruction state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Awake; looking for the next credible sleep marker.
    AwaitingSleep,
    /// A sleep marker was seen; looking for the wake that confirms it.
    AwaitingWake { sleep: DateTime<Utc> },
}

/// Incremental state machine turning classified events into intervals.
///
/// Events must be pushed in timestamp order. Events older than the current
/// wake candidate, and wakes older than the pending sleep, are dropped.
#[derive(Debug, Clone)]
pub struct Reconstructor {
    wake: DateTime<Utc>,
    reason: WakeReason,
    phase: Phase,
    closed: Vec<Interval>,
}

impl Reconstructor {
    /// Starts a reconstruction at the cold boot timestamp.
    pub const fn new(boot: DateTime<Utc>) -> Self {
        Self {
            wake: boot,
            reason: WakeReason::ColdBoot,
            phase: Phase::AwaitingSleep,
            closed: Vec::new(),
        }
    }

    /// Feeds one event. Returns the interval it closed, if any.
    pub fn push(&mut self, event: ClassifiedEvent) -> Option<Interval> {
        let ClassifiedEvent { timestamp, kind } = event;

        if kind == EventKind::Unclassified {
            return None;
        }
        if timestamp < self.wake {
            tracing::trace!(%timestamp, %kind, wake = %self.wake, "ignoring event before current wake");
            return None;
        }

        if kind.is_sleep() {
            self.phase = Phase::AwaitingWake { sleep: timestamp };
            return None;
        }

        let reason = match kind {
            EventKind::WakeFromSuspend => WakeReason::ResumeFromRam,
            EventKind::WakeFromHibernate => WakeReason::ResumeFromDisk,
            _ => return None,
        };

        let Phase::AwaitingWake { sleep } = self.phase else {
            tracing::trace!(%timestamp, %kind, "ignoring wake without a preceding sleep");
            return None;
        };
        if timestamp < sleep {
            tracing::trace!(%timestamp, %sleep, "ignoring wake before pending sleep");
            return None;
        }

        let interval = Interval {
            wake: self.wake,
            sleep: Some(sleep),
            reason: self.reason,
        };
        self.closed.push(interval);
        self.wake = timestamp;
        self.reason = reason;
        self.phase = Phase::AwaitingSleep;
        Some(interval)
    }

    /// The interval still being built, as it would be emitted now.
    pub const fn current(&self) -> Interval {
        let sleep = match self.phase {
            Phase::AwaitingSleep => None,
            Phase::AwaitingWake { sleep } => Some(sleep),
        };
        Interval {
            wake: self.wake,
            sleep,
            reason: self.reason,
        }
    }

    /// Ends the stream and returns the full timeline.
    pub fn finish(mut self) -> Timeline {
        let last = self.current();
        self.closed.push(last);
        Timeline::from_intervals(self.closed)
    }
}

/// Reconstructs a timeline from a boot's log events.
///
/// The first event supplies the boot timestamp and is not classified.
/// Source errors are propagated; an empty source is [`Error::EmptySession`].
pub fn reconstruct<I, E>(classifier: &Classifier, events: I) -> Result<Timeline, E>
where
    I: IntoIterator<Item = Result<LogEvent, E>>,
    E: From<Error>,
{
    let mut events = events.into_iter();
    let boot = events.next().ok_or(Error::EmptySession)??;
    tracing::debug!(boot = %boot.timestamp, "reconstructing from boot");

    let mut reconstructor = Reconstructor::new(boot.timestamp);
    for event in events {
        let classified = classifier.classify_event(&event?);
        if let Some(interval) = reconstructor.push(classified) {
            tracing::debug!(wake = %interval.wake, sleep = ?interval.sleep, reason = %interval.reason, "closed interval");
        }
    }
    Ok(reconstructor.finish())
}
