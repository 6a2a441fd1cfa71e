//! Raw and classified journal events.

use std::fmt;

use chrono::{DateTime, Utc};

/// A single entry read from the log source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEvent {
    /// When the entry was recorded.
    pub timestamp: DateTime<Utc>,
    /// The entry's message text, if it had a readable one.
    pub message: Option<String>,
}

impl LogEvent {
    /// Creates an event with a message.
    pub fn new(timestamp: DateTime<Utc>, message: impl Into<String>) -> Self {
        Self {
            timestamp,
            message: Some(message.into()),
        }
    }

    /// Creates an event without a message field.
    pub const fn fieldless(timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            message: None,
        }
    }
}

/// The power-state transition a log line signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Entering suspend-to-RAM.
    SleepMarker,
    /// Entering hibernate-to-disk.
    HibernateMarker,
    /// Woke up from suspend-to-RAM.
    WakeFromSuspend,
    /// Woke up from hibernate-to-disk.
    WakeFromHibernate,
    /// The system is shutting down.
    ShutdownMarker,
    /// The line says nothing about power state.
    Unclassified,
}

impl EventKind {
    /// Returns true for kinds that end an awake span.
    pub const fn is_sleep(self) -> bool {
        matches!(
            self,
            Self::SleepMarker | Self::HibernateMarker | Self::ShutdownMarker
        )
    }

    /// Returns true for kinds that start an awake span.
    pub const fn is_wake(self) -> bool {
        matches!(self, Self::WakeFromSuspend | Self::WakeFromHibernate)
    }

    /// String representation used in logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SleepMarker => "sleep",
            Self::HibernateMarker => "hibernate",
            Self::WakeFromSuspend => "wake_from_suspend",
            Self::WakeFromHibernate => "wake_from_hibernate",
            Self::ShutdownMarker => "shutdown",
            Self::Unclassified => "unclassified",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A log event tagged with its power-state meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifiedEvent {
    pub timestamp: DateTime<Utc>,
    pub kind: EventKind,
}

impl ClassifiedEvent {
    pub const fn new(timestamp: DateTime<Utc>, kind: EventKind) -> Self {
        Self { timestamp, kind }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sleep_and_wake_kinds_are_disjoint() {
        let kinds = [
            EventKind::SleepMarker,
            EventKind::HibernateMarker,
            EventKind::WakeFromSuspend,
            EventKind::WakeFromHibernate,
            EventKind::ShutdownMarker,
            EventKind::Unclassified,
        ];

        for kind in kinds {
            assert!(!(kind.is_sleep() && kind.is_wake()), "{kind} is both");
        }
        assert!(!EventKind::Unclassified.is_sleep());
        assert!(!EventKind::Unclassified.is_wake());
        assert!(EventKind::ShutdownMarker.is_sleep());
    }

    #[test]
    fn fieldless_event_has_no_message() {
        let event = LogEvent::fieldless(Utc::now());
        assert!(event.message.is_none());
    }
}
