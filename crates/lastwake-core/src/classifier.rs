//! Marker-phrase classification of journal messages.
//!
//! Different kernel and systemd versions word the same transition
//! differently, so each kind carries a list of literal phrases. A message
//! matches a kind when it contains any of that kind's phrases.

use serde::{Deserialize, Serialize};

use crate::event::{ClassifiedEvent, EventKind, LogEvent};

/// Marker phrases for each power-state transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerSet {
    /// Phrases announcing suspend-to-RAM.
    pub sleep: Vec<String>,
    /// Phrases announcing hibernate-to-disk.
    pub hibernate: Vec<String>,
    /// Phrases announcing a shutdown.
    pub shutdown: Vec<String>,
    /// Phrases logged when resuming from RAM.
    pub suspend_wake: Vec<String>,
    /// Phrases logged when resuming from disk.
    pub hibernate_wake: Vec<String>,
}

fn phrases(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| (*s).to_string()).collect()
}

impl Default for MarkerSet {
    fn default() -> Self {
        Self {
            sleep: phrases(&[
                "Reached target Sleep.",
                "Reached target sleep.target - Sleep.",
                "PM: suspend entry",
            ]),
            hibernate: phrases(&[
                "Suspending system...",
                "Hibernating system...",
                "PM: hibernation: hibernation entry",
            ]),
            shutdown: phrases(&["Shutting down.", "System is powering down."]),
            suspend_wake: phrases(&[
                "ACPI: Waking up from system sleep state S3",
                "ACPI: PM: Waking up from system sleep state S3",
            ]),
            hibernate_wake: phrases(&[
                "ACPI: Waking up from system sleep state S4",
                "ACPI: PM: Waking up from system sleep state S4",
            ]),
        }
    }
}

/// Maps message text to an [`EventKind`].
///
/// Sleep-type kinds are checked before wake kinds, and the first match wins.
#[derive(Debug, Clone)]
pub struct Classifier {
    rules: Vec<(EventKind, Vec<String>)>,
}

impl Classifier {
    /// Builds a classifier from a marker set. Empty phrases are dropped.
    pub fn new(markers: MarkerSet) -> Self {
        let MarkerSet {
            sleep,
            hibernate,
            shutdown,
            suspend_wake,
            hibernate_wake,
        } = markers;

        let rules = [
            (EventKind::SleepMarker, sleep),
            (EventKind::HibernateMarker, hibernate),
            (EventKind::ShutdownMarker, shutdown),
            (EventKind::WakeFromSuspend, suspend_wake),
            (EventKind::WakeFromHibernate, hibernate_wake),
        ]
        .into_iter()
        .map(|(kind, list)| {
            let list: Vec<String> = list.into_iter().filter(|p| !p.is_empty()).collect();
            (kind, list)
        })
        .collect();

        Self { rules }
    }

    /// Classifies a message by substring containment.
    pub fn classify(&self, message: &str) -> EventKind {
        self.rules
            .iter()
            .find(|(_, list)| list.iter().any(|phrase| message.contains(phrase.as_str())))
            .map_or(EventKind::Unclassified, |(kind, _)| *kind)
    }

    /// Classifies a log event. Events without a message are unclassified.
    pub fn classify_event(&self, event: &LogEvent) -> ClassifiedEvent {
        let kind = event
            .message
            .as_deref()
            .map_or(EventKind::Unclassified, |message| self.classify(message));
        ClassifiedEvent::new(event.timestamp, kind)
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(MarkerSet::default())
    }
}
