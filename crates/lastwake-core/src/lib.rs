//! Core domain logic for the wake/sleep analyzer.
//!
//! This crate contains the fundamental types and logic for:
//! - Classification: mapping journal messages to power-state transitions
//! - Reconstruction: turning classified events into awake intervals
//! - Summaries and report rendering for a reconstructed timeline

pub mod classifier;
mod error;
pub mod event;
mod interval;
pub mod reconstruct;
pub mod report;
pub mod summary;

pub use classifier::{Classifier, MarkerSet};
pub use error::Error;
pub use event::{ClassifiedEvent, EventKind, LogEvent};
pub use interval::{Interval, Timeline, WakeReason};
pub use reconstruct::{Reconstructor, reconstruct};
pub use report::Report;
pub use summary::{Summary, summarize};
