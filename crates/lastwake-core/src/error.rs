//! Domain errors for wake/sleep reconstruction.

use thiserror::Error;

/// Fatal conditions that prevent a report from being produced.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// The selected boot has no log entries, so there is no boot timestamp.
    #[error("no journal entries found for the selected boot")]
    EmptySession,

    /// A boot identifier or offset that does not map to any known boot.
    #[error("boot id {id:?} does not match any boot in the journal")]
    UnresolvableSessionId { id: String },
}
