//! CLI command implementations.

pub mod boots;
pub mod follow;
pub mod report;
