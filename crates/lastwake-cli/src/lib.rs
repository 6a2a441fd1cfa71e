//! Wake/sleep analyzer CLI library.
//!
//! This crate provides the CLI interface and the journal-backed
//! collaborators (event source, boot selection, progress display).

pub mod boots;
mod cli;
pub mod commands;
mod config;
pub mod journal;
mod progress;

pub use cli::Cli;
pub use config::Config;
