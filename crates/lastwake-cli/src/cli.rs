//! Command-line argument definitions.

use std::path::PathBuf;

use clap::Parser;

/// Wake/sleep history analyzer.
///
/// Reads the systemd journal for one boot and lists every awake interval
/// between the cold boot, suspends, hibernations and resumes.
#[derive(Debug, Parser)]
#[command(name = "lastwake", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Boot to analyze: a boot ID or an offset such as -1 for the previous boot.
    #[arg(value_name = "BOOT_ID", allow_negative_numbers = true, conflicts_with = "boot_id")]
    pub boot: Option<String>,

    /// Boot to analyze (same as the positional argument).
    #[arg(long = "boot-id", value_name = "ID", allow_negative_numbers = true)]
    pub boot_id: Option<String>,

    /// Print only the seconds elapsed since the last wake-up.
    #[arg(long, conflicts_with_all = ["json", "follow", "list_boots"])]
    pub seconds_since_last_wake_up: bool,

    /// Print the report as JSON.
    #[arg(long, conflicts_with_all = ["follow", "list_boots"])]
    pub json: bool,

    /// Keep reading the journal and print intervals as they close.
    #[arg(short, long, conflicts_with = "list_boots")]
    pub follow: bool,

    /// List the boots recorded in the journal.
    #[arg(long)]
    pub list_boots: bool,

    /// Do not show the progress spinner while scanning.
    #[arg(long)]
    pub no_progress: bool,
}

impl Cli {
    /// The requested boot, from either the positional or the flag form.
    pub fn boot_arg(&self) -> Option<&str> {
        self.boot.as_deref().or(self.boot_id.as_deref())
    }
}
