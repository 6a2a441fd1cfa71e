//! Report command: reconstructs one boot's timeline and prints it.
//!
//! Supports the table report, JSON output, and the reduced
//! seconds-since-last-wake-up output.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::{DateTime, Local, Utc};
use lastwake_core::report::{format_report, format_report_json};
use lastwake_core::{Classifier, Report, Timeline, reconstruct};

use crate::Config;
use crate::boots::Session;
use crate::journal::JournalReader;
use crate::progress::Spinner;

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    Table,
    Json,
    SecondsSinceLastWakeUp,
}

/// Reads the session's journal and reconstructs its timeline.
///
/// The spinner runs only while the journal is read.
pub fn scan(config: &Config, session: &Session, progress: bool) -> Result<Timeline> {
    let classifier = Classifier::new(config.markers.clone());
    let spinner = Spinner::start(progress, "Scanning journal...");

    let reader = JournalReader::spawn(&config.journalctl, session, false)?;
    let timeline = reconstruct(&classifier, reader)
        .with_context(|| format!("failed to analyze {}", session.label))?;

    spinner.finish();
    tracing::debug!(
        intervals = timeline.intervals().len(),
        "reconstructed timeline"
    );
    Ok(timeline)
}

/// Writes the report for a reconstructed timeline.
pub fn render<W: Write>(
    writer: &mut W,
    output: Output,
    report: &Report<'_>,
) -> Result<()> {
    match output {
        Output::Table => {
            write!(writer, "{}", format_report(report, &Local))?;
        }
        Output::Json => {
            let timezone = iana_time_zone::get_timezone().unwrap_or_else(|_| "UTC".to_string());
            let json = format_report_json(report, &timezone).context("failed to encode report")?;
            writeln!(writer, "{json}")?;
        }
        Output::SecondsSinceLastWakeUp => {
            let seconds = report
                .timeline
                .seconds_since_last_wake_up(report.generated_at)
                .context("machine has not been awake since its last sleep")?;
            writeln!(writer, "{seconds}")?;
        }
    }
    Ok(())
}

pub fn run<W: Write>(
    writer: &mut W,
    config: &Config,
    session: &Session,
    output: Output,
    progress: bool,
) -> Result<()> {
    let timeline = scan(config, session, progress)?;
    let generated_at: DateTime<Utc> = Utc::now();
    let report = Report {
        session: &session.label,
        timeline: &timeline,
        generated_at,
    };
    render(writer, output, &report)
}
