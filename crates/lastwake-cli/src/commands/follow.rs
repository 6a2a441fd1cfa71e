//! Follow command: tails the journal and prints intervals as they close.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::{Local, Utc};
use lastwake_core::report::{
    format_boot_line, format_row, format_summary, format_table_header,
};
use lastwake_core::{Classifier, Error, LogEvent, Reconstructor, summarize};

use crate::Config;
use crate::boots::Session;
use crate::journal::JournalReader;

/// Runs the state machine over a live journal stream.
///
/// Rows are written as soon as their interval closes. When the stream ends
/// the still-open interval and the summary line are written.
pub fn run<W: Write>(writer: &mut W, config: &Config, session: &Session) -> Result<()> {
    let reader = JournalReader::spawn(&config.journalctl, session, true)?;
    follow(writer, &Classifier::new(config.markers.clone()), session, reader)
}

fn follow<W, I>(writer: &mut W, classifier: &Classifier, session: &Session, events: I) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = Result<LogEvent>>,
{
    let mut events = events.into_iter();
    let boot = events
        .next()
        .ok_or(Error::EmptySession)?
        .with_context(|| format!("failed to analyze {}", session.label))?;

    writeln!(
        writer,
        "Wake/Sleep Time SystemD Journal Analyzer [{}] (following)",
        session.label
    )?;
    writeln!(writer)?;
    writeln!(writer, "{}", format_boot_line(boot.timestamp, &Local))?;
    writeln!(writer)?;
    write!(writer, "{}", format_table_header())?;
    writer.flush()?;

    let mut reconstructor = Reconstructor::new(boot.timestamp);
    for event in events {
        let classified = classifier.classify_event(&event?);
        if let Some(interval) = reconstructor.push(classified) {
            writeln!(writer, "{}", format_row(&interval, Utc::now(), &Local))?;
            writer.flush()?;
        }
    }

    let now = Utc::now();
    writeln!(writer, "{}", format_row(&reconstructor.current(), now, &Local))?;
    let timeline = reconstructor.finish();
    writeln!(writer)?;
    writeln!(writer, "{}", format_summary(&summarize(&timeline, now)))?;
    Ok(())
}
