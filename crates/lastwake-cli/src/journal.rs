//! Journal event source backed by `journalctl --output=json`.

use std::io::{BufRead, BufReader, Lines};
use std::path::Path;
use std::process::{Child, ChildStdout, Command, Stdio};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use lastwake_core::LogEvent;
use serde::Deserialize;
use serde_json::Value;

use crate::boots::Session;

/// One line of `journalctl --output=json`.
///
/// Only the fields needed for classification are read. Both are optional so
/// fieldless entries still deserialize.
#[derive(Debug, Deserialize)]
struct JournalEntry {
    #[serde(rename = "__REALTIME_TIMESTAMP", default)]
    realtime: Option<Value>,
    #[serde(rename = "MESSAGE", default)]
    message: Option<Value>,
}

/// Parses the realtime timestamp, given as microseconds since the epoch.
fn parse_realtime(value: &Value) -> Option<DateTime<Utc>> {
    let micros = match value {
        Value::String(s) => s.parse::<i64>().ok()?,
        Value::Number(n) => n.as_i64()?,
        _ => return None,
    };
    DateTime::from_timestamp_micros(micros)
}

/// Extracts message text. Binary messages arrive as byte arrays.
fn parse_message(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Array(items) => {
            let bytes = items
                .iter()
                .map(|item| item.as_u64().and_then(|b| u8::try_from(b).ok()))
                .collect::<Option<Vec<u8>>>()?;
            Some(String::from_utf8_lossy(&bytes).into_owned())
        }
        _ => None,
    }
}

/// Parses a single JSON line into an event.
///
/// Returns `None` for lines that are not JSON objects or have no usable
/// timestamp. A missing or unreadable message yields a fieldless event.
pub fn parse_entry(line: &str) -> Option<LogEvent> {
    let entry: JournalEntry = match serde_json::from_str(line) {
        Ok(entry) => entry,
        Err(e) => {
            tracing::debug!(error = %e, "skipping malformed journal line");
            return None;
        }
    };

    let Some(timestamp) = entry.realtime.as_ref().and_then(parse_realtime) else {
        tracing::debug!("skipping journal entry without timestamp");
        return None;
    };

    Some(LogEvent {
        timestamp,
        message: entry.message.and_then(parse_message),
    })
}

/// Builds the `journalctl` invocation for a session.
pub fn journal_command(journalctl: &Path, session: &Session, follow: bool) -> Command {
    let mut command = Command::new(journalctl);
    command
        .arg("--system")
        .arg("--no-pager")
        .arg("--output=json")
        .arg("--output-fields=MESSAGE")
        .arg(session.journal_arg());
    if follow {
        command.arg("--follow").arg("--lines=all");
    }
    command
}

/// Streams events from a running `journalctl` process.
///
/// Yields entries in journal order. When the output ends, the exit status is
/// checked and a failure is yielded as a final error.
pub struct JournalReader {
    child: Child,
    lines: Lines<BufReader<ChildStdout>>,
    done: bool,
    reaped: bool,
}

impl JournalReader {
    /// Spawns `journalctl` for the session.
    pub fn spawn(journalctl: &Path, session: &Session, follow: bool) -> Result<Self> {
        let mut command = journal_command(journalctl, session, follow);
        tracing::debug!(?command, "starting journalctl");

        let mut child = command
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .with_context(|| format!("failed to start {}", journalctl.display()))?;
        let stdout = child
            .stdout
            .take()
            .context("failed to capture journalctl stdout")?;

        Ok(Self {
            child,
            lines: BufReader::new(stdout).lines(),
            done: false,
            reaped: false,
        })
    }

    fn wait(&mut self) -> Result<()> {
        let status = self.child.wait();
        self.reaped = true;
        let status = status.context("failed to wait for journalctl")?;
        if !status.success() {
            anyhow::bail!("journalctl exited with status {status}");
        }
        Ok(())
    }

    /// Kills and reaps the child unless it has already been waited on.
    fn stop(&mut self) {
        if !self.reaped {
            let _ = self.child.kill();
            let _ = self.child.wait();
            self.reaped = true;
        }
    }
}

impl Iterator for JournalReader {
    type Item = Result<LogEvent>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            match self.lines.next() {
                Some(Ok(line)) => {
                    if line.trim().is_empty() {
                        continue;
                    }
                    if let Some(event) = parse_entry(&line) {
                        return Some(Ok(event));
                    }
                }
                Some(Err(e)) => {
                    self.done = true;
                    return Some(Err(e).context("failed to read journalctl output"));
                }
                None => {
                    self.done = true;
                    return self.wait().err().map(Err);
                }
            }
        }
    }
}

impl Drop for JournalReader {
    fn drop(&mut self) {
        self.stop();
    }
}
