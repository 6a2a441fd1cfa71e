//! Report rendering: the wake/sleep table, the summary line and JSON.

use std::fmt::{self, Write};

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use serde::Serialize;

use crate::interval::{Interval, Timeline, WakeReason};
use crate::summary::{Summary, summarize};

/// Calendar format for timestamp columns.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Rendered in the sleep column while the machine is still awake.
pub const STILL_AWAKE: &str = "(Still Awake)";

const HEADERS: [&str; 4] = ["Wake Timestamp", "Sleep Timestamp", "Awake Time", "Wake From"];
const SEPARATOR: [&str; 4] = [
    "-------------------",
    "-------------------",
    "----------",
    "---------",
];

/// Everything needed to render a report.
#[derive(Debug, Clone, Copy)]
pub struct Report<'a> {
    /// Human-readable session label, e.g. "current boot".
    pub session: &'a str,
    pub timeline: &'a Timeline,
    /// The instant open intervals are measured up to.
    pub generated_at: DateTime<Utc>,
}

impl Report<'_> {
    pub fn summary(&self) -> Summary {
        summarize(self.timeline, self.generated_at)
    }
}

fn columns(cells: [&str; 4]) -> String {
    let [wake, sleep, awake, reason] = cells;
    let row = format!(" {wake:^19} | {sleep:^19} | {awake:^10} | {reason:^9}");
    row.trim_end().to_string()
}

fn timestamp<Tz>(instant: DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    instant.with_timezone(tz).format(TIMESTAMP_FORMAT).to_string()
}

/// Formats an awake duration as hours and minutes, e.g. `  2h 30m`.
pub fn format_awake(delta: TimeDelta) -> String {
    let total_minutes = delta.num_minutes().max(0);
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;
    format!("{hours:3}h {minutes:2}m")
}

/// The column header and separator rule.
pub fn format_table_header() -> String {
    format!("{}\n{}\n", columns(HEADERS), columns(SEPARATOR))
}

/// One table row for an interval.
pub fn format_row<Tz>(interval: &Interval, now: DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let wake = timestamp(interval.wake, tz);
    let sleep = interval
        .sleep
        .map_or_else(|| STILL_AWAKE.to_string(), |sleep| timestamp(sleep, tz));
    let awake = format_awake(interval.awake(now));
    columns([&wake, &sleep, &awake, interval.reason.label()])
}

/// The line naming the cold boot instant.
pub fn format_boot_line<Tz>(boot: DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    format!("Initial Boot Timestamp: {}", timestamp(boot, tz))
}

/// The trailing summary line.
pub fn format_summary(summary: &Summary) -> String {
    format!(
        "Days Since Boot: {:.2} - Days Awake: {:.2} - Wake/Sleep Cycles: {}",
        summary.days_since_boot, summary.days_awake, summary.cycles
    )
}

/// Formats the full human-readable report.
pub fn format_report<Tz>(report: &Report<'_>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let mut output = String::new();

    writeln!(
        output,
        "Wake/Sleep Time SystemD Journal Analyzer [{}]",
        report.session
    )
    .unwrap();
    writeln!(output).unwrap();
    writeln!(output, "{}", format_boot_line(report.timeline.boot(), tz)).unwrap();
    writeln!(output).unwrap();

    output.push_str(&format_table_header());
    for interval in report.timeline.intervals() {
        writeln!(output, "{}", format_row(interval, report.generated_at, tz)).unwrap();
    }
    writeln!(output, "{}", columns(SEPARATOR)).unwrap();

    writeln!(output).unwrap();
    writeln!(output, "{}", format_summary(&report.summary())).unwrap();

    output
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    generated_at: DateTime<Utc>,
    timezone: &'a str,
    session: &'a str,
    boot: DateTime<Utc>,
    intervals: Vec<JsonInterval>,
    summary: Summary,
}

#[derive(Debug, Serialize)]
struct JsonInterval {
    wake: DateTime<Utc>,
    sleep: Option<DateTime<Utc>>,
    awake_seconds: i64,
    wake_reason: WakeReason,
}

/// Formats the report as pretty-printed JSON.
pub fn format_report_json(report: &Report<'_>, timezone: &str) -> serde_json::Result<String> {
    let intervals = report
        .timeline
        .intervals()
        .iter()
        .map(|interval| JsonInterval {
            wake: interval.wake,
            sleep: interval.sleep,
            awake_seconds: interval.awake(report.generated_at).num_seconds(),
            wake_reason: interval.reason,
        })
        .collect();

    let json = JsonReport {
        generated_at: report.generated_at,
        timezone,
        session: report.session,
        boot: report.timeline.boot(),
        intervals,
        summary: report.summary(),
    };
    serde_json::to_string_pretty(&json)
}
