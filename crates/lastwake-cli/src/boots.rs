//! Boot session selection.
//!
//! A session is chosen by boot ID or by an offset. Negative offsets count
//! back from the current boot, positive ones count forward from the oldest
//! boot. Offsets are resolved against `journalctl --list-boots`.

use std::path::Path;
use std::process::Command;
use std::sync::LazyLock;

use anyhow::{Context, Result};
use lastwake_core::Error;
use regex::Regex;

/// A row of `journalctl --list-boots`.
static BOOT_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(-?\d+)\s+([0-9a-f]{32})\s+(.*?)\s*$").unwrap());

/// A signed integer offset.
static OFFSET_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[+-]?\d+$").unwrap());

/// A 128-bit boot ID, with or without UUID dashes.
static BOOT_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9a-fA-F]{8}-?[0-9a-fA-F]{4}-?[0-9a-fA-F]{4}-?[0-9a-fA-F]{4}-?[0-9a-fA-F]{12}$")
        .unwrap()
});

/// A boot known to the journal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootRecord {
    /// Offset relative to the current boot (0 = current).
    pub index: i64,
    /// 32-character hex boot ID.
    pub boot_id: String,
    /// First and last entry times, as printed by journalctl.
    pub span: String,
}

/// The boot session to analyze.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Concrete boot ID; `None` for the current boot.
    pub boot_id: Option<String>,
    /// Label shown in the report header.
    pub label: String,
}

impl Session {
    pub fn current() -> Self {
        Self {
            boot_id: None,
            label: "current boot".to_string(),
        }
    }

    fn selected(boot_id: String, requested: &str) -> Self {
        Self {
            boot_id: Some(boot_id),
            label: format!("selected boot {requested}"),
        }
    }

    /// The `--boot` argument for journalctl.
    pub fn journal_arg(&self) -> String {
        self.boot_id
            .as_ref()
            .map_or_else(|| "--boot".to_string(), |id| format!("--boot={id}"))
    }
}

/// Parses the text output of `journalctl --list-boots`.
///
/// Header and unrecognized lines are skipped.
pub fn parse_boot_list(output: &str) -> Vec<BootRecord> {
    output
        .lines()
        .filter_map(|line| {
            let caps = BOOT_LINE_RE.captures(line)?;
            Some(BootRecord {
                index: caps[1].parse().ok()?,
                boot_id: caps[2].to_string(),
                span: caps[3].to_string(),
            })
        })
        .collect()
}

/// Runs `journalctl --list-boots` and parses the result.
pub fn list_boots(journalctl: &Path) -> Result<Vec<BootRecord>> {
    let output = Command::new(journalctl)
        .arg("--list-boots")
        .arg("--no-pager")
        .output()
        .with_context(|| format!("failed to start {}", journalctl.display()))?;
    if !output.status.success() {
        anyhow::bail!(
            "journalctl --list-boots exited with status {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    let boots = parse_boot_list(&String::from_utf8_lossy(&output.stdout));
    tracing::debug!(count = boots.len(), "listed boots");
    Ok(boots)
}

/// Resolves a user-supplied boot identifier to a session.
///
/// `boots` is only called when an offset has to be looked up.
pub fn resolve<F>(requested: Option<&str>, boots: F) -> Result<Session>
where
    F: FnOnce() -> Result<Vec<BootRecord>>,
{
    let Some(requested) = requested.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(Session::current());
    };

    let unresolvable = || Error::UnresolvableSessionId {
        id: requested.to_string(),
    };

    if OFFSET_RE.is_match(requested) {
        let offset: i64 = requested.parse().map_err(|_| unresolvable())?;
        if offset == 0 {
            return Ok(Session::current());
        }

        let mut boots = boots()?;
        let record = if offset < 0 {
            boots.into_iter().find(|boot| boot.index == offset)
        } else {
            boots.sort_by_key(|boot| boot.index);
            usize::try_from(offset - 1)
                .ok()
                .and_then(|nth| boots.into_iter().nth(nth))
        };

        let record = record.ok_or_else(unresolvable)?;
        tracing::debug!(offset, boot_id = %record.boot_id, "resolved boot offset");
        return Ok(Session::selected(record.boot_id, requested));
    }

    if BOOT_ID_RE.is_match(requested) {
        let boot_id = requested.replace('-', "").to_ascii_lowercase();
        return Ok(Session::selected(boot_id, requested));
    }

    Err(unresolvable().into())
}
