//! End-to-end tests for the `lastwake` binary.
//!
//! A fake `journalctl` shell script stands in for the real journal. It prints
//! a fixed boot list for `--list-boots`, records its arguments otherwise, and
//! prints canned JSON entries.

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;
use std::process::{Command, Output};

use chrono::Utc;
use insta::assert_snapshot;
use tempfile::TempDir;

const BOOTS: &str = "\
IDX BOOT ID                          FIRST ENTRY                 LAST ENTRY
 -1 4d8c36f0a1b24c2b9f1e0d3c2b1a0f9e Wed 2024-02-28 07:55:40 UTC Thu 2024-02-29 23:10:05 UTC
  0 a1b2c3d4e5f60718293a4b5c6d7e8f90 Fri 2024-03-01 08:00:00 UTC Fri 2024-03-01 13:20:00 UTC
";

/// A suspend/resume cycle on 2024-03-01 ending in a shutdown, with noise.
const ENTRIES: &str = r#"{"__REALTIME_TIMESTAMP":"1709280000000000","MESSAGE":"Linux version 6.8.0"}
{"__REALTIME_TIMESTAMP":"1709280060000000","MESSAGE":"Started Session 1 of user root."}
not json at all
{"MESSAGE":"entry without a timestamp"}
{"__REALTIME_TIMESTAMP":"1709285000000000"}
{"__REALTIME_TIMESTAMP":"1709288000000000","MESSAGE":"Reached target Sleep."}
{"__REALTIME_TIMESTAMP":"1709289000000000","MESSAGE":"Suspending system..."}
{"__REALTIME_TIMESTAMP":"1709294400000000","MESSAGE":"ACPI: PM: Waking up from system sleep state S3"}
{"__REALTIME_TIMESTAMP":"1709294405000000","MESSAGE":"ACPI: PM: Waking up from system sleep state S3"}
{"__REALTIME_TIMESTAMP":"1709299200000000","MESSAGE":"Shutting down."}
"#;

struct Fixture {
    dir: TempDir,
    journalctl: PathBuf,
}

impl Fixture {
    fn new(entries: &str) -> Self {
        Self::with_exit_code(entries, 0)
    }

    fn with_exit_code(entries: &str, exit_code: i32) -> Self {
        let dir = TempDir::new().unwrap();
        let entries_path = dir.path().join("entries.jsonl");
        let boots_path = dir.path().join("boots.txt");
        let args_path = dir.path().join("args.txt");
        fs::write(&entries_path, entries).unwrap();
        fs::write(&boots_path, BOOTS).unwrap();

        let journalctl = dir.path().join("journalctl");
        let script = format!(
            "#!/bin/sh\n\
             case \"$*\" in\n\
             *--list-boots*) cat '{boots}' ;;\n\
             *) echo \"$@\" > '{args}'; cat '{entries}'; exit {exit_code} ;;\n\
             esac\n",
            boots = boots_path.display(),
            args = args_path.display(),
            entries = entries_path.display(),
        );
        fs::write(&journalctl, script).unwrap();
        fs::set_permissions(&journalctl, fs::Permissions::from_mode(0o755)).unwrap();

        Self { dir, journalctl }
    }

    fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_lastwake"))
            .env("HOME", self.dir.path())
            .env("XDG_CONFIG_HOME", self.dir.path().join("config"))
            .env("LASTWAKE_JOURNALCTL", &self.journalctl)
            .env("TZ", "UTC")
            .env_remove("RUST_LOG")
            .args(args)
            .output()
            .expect("failed to run lastwake")
    }

    fn journal_args(&self) -> Option<String> {
        fs::read_to_string(self.dir.path().join("args.txt")).ok()
    }
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn entry(micros: i64, message: &str) -> String {
    format!(r#"{{"__REALTIME_TIMESTAMP":"{micros}","MESSAGE":"{message}"}}"#)
}

#[test]
fn test_report_for_current_boot() {
    let fixture = Fixture::new(ENTRIES);

    let output = fixture.run(&[]);

    assert!(output.status.success(), "{}", stderr(&output));
    assert_snapshot!(stdout(&output), @r"
    Wake/Sleep Time SystemD Journal Analyzer [current boot]

    Initial Boot Timestamp: 2024-03-01 08:00:00

       Wake Timestamp    |   Sleep Timestamp   | Awake Time | Wake From
     ------------------- | ------------------- | ---------- | ---------
     2024-03-01 08:00:00 | 2024-03-01 10:30:00 |    2h 30m  | S5 (boot)
     2024-03-01 12:00:00 | 2024-03-01 13:20:00 |    1h 20m  | S3 (RAM)
     ------------------- | ------------------- | ---------- | ---------

    Days Since Boot: 0.22 - Days Awake: 0.16 - Wake/Sleep Cycles: 1
    ");

    let args = fixture.journal_args().unwrap();
    assert!(args.contains("--output=json"), "{args}");
    assert!(args.contains("--boot"), "{args}");
    assert!(!args.contains("--follow"), "{args}");
}

#[test]
fn test_empty_session_fails_without_report() {
    let fixture = Fixture::new("");

    let output = fixture.run(&[]);

    assert!(!output.status.success());
    assert!(stdout(&output).is_empty());
    assert!(
        stderr(&output).contains("no journal entries found"),
        "{}",
        stderr(&output)
    );
}

#[test]
fn test_seconds_since_last_wake_up() {
    let now = Utc::now().timestamp_micros();
    let entries = [
        entry(now - 1_000_000_000, "Linux version 6.8.0"),
        entry(now - 500_000_000, "Reached target Sleep."),
        entry(now - 125_000_000, "ACPI: Waking up from system sleep state S3"),
    ]
    .join("\n");
    let fixture = Fixture::new(&entries);

    let output = fixture.run(&["--seconds-since-last-wake-up"]);

    assert!(output.status.success(), "{}", stderr(&output));
    let seconds: i64 = stdout(&output).trim().parse().unwrap();
    assert!((125..135).contains(&seconds), "got {seconds}");
}

#[test]
fn test_seconds_since_last_wake_up_fails_after_shutdown() {
    let fixture = Fixture::new(ENTRIES);

    let output = fixture.run(&["--seconds-since-last-wake-up"]);

    assert!(!output.status.success());
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_negative_offset_selects_previous_boot() {
    let fixture = Fixture::new(ENTRIES);

    let output = fixture.run(&["-1"]);

    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).starts_with("Wake/Sleep Time SystemD Journal Analyzer [selected boot -1]"));
    let args = fixture.journal_args().unwrap();
    assert!(
        args.contains("--boot=4d8c36f0a1b24c2b9f1e0d3c2b1a0f9e"),
        "{args}"
    );
}

#[test]
fn test_unresolvable_offset_fails_before_reading_journal() {
    let fixture = Fixture::new(ENTRIES);

    let output = fixture.run(&["--boot-id", "-9"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("-9"), "{}", stderr(&output));
    assert!(fixture.journal_args().is_none());
}

#[test]
fn test_json_output() {
    let fixture = Fixture::new(ENTRIES);

    let output = fixture.run(&["--json"]);

    assert!(output.status.success(), "{}", stderr(&output));
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["boot"], "2024-03-01T08:00:00Z");
    assert_eq!(value["intervals"].as_array().unwrap().len(), 2);
    assert_eq!(value["intervals"][1]["sleep"], "2024-03-01T13:20:00Z");
    assert_eq!(value["summary"]["cycles"], 1);
}

#[test]
fn test_follow_prints_rows() {
    let fixture = Fixture::new(ENTRIES);

    let output = fixture.run(&["--follow"]);

    assert!(output.status.success(), "{}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("\nInitial Boot Timestamp: 2024-03-01 08:00:00\n"));
    assert!(out.contains(" 2024-03-01 08:00:00 | 2024-03-01 10:30:00 |    2h 30m  | S5 (boot)\n"));
    assert!(out.contains(" 2024-03-01 12:00:00 | 2024-03-01 13:20:00 |    1h 20m  | S3 (RAM)\n"));
    let args = fixture.journal_args().unwrap();
    assert!(args.contains("--follow"), "{args}");
}

#[test]
fn test_journalctl_failure_is_fatal() {
    let fixture = Fixture::with_exit_code(ENTRIES, 1);

    let output = fixture.run(&[]);

    assert!(!output.status.success());
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).contains("journalctl exited"), "{}", stderr(&output));
}

#[test]
fn test_list_boots() {
    let fixture = Fixture::new(ENTRIES);

    let output = fixture.run(&["--list-boots"]);

    assert!(output.status.success(), "{}", stderr(&output));
    let out = stdout(&output);
    assert_eq!(out.lines().count(), 2);
    assert!(out.contains("4d8c36f0a1b24c2b9f1e0d3c2b1a0f9e"));
}

#[test]
fn test_custom_marker_from_config_file() {
    let fixture = Fixture::new(
        &[
            entry(1_709_280_000_000_000, "boot"),
            entry(1_709_283_600_000_000, "lid closed, going to nap"),
            entry(1_709_287_200_000_000, "ACPI: Waking up from system sleep state S3"),
            entry(1_709_290_800_000_000, "Shutting down."),
        ]
        .join("\n"),
    );
    let config = fixture.dir.path().join("lastwake.toml");
    fs::write(&config, "[markers]\nsleep = [\"going to nap\"]\n").unwrap();

    let output = fixture.run(&["--config", config.to_str().unwrap()]);

    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).contains("Wake/Sleep Cycles: 1"));
}
