//! Integration tests for the `bizdesk` binary.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn bizdesk() -> Command {
    cargo_bin_cmd!("bizdesk")
}

#[test]
fn help_describes_the_tool() {
    bizdesk()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Client, invoice and cost desk tools"));
}

#[test]
fn version_reports_core() {
    bizdesk()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("core"));
}

#[test]
fn valid_tax_codes_exit_zero() {
    bizdesk()
        .args(["tax-code", "validate", "RSSMRA85M01H501Q", " bncgnn90a41f205c "])
        .assert()
        .success()
        .stdout(predicate::str::contains("RSSMRA85M01H501Q: valid"))
        .stdout(predicate::str::contains("BNCGNN90A41F205C: valid"));
}

#[test]
fn any_invalid_tax_code_exits_one() {
    bizdesk()
        .args(["tax-code", "validate", "RSSMRA85M01H501Q", "RSSMRA85M01H501X"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "RSSMRA85M01H501X: invalid (tax code check character mismatch: expected `Q`, found `X`)",
        ));
}

#[test]
fn validate_json_lists_each_code() {
    let output = bizdesk()
        .args(["--output", "json", "tax-code", "validate", "VRDLGU70T10L219V", "SHORT"])
        .output()
        .expect("run bizdesk");
    assert_eq!(output.status.code(), Some(1));

    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    let entries = value.as_array().expect("array of results");
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["valid"], true);
    assert_eq!(entries[1]["valid"], false);
    assert_eq!(entries[1]["code"], "SHORT");
}

#[test]
fn check_char_prints_computed_character() {
    bizdesk()
        .args(["tax-code", "check-char", "RSSMRA85M01H501"])
        .assert()
        .success()
        .stdout("Q\n");
}

#[test]
fn check_char_rejects_short_prefix() {
    bizdesk()
        .args(["tax-code", "check-char", "RSSMRA"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("15 letters or digits"));
}

#[test]
fn demo_dashboard_renders_selected_year() {
    bizdesk()
        .args(["demo", "dashboard", "--year", "2024"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Revenue and costs by month - 2024"))
        .stdout(predicate::str::contains("Mar"))
        .stdout(predicate::str::contains("Unknown client: 3"))
        .stdout(predicate::str::contains("notification [success] Statistics updated."));
}

#[test]
fn demo_dashboard_all_years_uses_year_labels() {
    bizdesk()
        .args(["demo", "dashboard"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Revenue and costs by year"))
        .stdout(predicate::str::contains("2025"));
}

#[test]
fn demo_dashboard_json_is_parseable() {
    let output = bizdesk()
        .args(["--output", "json", "demo", "dashboard", "--year", "2025"])
        .output()
        .expect("run bizdesk");
    assert!(output.status.success());

    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    assert_eq!(value["period"], "2025");
    assert_eq!(value["summary"]["invoice_count"], 7);
}

#[test]
fn demo_dashboard_unknown_year_fails_with_server_message() {
    bizdesk()
        .args(["demo", "dashboard", "--year", "1999"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "notification [error] No invoice statistics for year 1999.",
        ));
}

#[test]
fn demo_dashboard_json_failure_reports_posted_error() {
    let output = bizdesk()
        .args(["--output", "json", "demo", "dashboard", "--year", "1999"])
        .output()
        .expect("run bizdesk");
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());

    let value: serde_json::Value =
        serde_json::from_slice(&output.stderr).expect("stderr is JSON");
    assert_eq!(value["error"], "No invoice statistics for year 1999.");
}

#[test]
fn demo_dashboard_rejects_bad_selector() {
    bizdesk()
        .args(["demo", "dashboard", "--year", "last"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid period selector `last`"));
}

#[test]
fn demo_dashboard_uses_configured_messages() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("bizdesk.json");
    fs::write(
        &path,
        r#"{ "dashboard": { "success_message": "Dashboard ready." } }"#,
    )
    .expect("write config");

    bizdesk()
        .args(["demo", "dashboard", "--year", "2025", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("notification [success] Dashboard ready."));
}

#[test]
fn config_check_accepts_partial_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("bizdesk.json");
    fs::write(&path, r#"{ "notifications": { "anchor": "bottom_left" } }"#)
        .expect("write config");

    bizdesk()
        .args(["config", "check"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains(": ok"));
}

#[test]
fn config_check_rejects_unknown_keys() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("bizdesk.json");
    fs::write(&path, r#"{ "theme": "dark" }"#).expect("write config");

    bizdesk()
        .args(["config", "check"])
        .arg(&path)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid config JSON"));
}

#[test]
fn log_dir_must_be_absolute() {
    bizdesk()
        .args(["--log-dir", "relative/logs", "version"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("absolute"));
}

#[test]
fn log_dir_receives_log_file() {
    let dir = tempfile::tempdir().expect("temp dir");

    bizdesk()
        .arg("--log-dir")
        .arg(dir.path())
        .args(["--log-level", "debug", "tax-code", "validate", "RSSMRA85M01H501Q"])
        .assert()
        .success();

    let has_log_file = fs::read_dir(dir.path())
        .expect("read log dir")
        .filter_map(Result::ok)
        .any(|entry| entry.file_name().to_string_lossy().starts_with("bizdesk"));
    assert!(has_log_file);
}
