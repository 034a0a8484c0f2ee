//! CLI integration tests for alterm
//!
//! Tests the binary as a user would interact with it.

use alterm::ciphers::caesar;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn alterm() -> Command {
    Command::cargo_bin("alterm").unwrap()
}

const ENGLISH: &str = "It is a truth universally acknowledged, that a single man in \
    possession of a good fortune, must be in want of a wife. However little known the \
    feelings or views of such a man may be on his first entering a neighbourhood, this \
    truth is so well fixed in the minds of the surrounding families.";

// ============================================================================
// Basic Commands
// ============================================================================

#[test]
fn test_help() {
    alterm()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Convert, encode, hash and analyze"));
}

#[test]
fn test_version() {
    alterm()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("alterm"));
}

#[test]
fn test_list_operations() {
    alterm()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Decimal to Binary"))
        .stdout(predicate::str::contains("Caesar Cracker"))
        .stdout(predicate::str::contains("BaseURL"))
        .stdout(predicate::str::contains("Temperature"));
}

#[test]
fn test_list_json() {
    let output = alterm().args(["list", "--json"]).output().unwrap();
    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let families = parsed.as_array().unwrap();
    assert!(!families.is_empty());
    assert!(families.iter().all(|f| f["operations"].is_array()));
}

// ============================================================================
// Run
// ============================================================================

#[test]
fn test_run_with_argument() {
    alterm()
        .args(["run", "Decimal to Binary", "10"])
        .assert()
        .success()
        .stdout("1010\n");
}

#[test]
fn test_run_reads_stdin() {
    alterm()
        .args(["run", "Base64", "--mode", "Encode"])
        .write_stdin("hello\n")
        .assert()
        .success()
        .stdout("aGVsbG8=\n");
}

#[test]
fn test_run_with_base() {
    alterm()
        .args(["run", "Text to ROT-N", "Hello", "--base", "13"])
        .assert()
        .success()
        .stdout("Uryyb\n");
}

#[test]
fn test_run_units_needs_both_modes() {
    alterm()
        .args(["run", "Length", "2", "--mode", "km", "--mode2", "m"])
        .assert()
        .success()
        .stdout("2000.0\n");

    alterm()
        .args(["run", "Length", "2", "--mode", "km"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Please select both source and target units"));
}

#[test]
fn test_run_error_names_operation() {
    alterm()
        .args(["run", "Num to Roman", "4000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error converting (Num to Roman)"));
}

#[test]
fn test_run_unknown_operation_suggests() {
    alterm()
        .args(["run", "Caesar Craker", "abc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Conversion not supported"))
        .stderr(predicate::str::contains("Caesar Cracker"));
}

#[test]
fn test_run_json_error() {
    alterm()
        .args(["run", "--json", "Num to Roman", "4000"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("\"kind\": \"RangeError\""));
}

#[test]
fn test_run_json_report() {
    let output = alterm()
        .args(["run", "--json", "Characters", "hello world"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed[0]["title"], "CHARACTER STATISTICS");
}

#[test]
fn test_run_from_file() {
    let path = std::env::temp_dir().join("alterm_cli_run_input.txt");
    fs::write(&path, "255").unwrap();
    alterm()
        .args(["run", "Decimal to Hexadecimal", "--file"])
        .arg(&path)
        .assert()
        .success()
        .stdout("FF\n");
    fs::remove_file(&path).ok();
}

// ============================================================================
// Detect / Crack
// ============================================================================

#[test]
fn test_detect_binary() {
    alterm()
        .arg("detect")
        .write_stdin("01001000 01101001")
        .assert()
        .success()
        .stdout(predicate::str::contains("Looks like Binary"));
}

#[test]
fn test_detect_caesar_reports_shift() {
    alterm()
        .arg("detect")
        .write_stdin(caesar::encrypt(ENGLISH, 3))
        .assert()
        .success()
        .stdout(predicate::str::contains("monoalphabetic substitution cipher"))
        .stdout(predicate::str::contains("Likely Caesar shift: 3"));
}

#[test]
fn test_crack_recovers_plaintext() {
    alterm()
        .arg("crack")
        .write_stdin(caesar::encrypt(ENGLISH, 11))
        .assert()
        .success()
        .stdout(predicate::str::contains("Shift: 11"))
        .stdout(predicate::str::contains("It is a truth universally acknowledged"));
}

#[test]
fn test_detect_empty_input_fails() {
    alterm()
        .arg("detect")
        .write_stdin("   ")
        .assert()
        .failure();
}

// ============================================================================
// Config & Global Flags
// ============================================================================

#[test]
fn test_config_json() {
    alterm()
        .args(["config", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("factorization_timeout_secs"));
}

#[test]
fn test_explicit_config_file() {
    let path = std::env::temp_dir().join("alterm_cli_override.toml");
    fs::write(&path, "[analysis]\nmost_common_limit = 3\n").unwrap();
    alterm()
        .arg("--config")
        .arg(&path)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("most_common_limit = 3"))
        .stdout(predicate::str::contains("factorization_timeout_secs = 5"));
    fs::remove_file(&path).ok();
}

#[test]
fn test_missing_config_file() {
    alterm()
        .args(["--config", "/nonexistent/alterm.toml", "config"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot load settings"));
}

#[test]
fn test_max_size_limit() {
    alterm()
        .args(["--max-size", "4", "detect"])
        .write_stdin("hello world")
        .assert()
        .failure()
        .stderr(predicate::str::contains("exceeds maximum"));

    alterm()
        .args(["--max-size", "4", "--force", "run", "Characters"])
        .write_stdin("hello world")
        .assert()
        .success();
}
