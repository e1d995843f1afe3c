//! CLI integration tests for bank-run

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Write `content` as the config file and return a command pointed at it
fn bank_run(content: &str) -> (TempDir, Command) {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, content).unwrap();

    let mut cmd = Command::cargo_bin("bank-run").unwrap();
    cmd.env("BANK_CONFIG", &config_path)
        .env_remove("BANK_LOG_FORMAT")
        .env_remove("RUST_LOG");

    (temp_dir, cmd)
}

#[test]
fn test_actions_from_arguments() {
    let (_dir, mut cmd) = bank_run("");

    cmd.args(["open", "deposit:200", "withdraw:100"])
        .assert()
        .success()
        .stdout("balance: 600 | loan: 0 | active\n");
}

#[test]
fn test_actions_from_stdin() {
    let (_dir, mut cmd) = bank_run("");

    cmd.write_stdin("# a short session\nopen\nrequestLoan 1000\n\npayLoan\n")
        .assert()
        .success()
        .stdout("balance: 500 | loan: 0 | active\n");
}

#[test]
fn test_inactive_account_ignores_actions() {
    let (_dir, mut cmd) = bank_run("");

    cmd.args(["deposit:200", "payLoan"])
        .assert()
        .success()
        .stdout("balance: 0 | loan: 0 | inactive\n");
}

#[test]
fn test_trace_shows_each_step() {
    let (_dir, mut cmd) = bank_run("");

    cmd.args(["--trace", "open", "close"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "openAccount -> balance: 500 | loan: 0 | active",
        ))
        .stdout(predicate::str::contains(
            "closeAccount -> ignored (balance and loan must both be zero to close)",
        ));
}

#[test]
fn test_close_settled_account() {
    let (_dir, mut cmd) = bank_run("");

    cmd.args(["open", "withdraw:500", "close"])
        .assert()
        .success()
        .stdout("balance: 0 | loan: 0 | inactive\n");
}

#[test]
fn test_json_output() {
    let (_dir, mut cmd) = bank_run("");

    let output = cmd
        .args(["--format", "json", "open", "withdraw:800"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let state: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(state["balance"], "-300");
    assert_eq!(state["loan"], "0");
    assert_eq!(state["isActive"], true);
}

#[test]
fn test_json_trace_output() {
    let (_dir, mut cmd) = bank_run("");

    let output = cmd
        .args(["--format", "json", "--trace", "open", "requestLoan:100", "requestLoan:100"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let transitions = report["transitions"].as_array().unwrap();
    assert_eq!(transitions.len(), 3);
    assert_eq!(transitions[2]["outcome"]["rejected"], "loanOutstanding");
    assert_eq!(report["state"]["loan"], "100");
}

#[test]
fn test_jsonl_output() {
    let (_dir, mut cmd) = bank_run("");

    let output = cmd
        .args(["--format", "jsonl"])
        .write_stdin("{\"type\":\"openAccount\"}\n{\"type\":\"deposit\",\"payload\":25}\n")
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);

    let last: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
    assert_eq!(last["action"]["type"], "deposit");
    assert_eq!(last["after"]["balance"], "525");
}

#[test]
fn test_unknown_action_exits_with_code_3() {
    let (_dir, mut cmd) = bank_run("");

    cmd.args(["open", "transfer:50"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Unknown action: transfer"));
}

#[test]
fn test_strict_rejects_malformed_amount() {
    let (_dir, mut cmd) = bank_run("");

    cmd.args(["--strict", "open", "deposit:12abc"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Invalid amount: 12abc"));
}

#[test]
fn test_lenient_coerces_malformed_amount() {
    let (_dir, mut cmd) = bank_run("");

    cmd.args(["open", "deposit:12abc"])
        .assert()
        .success()
        .stdout("balance: 500 | loan: 0 | active\n");
}

#[test]
fn test_strict_from_config() {
    let (_dir, mut cmd) = bank_run("[input]\ncoercion = \"strict\"\n");

    cmd.args(["open", "deposit:oops"]).assert().code(3);
}

#[test]
fn test_opening_balance_from_config() {
    let (_dir, mut cmd) = bank_run("[account]\nopening_balance = \"1000\"\n");

    cmd.arg("open")
        .assert()
        .success()
        .stdout("balance: 1000 | loan: 0 | active\n");
}

#[test]
fn test_invalid_config_exits_with_code_1() {
    let (_dir, mut cmd) = bank_run("[account\n");

    cmd.arg("open")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_explicit_config_flag() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("alt.toml");
    fs::write(&config_path, "[account]\nopening_balance = \"42\"\n").unwrap();

    let mut cmd = Command::cargo_bin("bank-run").unwrap();
    cmd.env_remove("BANK_CONFIG")
        .arg("--config")
        .arg(&config_path)
        .arg("open")
        .assert()
        .success()
        .stdout("balance: 42 | loan: 0 | active\n");
}
