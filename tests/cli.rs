//! End-to-end tests for the deploycheck binary.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "test assertions")]

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output};

fn write_config(dir: &Path, content: &str) -> std::path::PathBuf {
    let path = dir.join("deploy.conf");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    path
}

fn run(args: &[&str], config: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_deploycheck"))
        .args(args)
        .arg(config)
        .arg("--no-color")
        .env_remove("RUST_LOG")
        .env_remove("DEPLOYCHECK_KEYS")
        .env_remove("DEPLOYCHECK_OUTPUT")
        .output()
        .expect("failed to run deploycheck")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn valid_configuration_exits_zero() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(
        dir.path(),
        "BRIDGE_LIST = 'node-1 node-2 node-3'\nDEPLOY_HOSTS = 'node-1 node-2'\nDEPLOY_TIMEOUT = 300\n",
    );

    let output = run(&[], &config);
    let text = stdout(&output);

    assert_eq!(output.status.code(), Some(0));
    assert!(text.contains("DEPLOY_HOSTS"));
    assert!(text.trim_end().ends_with("Your configuration is valid."));
}

#[test]
fn violations_exit_one() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(
        dir.path(),
        "BRIDGE_LIST='a b c'\nDEPLOY_REDUNDANCY=2\nDEPLOY_MIN_RATIO=1.5\n",
    );

    let output = run(&["--no-echo"], &config);
    let text = stdout(&output);

    assert_eq!(output.status.code(), Some(1));
    assert!(text.contains("DEPLOY_MIN_RATIO must be between 0.0 and 1.0, got 1.5."));
    assert!(text.trim_end().ends_with("Your configuration is not valid."));
}

#[test]
fn malformed_line_exits_before_validation() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), "BRIDGE_LIST='a b'\nDEPLOY_HOSTS 'a'\n");

    let output = run(&[], &config);
    let text = stdout(&output);

    assert_eq!(output.status.code(), Some(2));
    assert!(text.contains("Error:"));
    assert!(text.contains("deploy.conf:2"));
    assert!(!text.contains("You must have one and only one"));
    assert!(text.contains("Your configuration is not valid."));
}

#[test]
fn missing_file_exits_two() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(&[], &dir.path().join("absent.conf"));
    assert_eq!(output.status.code(), Some(2));
    assert!(stdout(&output).contains("Configuration file not found"));
}

#[test]
fn missing_bridge_list_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), "DEPLOY_REDUNDANCY=1\n");

    let output = run(&["--no-echo"], &config);
    let text = stdout(&output);

    assert_eq!(output.status.code(), Some(1));
    assert!(text.contains("BRIDGE_LIST must be present in configuration"));
    assert!(text.contains("Validation stopped early"));
}

#[test]
fn json_output() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(
        dir.path(),
        "BRIDGE_LIST='a b'\nDEPLOY_HOSTS='a b c'\nDEPLOY_SUPPORT_LIVE_MIGRATION=maybe\n",
    );

    let output = run(&["--output", "json"], &config);
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(json["valid"], false);
    let rules: Vec<&str> = json["violations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["rule"].as_str().unwrap())
        .collect();
    assert_eq!(
        rules,
        ["deployment_subset", "deployment_size", "live_migration_value"]
    );
}

#[test]
fn drbd_key_scheme() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(
        dir.path(),
        "BRIDGE_LIST='a b'\nDRBD_REDUNDANCY=1\nDRBD_MIN_COUNT=1\n",
    );

    let output = run(&["--keys", "drbd"], &config);
    assert_eq!(output.status.code(), Some(0));

    let output = run(&["--keys", "deploy", "--no-echo", "-w"], &config);
    let text = stdout(&output);
    assert_eq!(output.status.code(), Some(1));
    assert!(text.contains("Unrecognized key DRBD_REDUNDANCY"));
    assert!(text.contains("DEPLOY_HOSTS / DEPLOY_REDUNDANCY"));
}

#[test]
fn hash_line_without_equals_exits_two() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), "# storage nodes\nBRIDGE_LIST='a b'\nDEPLOY_REDUNDANCY=1\n");

    let output = run(&[], &config);
    assert_eq!(output.status.code(), Some(2));
    assert!(stdout(&output).contains("deploy.conf:1"));
}

#[test]
fn oversized_timeout_is_valid() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(
        dir.path(),
        "BRIDGE_LIST='a b'\nDEPLOY_REDUNDANCY=1\nDEPLOY_TIMEOUT=99999999999999999999\n",
    );

    let output = run(&["--no-echo"], &config);
    assert_eq!(output.status.code(), Some(0));
}
