//! Binary-level tests for target-intercom
//!
//! None of these reach the network: collection is disabled and no record
//! belongs to the configured users stream.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn config_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp config");
    file.write_all(br#"{"users_stream": "users", "disable_collection": true, "access_token": "test"}"#)
        .expect("Failed to write config");
    file
}

fn target(config: &NamedTempFile) -> Command {
    let mut cmd = Command::cargo_bin("target-intercom").expect("binary should build");
    cmd.arg("--config").arg(config.path());
    cmd
}

const ORDERS_SCHEMA: &str =
    r#"{"type":"SCHEMA","stream":"orders","schema":{"type":"object","required":["id"]},"key_properties":["id"]}"#;

#[test]
fn test_emits_last_state() {
    let config = config_file();
    let input = [
        ORDERS_SCHEMA,
        r#"{"type":"STATE","value":{"page":1}}"#,
        r#"{"type":"RECORD","stream":"orders","record":{"id":1}}"#,
        r#"{"type":"STATE","value":{"page":2}}"#,
    ]
    .join("\n");

    target(&config)
        .write_stdin(input)
        .assert()
        .success()
        .stdout("{\"page\":2}\n");
}

#[test]
fn test_state_cleared_by_record_emits_nothing() {
    let config = config_file();
    let input = [
        ORDERS_SCHEMA,
        r#"{"type":"STATE","value":{"page":1}}"#,
        r#"{"type":"RECORD","stream":"orders","record":{"id":1}}"#,
    ]
    .join("\n");

    target(&config).write_stdin(input).assert().success().stdout("");
}

#[test]
fn test_empty_input_emits_nothing() {
    let config = config_file();
    target(&config).write_stdin("").assert().success().stdout("");
}

#[test]
fn test_record_before_schema_fails() {
    let config = config_file();
    target(&config)
        .write_stdin(r#"{"type":"RECORD","stream":"orders","record":{"id":1}}"#)
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("before a corresponding schema"));
}

#[test]
fn test_invalid_json_fails() {
    let config = config_file();
    target(&config)
        .write_stdin("{\"type\":\"STATE\",\"value\":1}\nthis is not json\n")
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("Unable to parse line 2"));
}

#[test]
fn test_unknown_message_type_fails() {
    let config = config_file();
    target(&config)
        .write_stdin(r#"{"type":"BOOKMARK","value":1}"#)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown message type"));
}

#[test]
fn test_validation_failure_fails() {
    let config = config_file();
    let input = [ORDERS_SCHEMA, r#"{"type":"RECORD","stream":"orders","record":{"total":3}}"#].join("\n");

    target(&config)
        .write_stdin(input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed validation"));
}

#[test]
fn test_schema_without_key_properties_fails() {
    let config = config_file();
    target(&config)
        .write_stdin(r#"{"type":"SCHEMA","stream":"orders","schema":{}}"#)
        .assert()
        .failure()
        .stderr(predicate::str::contains("key_properties"));
}

#[test]
fn test_missing_config_file_fails() {
    let mut cmd = Command::cargo_bin("target-intercom").expect("binary should build");
    cmd.args(["--config", "/nonexistent/target-intercom.json"])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load configuration"));
}

#[test]
fn test_version_flag() {
    let mut cmd = Command::cargo_bin("target-intercom").expect("binary should build");
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}
