//! End-to-end CLI tests.

use assert_cmd::Command;
use httpmock::prelude::*;
use predicates::prelude::*;
use serde_json::json;
use std::fs;
use tempfile::TempDir;

fn mailsync() -> Command {
    let mut cmd = Command::cargo_bin("mailsync").unwrap();
    cmd.env_remove("MAILSYNC_API_KEY");
    cmd.env_remove("MAILSYNC_API_URL");
    cmd
}

#[test]
fn help_lists_subcommands() {
    mailsync()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("sync"))
        .stdout(predicate::str::contains("list"));
}

#[test]
fn sync_requires_an_api_key() {
    let temp = TempDir::new().unwrap();

    mailsync()
        .args([
            "sync",
            "--templates-dir",
            temp.path().to_str().unwrap(),
            "--default-sender",
            "noreply@example.com",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("api-key"));
}

#[test]
fn sync_exits_zero_on_success() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/templates/list");
        then.status(200).json_body(json!([]));
    });
    server.mock(|when, then| {
        when.method(POST).path("/templates/add");
        then.status(200).json_body(json!({"slug": "welcome", "name": "welcome"}));
    });

    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("welcome.html"), "<html></html>").unwrap();

    mailsync()
        .args([
            "sync",
            "--api-key",
            "test-key",
            "--api-url",
            &server.base_url(),
            "--templates-dir",
            temp.path().to_str().unwrap(),
            "--default-sender",
            "noreply@example.com",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("sync.templates.create"));
}

#[test]
fn sync_exits_one_when_an_item_fails() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/templates/list");
        then.status(200).json_body(json!([]));
    });
    server.mock(|when, then| {
        when.method(POST).path("/templates/add");
        then.status(500)
            .json_body(json!({"status": "error", "name": "GeneralError", "message": "nope"}));
    });

    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("welcome.html"), "<html></html>").unwrap();

    mailsync()
        .args([
            "sync",
            "--api-key",
            "test-key",
            "--api-url",
            &server.base_url(),
            "--templates-dir",
            temp.path().to_str().unwrap(),
            "--default-sender",
            "noreply@example.com",
        ])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("ERROR"));
}

#[test]
fn dry_run_calls_no_mutation_endpoints() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/templates/list");
        then.status(200).json_body(json!([]));
    });
    let add = server.mock(|when, then| {
        when.method(POST).path("/templates/add");
        then.status(200).json_body(json!({"slug": "welcome", "name": "welcome"}));
    });

    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("welcome.html"), "<html></html>").unwrap();

    mailsync()
        .args([
            "sync",
            "--dry-run",
            "--api-key",
            "test-key",
            "--api-url",
            &server.base_url(),
            "--templates-dir",
            temp.path().to_str().unwrap(),
            "--default-sender",
            "noreply@example.com",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("would create"));

    add.assert_calls(0);
}

#[test]
fn quiet_sync_suppresses_info_events() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/templates/list");
        then.status(200).json_body(json!([]));
    });

    let temp = TempDir::new().unwrap();

    mailsync()
        .args([
            "--quiet",
            "sync",
            "--api-key",
            "test-key",
            "--api-url",
            &server.base_url(),
            "--templates-dir",
            temp.path().to_str().unwrap(),
            "--default-sender",
            "noreply@example.com",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("INFO").not());
}

#[test]
fn list_prints_remote_templates_as_json_lines() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/templates/list");
        then.status(200).json_body(json!([
            {"slug": "welcome", "name": "welcome", "subject": "Hi"},
            {"slug": "invoice", "name": "invoice"}
        ]));
    });

    mailsync()
        .args(["list", "--api-key", "test-key", "--api-url", &server.base_url()])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"slug\":\"welcome\""))
        .stdout(predicate::str::contains("\"slug\":\"invoice\""));
}

#[test]
fn list_surfaces_api_errors() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/templates/list");
        then.status(500)
            .json_body(json!({"status": "error", "name": "Invalid_Key", "message": "Invalid API key"}));
    });

    mailsync()
        .args(["list", "--api-key", "bad-key", "--api-url", &server.base_url()])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid API key"));
}

#[test]
fn completions_generate_for_bash() {
    mailsync()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("mailsync"));
}
