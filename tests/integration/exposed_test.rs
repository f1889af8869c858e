use crate::fixture_path;
use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn exposed_lists_functions_in_file_order() {
    Command::cargo_bin("exposer")
        .unwrap()
        .current_dir(fixture_path("app"))
        .args(["exposed", "backend/users.js"])
        .assert()
        .success()
        .stdout("getUser\nlistUsers\n");
}

#[test]
fn exposed_resolves_extensionless_path() {
    Command::cargo_bin("exposer")
        .unwrap()
        .current_dir(fixture_path("app"))
        .args(["exposed", "backend/lib/backend"])
        .assert()
        .success()
        .stdout("foo\nbar\n");
}

#[test]
fn exposed_json() {
    let output = Command::cargo_bin("exposer")
        .unwrap()
        .current_dir(fixture_path("app"))
        .args(["exposed", "backend/users.js", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["file"], "backend/users.js");
    assert_eq!(json["functions"], serde_json::json!(["getUser", "listUsers"]));
}

#[test]
fn exposed_fails_for_unexported_function() {
    Command::cargo_bin("exposer")
        .unwrap()
        .current_dir(fixture_path("broken_app"))
        .args(["exposed", "backend/legacy.js"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("helper has @expose annotation"));
}
