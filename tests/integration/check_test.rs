use crate::fixture_path;
use assert_cmd::Command;
use predicates::prelude::*;

fn check_json(fixture: &str, extra: &[&str]) -> (bool, serde_json::Value) {
    let mut cmd = Command::cargo_bin("exposer").unwrap();
    cmd.arg("check")
        .arg(fixture_path(fixture))
        .args(["--format", "json", "--quiet"])
        .args(extra);
    let output = cmd.output().unwrap();
    let json = serde_json::from_slice(&output.stdout).unwrap();
    (output.status.success(), json)
}

fn file<'a>(json: &'a serde_json::Value, path: &str) -> &'a serde_json::Value {
    json["files"]
        .as_array()
        .unwrap()
        .iter()
        .find(|f| f["path"] == path)
        .unwrap_or_else(|| panic!("{path} not in report"))
}

#[test]
fn check_clean_project() {
    let (ok, json) = check_json("app", &[]);
    assert!(ok);

    let metadata = &json["metadata"];
    assert_eq!(metadata["files_checked"], 4);
    assert_eq!(metadata["files_rewritten"], 2);
    assert_eq!(metadata["files_failed"], 0);
    assert_eq!(metadata["imports_rewritten"], 3);

    let client = file(&json, "src/client.js");
    assert_eq!(client["status"], "rewritten");
    assert_eq!(client["rewrites"][0]["line"], 3);
    assert_eq!(client["rewrites"][0]["filename"], "lib/backend");
    assert_eq!(client["rewrites"][0]["methods"], serde_json::json!(["foo", "bar"]));
    assert_eq!(client["rewrites"][1]["filename"], "users");

    assert_eq!(file(&json, "src/plain.js")["status"], "unchanged");
}

#[test]
fn check_skips_backend_files() {
    let (_, json) = check_json("app", &[]);
    let paths: Vec<&str> = json["files"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["path"].as_str().unwrap())
        .collect();
    assert!(paths.iter().all(|p| !p.starts_with("backend/")));
}

#[test]
fn check_reports_each_failing_file() {
    let (ok, json) = check_json("broken_app", &[]);
    assert!(!ok);
    assert_eq!(json["metadata"]["files_failed"], 2);
    assert_eq!(file(&json, "src/ok.js")["status"], "rewritten");

    let consumer = file(&json, "src/consumer.js");
    assert_eq!(consumer["status"], "failed");
    assert!(consumer["error"]
        .as_str()
        .unwrap()
        .contains("\"secret\" is missing from \"../backend/api\""));

    let legacy = file(&json, "src/legacy_consumer.js");
    assert!(legacy["error"]
        .as_str()
        .unwrap()
        .contains("helper has @expose annotation but it is not exported"));
}

#[test]
fn check_text_output() {
    Command::cargo_bin("exposer")
        .unwrap()
        .arg("check")
        .arg(fixture_path("broken_app"))
        .args(["--quiet"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Expose Check Report"))
        .stdout(predicate::str::contains("src/ok.js:1  ../backend/api -> api [ping]"))
        .stdout(predicate::str::contains("src/consumer.js: \"secret\" is missing"))
        .stderr(predicate::str::contains("2 of 3 files failed the expose check"));
}

#[test]
fn check_exclude_failing_files() {
    let (ok, json) = check_json(
        "broken_app",
        &["--exclude", "**/consumer.js", "--exclude", "**/legacy_*.js"],
    );
    assert!(ok);
    assert_eq!(json["metadata"]["files_checked"], 1);
}

#[test]
fn check_include_pattern() {
    let (ok, json) = check_json("app", &["--include", "**/*.ts"]);
    assert!(ok);
    assert_eq!(json["metadata"]["files_checked"], 1);
    assert_eq!(file(&json, "src/typed.ts")["status"], "rewritten");
}

#[test]
fn check_single_file_with_root() {
    let app = fixture_path("app");
    let (ok, json) = check_json(
        "app/src/client.js",
        &["--root", app.to_str().unwrap()],
    );
    assert!(ok);
    assert_eq!(json["metadata"]["files_checked"], 1);
    let client = file(&json, "src/client.js");
    assert_eq!(client["status"], "rewritten");
    assert_eq!(client["rewrites"][0]["filename"], "lib/backend");
}

#[test]
fn check_single_file_uses_its_directory_as_root() {
    // Without a project config the file's directory is the root, so
    // src/backend does not exist and nothing is rewritten.
    let (ok, json) = check_json("app/src/client.js", &[]);
    assert!(ok);
    assert_eq!(json["metadata"]["files_checked"], 1);
    assert_eq!(file(&json, "client.js")["status"], "unchanged");
}
