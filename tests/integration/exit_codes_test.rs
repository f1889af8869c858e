use crate::fixture_path;
use assert_cmd::Command;

#[test]
fn exit_code_0_on_clean_check() {
    Command::cargo_bin("exposer")
        .unwrap()
        .arg("check")
        .arg(fixture_path("app"))
        .arg("--quiet")
        .assert()
        .code(0);
}

#[test]
fn exit_code_1_on_failed_check() {
    Command::cargo_bin("exposer")
        .unwrap()
        .arg("check")
        .arg(fixture_path("broken_app"))
        .arg("--quiet")
        .assert()
        .code(1);
}

#[test]
fn exit_code_1_on_bad_path() {
    // miette wraps errors with exit code 1
    Command::cargo_bin("exposer")
        .unwrap()
        .args(["check", "/nonexistent/path"])
        .assert()
        .failure();
}

#[test]
fn exit_code_1_on_empty_project() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(tmp.path().join("notes.txt"), "nothing to see").unwrap();

    Command::cargo_bin("exposer")
        .unwrap()
        .arg("check")
        .arg(tmp.path())
        .arg("--quiet")
        .assert()
        .code(1);
}

#[test]
fn exit_code_2_on_unknown_format() {
    // clap usage errors exit with 2
    Command::cargo_bin("exposer")
        .unwrap()
        .args(["check", "--format", "yaml"])
        .assert()
        .code(2);
}
