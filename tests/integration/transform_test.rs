use crate::fixture_path;
use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn transform_rewrites_backend_imports() {
    let output = Command::cargo_bin("exposer")
        .unwrap()
        .current_dir(fixture_path("app"))
        .args(["transform", "src/client.js"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let code = String::from_utf8(output.stdout).unwrap();
    assert!(code.starts_with("// Client entry point\nimport React from 'react';\n"));
    assert!(code.contains(
        "import { createRuntime } from \"@reshuffle/fetch-runtime\";\nconst { foo, bar } = createRuntime([\"foo\", \"bar\"], { filename: \"lib/backend\" });\n"
    ));
    assert!(code.contains(
        "const { getUser: loadUser } = createRuntime([\"getUser\"], { filename: \"users\" });"
    ));
    assert!(!code.contains("from '../backend"));
    assert!(code.contains("return [await foo(), await bar(2), await loadUser(1)];"));
    assert_eq!(code.matches("createRuntime }").count(), 1);
}

#[test]
fn transform_typescript_file() {
    Command::cargo_bin("exposer")
        .unwrap()
        .current_dir(fixture_path("app"))
        .args(["transform", "src/typed.ts"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "const { bar } = createRuntime([\"bar\"], { filename: \"lib/backend\" });",
        ))
        .stdout(predicate::str::contains(
            "import type { Doubler } from \"../backend/lib/backend\";\nconst { bar } = createRuntime(",
        ))
        .stdout(predicate::str::contains(
            "export const twice: Doubler = async (n: number): Promise<number> => bar(n);",
        ));
}

#[test]
fn transform_without_backend_imports_is_identity() {
    let original = std::fs::read_to_string(fixture_path("app").join("src/plain.js")).unwrap();
    Command::cargo_bin("exposer")
        .unwrap()
        .current_dir(fixture_path("app"))
        .args(["transform", "src/plain.js"])
        .assert()
        .success()
        .stdout(original);
}

#[test]
fn transform_writes_output_file() {
    let tmp = tempfile::tempdir().unwrap();
    let out = tmp.path().join("client.out.js");

    Command::cargo_bin("exposer")
        .unwrap()
        .current_dir(fixture_path("app"))
        .args(["transform", "src/client.js", "-o", out.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let written = std::fs::read_to_string(&out).unwrap();
    assert!(written.contains("createRuntime([\"foo\", \"bar\"]"));
}

#[test]
fn transform_with_explicit_root() {
    let app = fixture_path("app");
    Command::cargo_bin("exposer")
        .unwrap()
        .args([
            "transform",
            app.join("src/client.js").to_str().unwrap(),
            "--root",
            app.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("{ filename: \"lib/backend\" }"));
}

#[test]
fn transform_with_other_backend_dir_leaves_imports_alone() {
    let app = fixture_path("app");
    let original = std::fs::read_to_string(app.join("src/client.js")).unwrap();
    Command::cargo_bin("exposer")
        .unwrap()
        .current_dir(&app)
        .args(["transform", "src/client.js", "--backend-dir", "server"])
        .assert()
        .success()
        .stdout(original);
}

#[test]
fn transform_reports_missing_exposure() {
    Command::cargo_bin("exposer")
        .unwrap()
        .current_dir(fixture_path("broken_app"))
        .args(["transform", "src/consumer.js"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains(
            "\"secret\" is missing from \"../backend/api\", did you forget to @expose ?",
        ));
}

#[test]
fn transform_reports_exposed_but_not_exported() {
    Command::cargo_bin("exposer")
        .unwrap()
        .current_dir(fixture_path("broken_app"))
        .args(["transform", "src/legacy_consumer.js"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "helper has @expose annotation but it is not exported",
        ));
}

#[test]
fn transform_reports_unreadable_import() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(tmp.path().join("backend")).unwrap();
    std::fs::create_dir_all(tmp.path().join("src")).unwrap();
    std::fs::write(
        tmp.path().join("src/app.js"),
        "import { gone } from '../backend/missing';\n",
    )
    .unwrap();

    Command::cargo_bin("exposer")
        .unwrap()
        .current_dir(tmp.path())
        .args(["transform", "src/app.js"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "File ../backend/missing could not be read",
        ));
}

#[test]
fn transform_with_relative_env_root() {
    Command::cargo_bin("exposer")
        .unwrap()
        .current_dir(fixture_path(""))
        .env("EXPOSER_ROOT", "app")
        .args(["transform", "app/src/client.js"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "const { foo, bar } = createRuntime([\"foo\", \"bar\"], { filename: \"lib/backend\" });",
        ));
}
