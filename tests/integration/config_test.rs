use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;

/// `exposer` with the user config directory pointed at an empty temp dir so
/// the developer's own config never leaks into assertions.
fn exposer(config_home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("exposer").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_home);
    for var in [
        "EXPOSER_FORMAT",
        "EXPOSER_QUIET",
        "EXPOSER_ROOT",
        "EXPOSER_BACKEND_DIR",
        "EXPOSER_EXTENSIONS",
        "EXPOSER_INCLUDE",
        "EXPOSER_EXCLUDE",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn config_show_defaults() {
    let tmp = tempfile::tempdir().unwrap();
    let home = tempfile::tempdir().unwrap();
    exposer(home.path())
        .args(["config", "show", "--path", tmp.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Loaded config files: (none)"))
        .stdout(predicate::str::contains("Resolved settings:"))
        .stdout(predicate::str::contains("defaults.format: text <- default"))
        .stdout(predicate::str::contains("defaults.quiet: false <- default"))
        .stdout(predicate::str::contains(
            "project.backend_dir: backend <- default",
        ))
        .stdout(predicate::str::contains(
            "resolve.extensions: js, mjs, cjs, jsx, ts, mts, cts, tsx <- default",
        ));
}

#[test]
fn config_show_with_project_config() {
    let tmp = tempfile::tempdir().unwrap();
    let home = tempfile::tempdir().unwrap();
    std::fs::write(
        tmp.path().join(".exposer.toml"),
        r#"
[defaults]
format = "json"
quiet = true

[project]
backend_dir = "server"

[targeting]
exclude = ["**/*.test.js"]
"#,
    )
    .unwrap();

    exposer(home.path())
        .args(["config", "show", "--path", tmp.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Loaded config files:"))
        .stdout(predicate::str::contains(".exposer.toml"))
        .stdout(predicate::str::contains(
            "defaults.format: json <- project config",
        ))
        .stdout(predicate::str::contains(
            "defaults.quiet: true <- project config",
        ))
        .stdout(predicate::str::contains(
            "project.backend_dir: server <- project config",
        ))
        .stdout(predicate::str::contains(
            "targeting.exclude: **/*.test.js <- project config",
        ));
}

#[test]
fn config_show_user_config() {
    let tmp = tempfile::tempdir().unwrap();
    let home = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(home.path().join("exposer")).unwrap();
    std::fs::write(
        home.path().join("exposer").join("config.toml"),
        "[resolve]\nextensions = [\"js\"]\n",
    )
    .unwrap();

    exposer(home.path())
        .args(["config", "show", "--path", tmp.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("resolve.extensions: js <- user config"));
}

#[test]
fn config_show_env_override() {
    let tmp = tempfile::tempdir().unwrap();
    let home = tempfile::tempdir().unwrap();
    std::fs::write(
        tmp.path().join(".exposer.toml"),
        "[project]\nbackend_dir = \"server\"\n",
    )
    .unwrap();

    exposer(home.path())
        .env("EXPOSER_BACKEND_DIR", "api")
        .args(["config", "show", "--path", tmp.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "project.backend_dir: api <- env var (EXPOSER_BACKEND_DIR)",
        ));
}

#[test]
fn config_show_changed_only() {
    let tmp = tempfile::tempdir().unwrap();
    let home = tempfile::tempdir().unwrap();

    exposer(home.path())
        .env("EXPOSER_QUIET", "1")
        .args([
            "config",
            "show",
            "--changed",
            "--path",
            tmp.path().to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "defaults.quiet: true <- env var (EXPOSER_QUIET)",
        ))
        .stdout(predicate::str::contains("defaults.format").not())
        .stdout(predicate::str::contains("[targeting]").not());
}

#[test]
fn project_config_drives_check() {
    let tmp = tempfile::tempdir().unwrap();
    let home = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(tmp.path().join("server")).unwrap();
    std::fs::create_dir_all(tmp.path().join("web")).unwrap();
    std::fs::write(
        tmp.path().join(".exposer.toml"),
        "[defaults]\nformat = \"json\"\nquiet = true\n\n[project]\nbackend_dir = \"server\"\n",
    )
    .unwrap();
    std::fs::write(
        tmp.path().join("server/api.js"),
        "/** @expose */\nexport function ping() {}\n",
    )
    .unwrap();
    std::fs::write(
        tmp.path().join("web/app.js"),
        "import { ping } from '../server/api';\n",
    )
    .unwrap();

    let output = exposer(home.path())
        .args(["check", tmp.path().to_str().unwrap()])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["metadata"]["files_checked"], 1);
    assert_eq!(json["files"][0]["rewrites"][0]["filename"], "api");
}

#[test]
fn invalid_project_config_fails() {
    let tmp = tempfile::tempdir().unwrap();
    let home = tempfile::tempdir().unwrap();
    std::fs::write(tmp.path().join(".exposer.toml"), "[defaults\nquiet =").unwrap();

    exposer(home.path())
        .args(["config", "show", "--path", tmp.path().to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid project config"));
}
