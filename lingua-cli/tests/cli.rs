//! CLI integration tests for the `lingua` binary.

use std::fs;
use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

fn lingua_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("lingua"));
    cmd.env_remove("LINGUA_API_KEY");
    cmd
}

fn write_project(root: &Path) {
    fs::write(
        root.join("lingua.yaml"),
        "source: locales/en.yaml\noutput_root: locales\nlocales:\n  - folder: fr\n    code: fr\n    name: French\n",
    )
    .expect("write lingua.yaml");
    fs::create_dir_all(root.join("locales")).expect("mkdir locales");
    fs::write(
        root.join("locales").join("en.yaml"),
        "greeting: Hello\nmenu:\n  file: File\n",
    )
    .expect("write source");
}

#[test]
fn help_lists_subcommands() {
    lingua_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("sync"))
        .stdout(contains("diff"))
        .stdout(contains("status"));
}

#[test]
fn sync_without_project_config_fails() {
    let root = TempDir::new().expect("root");
    lingua_cmd()
        .args(["sync", "--root"])
        .arg(root.path())
        .assert()
        .failure()
        .stderr(contains("lingua.yaml"));
}

#[test]
fn sync_without_credential_fails_before_any_work() {
    let root = TempDir::new().expect("root");
    write_project(root.path());
    lingua_cmd()
        .args(["sync", "--root"])
        .arg(root.path())
        .assert()
        .failure()
        .stderr(contains("LINGUA_API_KEY"));
    assert!(
        !root.path().join("locales").join("fr").exists(),
        "failed run must not create locale output"
    );
}

#[test]
fn diff_with_no_checkpoint_reports_every_key() {
    let root = TempDir::new().expect("root");
    write_project(root.path());
    lingua_cmd()
        .args(["diff", "--root"])
        .arg(root.path())
        .assert()
        .success()
        .stdout(contains("greeting"))
        .stdout(contains("menu.file"));
}

#[test]
fn status_before_first_run_reports_pending() {
    let root = TempDir::new().expect("root");
    write_project(root.path());
    lingua_cmd()
        .args(["status", "--root"])
        .arg(root.path())
        .assert()
        .success()
        .stdout(contains("first run pending"))
        .stdout(contains("fr"));
}

#[test]
fn diff_with_missing_source_fails() {
    let root = TempDir::new().expect("root");
    write_project(root.path());
    fs::remove_file(root.path().join("locales").join("en.yaml")).unwrap();
    lingua_cmd()
        .args(["diff", "--root"])
        .arg(root.path())
        .assert()
        .failure()
        .stderr(contains("en.yaml"));
}
