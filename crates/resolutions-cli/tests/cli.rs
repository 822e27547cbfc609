//! End-to-end tests for the `npm-resolutions` binary

use assert_cmd::{Command, cargo::cargo_bin_cmd};
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const MANIFEST: &str = r#"{
  "name": "demo",
  "resolutions": { "left-pad": "1.3.0" }
}"#;

const LOCKFILE: &str = r#"{
  "name": "demo",
  "lockfileVersion": 2,
  "packages": {
    "node_modules/a": {
      "version": "1.0.0"
    },
    "node_modules/a/node_modules/left-pad": {
      "version": "0.9.0"
    },
    "node_modules/a/node_modules/left-pad/node_modules/x": {
      "version": "1.0.0"
    }
  }
}
"#;

fn npm_resolutions() -> Command {
  cargo_bin_cmd!("npm-resolutions")
}

fn project(manifest: &str, lockfile: Option<&str>) -> TempDir {
  let dir = TempDir::new().unwrap();
  fs::write(dir.path().join("package.json"), manifest).unwrap();
  if let Some(lockfile) = lockfile {
    fs::write(dir.path().join("package-lock.json"), lockfile).unwrap();
  }
  dir
}

#[test]
fn help_displays() {
  npm_resolutions()
    .arg("--help")
    .assert()
    .success()
    .stdout(predicate::str::contains("resolutions"));
}

#[test]
fn prunes_mismatched_subtree() {
  let dir = project(MANIFEST, Some(LOCKFILE));

  npm_resolutions()
    .arg(dir.path())
    .assert()
    .success()
    .stdout(predicate::str::contains("removed node_modules/a/node_modules/left-pad\n"))
    .stdout(predicate::str::contains(
      "removed node_modules/a/node_modules/left-pad/node_modules/x\n",
    ))
    .stdout(predicate::str::contains(
      "Updated package-lock.json to match resolutions",
    ));

  let written = fs::read_to_string(dir.path().join("package-lock.json")).unwrap();
  assert!(written.contains("\"node_modules/a\""));
  assert!(!written.contains("left-pad"));
}

#[test]
fn runs_in_current_directory() {
  let dir = project(MANIFEST, Some(LOCKFILE));

  npm_resolutions()
    .current_dir(dir.path())
    .assert()
    .success()
    .stdout(predicate::str::contains("Updated package-lock.json"));
}

#[test]
fn dry_run_keeps_lockfile() {
  let dir = project(MANIFEST, Some(LOCKFILE));

  npm_resolutions()
    .arg("--dry-run")
    .arg(dir.path())
    .assert()
    .success()
    .stdout(predicate::str::contains("would remove node_modules/a/node_modules/left-pad"))
    .stdout(predicate::str::contains("Dry run; lockfile left unchanged"));

  let written = fs::read_to_string(dir.path().join("package-lock.json")).unwrap();
  assert_eq!(written, LOCKFILE);
}

#[test]
fn no_resolutions_is_success() {
  let dir = project(r#"{"name": "demo"}"#, Some(LOCKFILE));

  npm_resolutions()
    .arg(dir.path())
    .assert()
    .success()
    .stdout(predicate::str::contains("Dependencies match resolutions"));
}

#[test]
fn no_packages_is_success() {
  let dir = project(MANIFEST, Some(r#"{"lockfileVersion": 1}"#));

  npm_resolutions()
    .arg(dir.path())
    .assert()
    .success()
    .stdout(predicate::str::contains("package-lock.json has no packages"));
}

#[test]
fn missing_lockfile_fails() {
  let dir = project(MANIFEST, None);

  npm_resolutions()
    .arg(dir.path())
    .assert()
    .failure()
    .code(1)
    .stderr(predicate::str::contains("Error: Unable to read"))
    .stderr(predicate::str::contains("package-lock.json"));
}

#[test]
fn malformed_manifest_fails() {
  let dir = project("{", Some(LOCKFILE));

  npm_resolutions()
    .arg(dir.path())
    .assert()
    .failure()
    .stderr(predicate::str::contains("Unable to parse"));
}

#[test]
fn custom_lockfile_name() {
  let dir = project(MANIFEST, None);
  fs::write(dir.path().join("npm-shrinkwrap.json"), LOCKFILE).unwrap();

  npm_resolutions()
    .args(["--lockfile", "npm-shrinkwrap.json"])
    .arg(dir.path())
    .assert()
    .success()
    .stdout(predicate::str::contains(
      "Updated npm-shrinkwrap.json to match resolutions",
    ));

  let written = fs::read_to_string(dir.path().join("npm-shrinkwrap.json")).unwrap();
  assert!(!written.contains("left-pad"));
}
