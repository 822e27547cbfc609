#![deny(clippy::all)]
//! End-to-end tests for the resolutions pruner
//!
//! Each directory under `fixtures/` is a small npm project: a `package.json`,
//! the `package-lock.json` as npm wrote it, and `expected.json`, the lockfile
//! after pruning.

use std::path::{Path, PathBuf};

pub const MANIFEST: &str = "package.json";
pub const LOCKFILE: &str = "package-lock.json";
pub const EXPECTED: &str = "expected.json";

/// The repository's `fixtures/` directory
pub fn fixtures_dir() -> PathBuf {
  Path::new(env!("CARGO_MANIFEST_DIR"))
    .parent()
    .and_then(Path::parent)
    .map(|root| root.join("fixtures"))
    .expect("crate lives two levels below the repository root")
}

/// Load one file of a fixture project, e.g. `load_fixture("nested-subtree", LOCKFILE)`
pub fn load_fixture(project: &str, filename: &str) -> String {
  load_fixture_from_path(&fixtures_dir().join(project).join(filename))
}

/// Load a fixture file from a path
pub fn load_fixture_from_path(fixture_path: &Path) -> String {
  std::fs::read_to_string(fixture_path).unwrap_or_else(|e| {
    panic!(
      "Failed to read fixture file {}: {}",
      fixture_path.display(),
      e
    )
  })
}

/// Names of every fixture project, sorted
pub fn fixture_projects() -> Vec<String> {
  let mut names: Vec<String> = std::fs::read_dir(fixtures_dir())
    .expect("fixtures directory should be readable")
    .filter_map(|entry| {
      let path = entry.ok()?.path();
      if path.join(MANIFEST).is_file() && path.join(LOCKFILE).is_file() {
        path.file_name()?.to_str().map(ToString::to_string)
      } else {
        None
      }
    })
    .collect();
  names.sort();
  names
}
