use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An npm `package-lock.json`, kept as raw JSON.
///
/// Only `packages` (and the legacy `dependencies` tree) are ever looked at.
/// Every other field, and the key order of the whole document, is written
/// back exactly as it was read.
///
/// <https://docs.npmjs.com/cli/v7/configuring-npm/package-lock-json>
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackageLock {
  fields: Map<String, Value>,
}

impl PackageLock {
  /// Parses lockfile contents. The document must be a JSON object.
  pub fn parse(contents: &str) -> serde_json::Result<Self> {
    serde_json::from_str(contents)
  }

  /// Serializes the lockfile the way npm writes it: 2-space indentation and
  /// a trailing newline.
  pub fn to_json_string(&self) -> serde_json::Result<String> {
    let mut out = serde_json::to_string_pretty(self)?;
    out.push('\n');
    Ok(out)
  }

  /// `lockfileVersion`, if present
  pub fn lockfile_version(&self) -> Option<u64> {
    self.fields.get("lockfileVersion").and_then(Value::as_u64)
  }

  /// The `packages` mapping of install path to entry.
  ///
  /// `None` when the field is missing or is not an object; both mean there
  /// is nothing to prune.
  pub fn packages(&self) -> Option<&Map<String, Value>> {
    self.fields.get("packages").and_then(Value::as_object)
  }

  pub fn packages_mut(&mut self) -> Option<&mut Map<String, Value>> {
    self.fields.get_mut("packages").and_then(Value::as_object_mut)
  }

  /// The legacy `lockfileVersion: 1` style `dependencies` tree
  pub fn legacy_dependencies_mut(&mut self) -> Option<&mut Map<String, Value>> {
    self
      .fields
      .get_mut("dependencies")
      .and_then(Value::as_object_mut)
  }

  /// Looks up a single `packages` entry by install path
  pub fn package(&self, path: &str) -> Option<&Value> {
    self.packages()?.get(path)
  }

  /// Whether an entry exists at `path`
  pub fn contains_package(&self, path: &str) -> bool {
    self.package(path).is_some()
  }
}

/// The `version` recorded on a `packages` or `dependencies` entry.
///
/// Anything that is not a string (missing, `null`, a number) yields `None`.
pub fn version_of(entry: &Value) -> Option<&str> {
  entry.get("version").and_then(Value::as_str)
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  const LOCKFILE: &str = r#"{
  "name": "demo",
  "version": "1.0.0",
  "lockfileVersion": 2,
  "requires": true,
  "packages": {
    "": {
      "name": "demo",
      "version": "1.0.0",
      "dependencies": {
        "left-pad": "^1.1.0"
      }
    },
    "node_modules/left-pad": {
      "version": "1.1.0",
      "resolved": "https://registry.npmjs.org/left-pad/-/left-pad-1.1.0.tgz",
      "integrity": "sha512-abc"
    }
  },
  "dependencies": {
    "left-pad": {
      "version": "1.1.0"
    }
  }
}
"#;

  #[test]
  fn test_parse_lockfile() {
    let lockfile = PackageLock::parse(LOCKFILE).unwrap();

    assert_eq!(lockfile.lockfile_version(), Some(2));
    assert_eq!(lockfile.packages().map(Map::len), Some(2));
    assert!(lockfile.contains_package(""));
    assert_eq!(
      lockfile.package("node_modules/left-pad").and_then(version_of),
      Some("1.1.0")
    );
  }

  #[test]
  fn test_serialize_keeps_layout() {
    let lockfile = PackageLock::parse(LOCKFILE).unwrap();
    assert_eq!(lockfile.to_json_string().unwrap(), LOCKFILE);
  }

  #[test]
  fn test_missing_packages() {
    let lockfile = PackageLock::parse(r#"{"lockfileVersion": 1, "dependencies": {}}"#).unwrap();
    assert!(lockfile.packages().is_none());
    assert!(!lockfile.contains_package(""));
  }

  #[test]
  fn test_packages_not_an_object() {
    let lockfile = PackageLock::parse(r#"{"packages": []}"#).unwrap();
    assert!(lockfile.packages().is_none());
  }

  #[test]
  fn test_rejects_non_object_document() {
    assert!(PackageLock::parse("[]").is_err());
  }

  #[test]
  fn test_version_of() {
    let entry = serde_json::json!({ "version": "1.0.0" });
    assert_eq!(version_of(&entry), Some("1.0.0"));

    let entry = serde_json::json!({ "resolved": "file:../x" });
    assert_eq!(version_of(&entry), None);

    let entry = serde_json::json!({ "version": 1 });
    assert_eq!(version_of(&entry), None);
  }
}
