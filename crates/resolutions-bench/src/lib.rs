//! Synthetic lockfiles for benchmarking the pruner.

use resolutions_core::{Overrides, PackageLock};
use serde_json::{Map, Value, json};

/// Builds a lockfile with `top_level` packages, each carrying `nested`
/// children one level down. Every child is a copy of `shared` at `0.9.0`,
/// while the hoisted `shared` is at `1.0.0`.
pub fn synthetic_lockfile(top_level: usize, nested: usize) -> PackageLock {
  let mut packages = Map::new();
  packages.insert(
    String::new(),
    json!({ "name": "bench", "version": "1.0.0" }),
  );
  packages.insert(
    "node_modules/shared".to_string(),
    json!({ "version": "1.0.0" }),
  );

  for i in 0..top_level {
    let parent = format!("node_modules/pkg-{i}");
    packages.insert(
      parent.clone(),
      json!({
        "version": "1.0.0",
        "resolved": format!("https://registry.npmjs.org/pkg-{i}/-/pkg-{i}-1.0.0.tgz"),
        "integrity": "sha512-bench",
      }),
    );
    for j in 0..nested {
      let child = if j == 0 {
        format!("{parent}/node_modules/shared")
      } else {
        format!("{parent}/node_modules/dep-{j}")
      };
      packages.insert(child.clone(), json!({ "version": "0.9.0" }));
      packages.insert(
        format!("{child}/node_modules/leaf"),
        json!({ "version": "3.0.0" }),
      );
    }
  }

  let document = json!({
    "name": "bench",
    "version": "1.0.0",
    "lockfileVersion": 3,
    "requires": true,
    "packages": Value::Object(packages),
  });
  serde_json::from_value(document).expect("synthetic lockfile is an object")
}

/// The override that conflicts with every nested `shared` in [`synthetic_lockfile`]
pub fn synthetic_overrides() -> Overrides {
  [("shared", "1.0.0")].into_iter().collect()
}
