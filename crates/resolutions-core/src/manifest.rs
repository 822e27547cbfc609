use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::warn;

/// The parts of a `package.json` we care about.
///
/// Every other field is ignored, and the manifest is never written back.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Manifest {
  /// Raw `resolutions` field. Kept loose so a malformed value degrades to
  /// "no overrides" rather than failing the whole parse.
  #[serde(default)]
  resolutions: Option<Value>,
}

impl Manifest {
  /// Parses manifest contents. The document must be a JSON object.
  pub fn parse(contents: &str) -> serde_json::Result<Self> {
    let fields: Map<String, Value> = serde_json::from_str(contents)?;
    serde_json::from_value(Value::Object(fields))
  }

  /// Extracts the declared overrides.
  ///
  /// Returns `None` when the manifest declares no `resolutions` at all, which
  /// callers treat as "nothing to do". An empty `resolutions` object is
  /// `Some` with no entries.
  pub fn overrides(&self) -> Option<Overrides> {
    let resolutions = match self.resolutions.as_ref()? {
      Value::Object(resolutions) => resolutions,
      other => {
        warn!("Ignoring `resolutions`: expected an object, found {other}");
        return None;
      }
    };

    let mut overrides = Overrides::new();
    for (name, version) in resolutions {
      match version.as_str() {
        Some(version) => overrides.insert(name, version),
        None => warn!("Ignoring resolution for {name}: version {version} is not a string"),
      }
    }
    Some(overrides)
  }
}

/// Forced versions keyed by package name.
///
/// Names are the literal `resolutions` keys, scoped ones included
/// (`@babel/core`). Iteration is in name order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
  entries: BTreeMap<String, String>,
}

impl Overrides {
  pub fn new() -> Self {
    Self::default()
  }

  /// Adds an override, replacing any earlier one for the same package.
  /// The key is kept exactly as declared.
  pub fn insert(&mut self, name: &str, version: &str) {
    self.entries.insert(name.to_string(), version.to_string());
  }

  /// Required version for `name`, if overridden
  pub fn get(&self, name: &str) -> Option<&str> {
    self.entries.get(name).map(String::as_str)
  }

  /// `(name, required version)` pairs
  pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
    self
      .entries
      .iter()
      .map(|(name, version)| (name.as_str(), version.as_str()))
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}

impl<N: AsRef<str>, V: AsRef<str>> FromIterator<(N, V)> for Overrides {
  fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
    let mut overrides = Self::new();
    for (name, version) in iter {
      overrides.insert(name.as_ref(), version.as_ref());
    }
    overrides
  }
}
