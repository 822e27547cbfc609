use crate::lockfile::{PackageLock, version_of};
use crate::manifest::{Manifest, Overrides};
use crate::path;
use crate::run::LOCKFILE_NAME;
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::fmt;
use tracing::{debug, info};

/// How a reconcile ended. None of these are failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PruneOutcome {
  /// The manifest declares no `resolutions`; the lockfile was not touched
  NoOverrides,
  /// The lockfile has no `packages` mapping; the lockfile was not touched
  NoPackageMapping,
  /// Overrides were checked against the lockfile. The report may be empty
  /// when every locked version already matched.
  PruneApplied(PruneReport),
}

impl PruneOutcome {
  /// Whether the lockfile was (potentially) changed and should be written back
  pub fn is_applied(&self) -> bool {
    matches!(self, Self::PruneApplied(_))
  }

  pub fn report(&self) -> Option<&PruneReport> {
    match self {
      Self::PruneApplied(report) => Some(report),
      Self::NoOverrides | Self::NoPackageMapping => None,
    }
  }

  /// Human readable summary naming the lockfile that was worked on
  pub fn message(&self, lockfile_name: &str) -> String {
    match self {
      Self::NoOverrides => "Dependencies match resolutions".to_string(),
      Self::NoPackageMapping => format!(
        "{lockfile_name} has no packages; maybe try running `npm install` and then re-running"
      ),
      Self::PruneApplied(_) => format!("Updated {lockfile_name} to match resolutions"),
    }
  }
}

impl fmt::Display for PruneOutcome {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.message(LOCKFILE_NAME))
  }
}

/// What a prune removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PruneReport {
  /// Removed `packages` paths, sorted
  pub removed_packages: Vec<String>,
  /// Removed legacy `dependencies` entries as `a > b > name` chains, sorted.
  /// Only filled when [`PruneOptions::prune_legacy`] is set.
  pub removed_legacy: Vec<String>,
}

impl PruneReport {
  pub fn is_empty(&self) -> bool {
    self.removed_packages.is_empty() && self.removed_legacy.is_empty()
  }

  pub fn len(&self) -> usize {
    self.removed_packages.len() + self.removed_legacy.len()
  }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PruneOptions {
  /// Also prune the legacy nested `dependencies` tree. npm v7+ ignores it
  /// whenever `packages` exists, so it is left stale by default.
  pub prune_legacy: bool,
}

impl PruneOptions {
  #[must_use]
  pub fn with_prune_legacy(mut self, prune_legacy: bool) -> Self {
    self.prune_legacy = prune_legacy;
    self
  }
}

/// Extracts overrides from `manifest` and prunes `lockfile` against them.
pub fn reconcile(
  manifest: &Manifest,
  lockfile: &mut PackageLock,
  options: PruneOptions,
) -> PruneOutcome {
  let Some(overrides) = manifest.overrides() else {
    debug!("No resolutions in package.json; not performing resolutions");
    return PruneOutcome::NoOverrides;
  };
  prune(&overrides, lockfile, options)
}

/// Removes every locked package that conflicts with an override, together
/// with everything installed beneath it.
///
/// A path conflicts with an override when it installs the overridden package
/// (see [`path::matches_name`]) at a different version. Entries without a
/// recorded version always conflict. Overrides are applied one after another
/// against the already-pruned mapping; the end result does not depend on the
/// order.
pub fn prune(
  overrides: &Overrides,
  lockfile: &mut PackageLock,
  options: PruneOptions,
) -> PruneOutcome {
  let Some(packages) = lockfile.packages_mut() else {
    debug!("No packages in package-lock.json; not performing resolutions");
    return PruneOutcome::NoPackageMapping;
  };

  let mut report = PruneReport::default();
  for (name, version) in overrides.iter() {
    debug!("Checking for resolution: name={name} version={version}");
    report
      .removed_packages
      .extend(prune_packages(packages, name, version));
  }

  if options.prune_legacy {
    if let Some(dependencies) = lockfile.legacy_dependencies_mut() {
      for (name, version) in overrides.iter() {
        prune_legacy_tree(
          dependencies,
          name,
          version,
          &mut Vec::new(),
          &mut report.removed_legacy,
        );
      }
    }
  }

  report.removed_packages.sort_unstable();
  report.removed_legacy.sort_unstable();
  if !report.is_empty() {
    info!("Removed {} lockfile entries", report.len());
  }
  PruneOutcome::PruneApplied(report)
}

/// One override's pass over `packages`. Returns the removed paths.
fn prune_packages(packages: &mut Map<String, Value>, name: &str, version: &str) -> Vec<String> {
  let doomed: BTreeSet<String> = {
    let mismatched: BTreeSet<&str> = packages
      .iter()
      .filter(|(install_path, _)| path::matches_name(install_path, name))
      .filter(|(install_path, entry)| {
        let locked = version_of(entry);
        if locked == Some(version) {
          return false;
        }
        debug!(
          "{install_path} version ({}) does not match resolution ({version}); adding to delete paths",
          locked.unwrap_or("none")
        );
        true
      })
      .map(|(install_path, _)| install_path.as_str())
      .collect();

    if mismatched.is_empty() {
      return Vec::new();
    }

    // A mismatched path nested under another one is absorbed by it, so the
    // doomed set is every path that has a mismatched ancestor (or is one).
    packages
      .keys()
      .filter(|install_path| path::ancestors(install_path).any(|prefix| mismatched.contains(prefix)))
      .cloned()
      .collect()
  };

  // `retain` keeps the order of the surviving keys
  packages.retain(|install_path, _| {
    let keep = !doomed.contains(install_path);
    if !keep {
      debug!("Deleting {install_path}");
    }
    keep
  });

  doomed.into_iter().collect()
}

/// One override's pass over a legacy `dependencies` level, recursing into
/// nested `dependencies`. Removing a node drops its whole subtree.
fn prune_legacy_tree(
  dependencies: &mut Map<String, Value>,
  name: &str,
  version: &str,
  trail: &mut Vec<String>,
  removed: &mut Vec<String>,
) {
  let conflicts = dependencies
    .get(name)
    .is_some_and(|entry| version_of(entry) != Some(version));
  if conflicts {
    trail.push(name.to_string());
    let chain = trail.join(" > ");
    trail.pop();
    debug!("Deleting legacy dependency {chain}");
    dependencies.retain(|key, _| key != name);
    removed.push(chain);
  }

  for (key, entry) in dependencies.iter_mut() {
    if let Some(nested) = entry
      .get_mut("dependencies")
      .and_then(Value::as_object_mut)
    {
      trail.push(key.clone());
      prune_legacy_tree(nested, name, version, trail, removed);
      trail.pop();
    }
  }
}
