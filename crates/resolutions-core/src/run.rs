//! Loading, pruning and writing back a project's lockfile.

use crate::error::{ResolutionsError, Result};
use crate::lockfile::PackageLock;
use crate::manifest::Manifest;
use crate::prune::{PruneOptions, PruneOutcome, reconcile};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const MANIFEST_NAME: &str = "package.json";
pub const LOCKFILE_NAME: &str = "package-lock.json";

/// Where the project lives and how to treat it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionsConfig {
  directory: PathBuf,
  manifest_name: String,
  lockfile_name: String,
  prune_legacy: bool,
  dry_run: bool,
}

impl ResolutionsConfig {
  pub fn new(directory: impl Into<PathBuf>) -> Self {
    Self {
      directory: directory.into(),
      manifest_name: MANIFEST_NAME.to_string(),
      lockfile_name: LOCKFILE_NAME.to_string(),
      prune_legacy: false,
      dry_run: false,
    }
  }

  #[must_use]
  pub fn with_manifest_name(mut self, name: impl Into<String>) -> Self {
    self.manifest_name = name.into();
    self
  }

  #[must_use]
  pub fn with_lockfile_name(mut self, name: impl Into<String>) -> Self {
    self.lockfile_name = name.into();
    self
  }

  /// Also prune the legacy `dependencies` tree
  #[must_use]
  pub fn with_prune_legacy(mut self, prune_legacy: bool) -> Self {
    self.prune_legacy = prune_legacy;
    self
  }

  /// Compute the outcome but never write the lockfile
  #[must_use]
  pub fn with_dry_run(mut self, dry_run: bool) -> Self {
    self.dry_run = dry_run;
    self
  }

  pub fn directory(&self) -> &Path {
    &self.directory
  }

  pub fn manifest_path(&self) -> PathBuf {
    self.directory.join(&self.manifest_name)
  }

  /// File name of the lockfile, e.g. `package-lock.json`
  pub fn lockfile_name(&self) -> &str {
    &self.lockfile_name
  }

  pub fn lockfile_path(&self) -> PathBuf {
    self.directory.join(&self.lockfile_name)
  }

  pub fn is_dry_run(&self) -> bool {
    self.dry_run
  }

  pub fn prune_options(&self) -> PruneOptions {
    PruneOptions::default().with_prune_legacy(self.prune_legacy)
  }
}

/// Updates the lockfile in `config.directory()` to honour the manifest's
/// resolutions.
///
/// Both files must exist and parse. The lockfile is only written back when
/// pruning actually ran and this is not a dry run.
pub fn run(config: &ResolutionsConfig) -> Result<PruneOutcome> {
  let manifest_path = config.manifest_path();
  let lockfile_path = config.lockfile_path();

  let manifest_contents = read(&manifest_path)?;
  let lockfile_contents = read(&lockfile_path)?;

  let manifest = Manifest::parse(&manifest_contents).map_err(|source| ResolutionsError::Parse {
    path: manifest_path.clone(),
    source,
  })?;
  let mut lockfile =
    PackageLock::parse(&lockfile_contents).map_err(|source| ResolutionsError::Parse {
      path: lockfile_path.clone(),
      source,
    })?;

  let outcome = reconcile(&manifest, &mut lockfile, config.prune_options());
  if !outcome.is_applied() {
    return Ok(outcome);
  }

  if config.is_dry_run() {
    debug!("Dry run; not writing {}", lockfile_path.display());
    return Ok(outcome);
  }

  write(&lockfile_path, &lockfile)?;
  Ok(outcome)
}

fn read(path: &Path) -> Result<String> {
  debug!("Reading {}", path.display());
  fs::read_to_string(path).map_err(|source| {
    debug!("Unable to read {}: {source}", path.display());
    ResolutionsError::Read {
      path: path.to_path_buf(),
      source,
    }
  })
}

fn write(path: &Path, lockfile: &PackageLock) -> Result<()> {
  let contents = lockfile
    .to_json_string()
    .map_err(|source| ResolutionsError::Serialize { source })?;

  debug!("Writing {}", path.display());
  fs::write(path, contents).map_err(|source| {
    debug!("Error writing {}: {source}", path.display());
    ResolutionsError::Write {
      path: path.to_path_buf(),
      source,
    }
  })?;
  debug!("Wrote {}", path.display());
  Ok(())
}
