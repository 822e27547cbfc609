//! Error types for everything around the pruner.
//!
//! The pruner itself never fails; these cover reading, parsing and writing
//! the two files it works on.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for resolutions operations
pub type Result<T> = std::result::Result<T, ResolutionsError>;

#[derive(Error, Debug)]
pub enum ResolutionsError {
  #[error("Unable to read {}: {source}", path.display())]
  Read {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("Unable to parse {} as JSON: {source}", path.display())]
  Parse {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },

  #[error("Unable to serialize updated lockfile: {source}")]
  Serialize {
    #[source]
    source: serde_json::Error,
  },

  #[error("Unable to write updated {}: {source}", path.display())]
  Write {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
}

impl ResolutionsError {
  /// The file the failure is about, if there is one
  pub fn path(&self) -> Option<&std::path::Path> {
    match self {
      Self::Read { path, .. } | Self::Parse { path, .. } | Self::Write { path, .. } => Some(path),
      Self::Serialize { .. } => None,
    }
  }
}
