//! # resolutions-core
//!
//! Reconciles an npm `package-lock.json` with the `resolutions` declared in
//! `package.json`. Locked entries whose version conflicts with an override are
//! removed (along with everything installed beneath them), so the next
//! `npm install` resolves them again and picks up the override.
#![deny(clippy::all)]
pub mod error;
pub mod lockfile;
pub mod manifest;
pub mod path;
pub mod prune;
pub mod run;

pub use error::{ResolutionsError, Result};
pub use lockfile::PackageLock;
pub use manifest::{Manifest, Overrides};
pub use prune::{PruneOptions, PruneOutcome, PruneReport, prune, reconcile};
pub use run::{ResolutionsConfig, run};
