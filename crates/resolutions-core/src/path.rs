//! Helpers for the install paths used as keys of the lockfile `packages`
//! mapping, e.g. `node_modules/a/node_modules/@babel/core`.
//!
//! The root project is stored under the empty path `""`.

/// Separator between path segments. npm always writes `/`, even on Windows.
pub const SEPARATOR: char = '/';

/// Whether the entry at `path` is the package called `name`.
///
/// The path must be exactly `name` or end in `/name`, so matching respects
/// segment boundaries: `pad` never matches `node_modules/left-pad`. A bare
/// name also matches the last segment of a scoped path, so `core` matches
/// `node_modules/@babel/core`.
pub fn matches_name(path: &str, name: &str) -> bool {
  if name.is_empty() {
    return false;
  }
  path.strip_suffix(name).is_some_and(|rest| rest.is_empty() || rest.ends_with(SEPARATOR))
}

/// Whether `path` is `ancestor` itself or lives somewhere beneath it.
pub fn is_nested_under(path: &str, ancestor: &str) -> bool {
  path
    .strip_prefix(ancestor)
    .is_some_and(|rest| rest.is_empty() || rest.starts_with(SEPARATOR))
}

/// Every prefix of `path` that ends on a segment boundary, shortest first,
/// finishing with `path` itself.
///
/// `a/b/c` yields `a`, `a/b`, `a/b/c`.
pub fn ancestors(path: &str) -> impl Iterator<Item = &str> {
  path
    .match_indices(SEPARATOR)
    .map(move |(idx, _)| &path[..idx])
    .chain(std::iter::once(path))
}
