//! Directory ignore patterns used while scanning a generated project.
//! Dependency and hidden directories are never treated as modules.

use crate::error::{Error, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use log::debug;

/// Patterns that are always skipped
pub const DEFAULT_IGNORE_PATTERNS: &[&str] = &["node_modules", "node_modules/**", ".*", ".*/**"];

/// Compiles the default patterns plus `extra` into a single set.
///
/// # Arguments
/// * `extra` - Additional glob patterns, matched against paths relative to the project root
///
/// # Errors
/// * `Error::ScanError` if any pattern is not a valid glob
pub fn build_ignore_set(extra: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    let patterns = DEFAULT_IGNORE_PATTERNS.iter().copied().chain(extra.iter().map(String::as_str));
    for pattern in patterns {
        debug!("Ignoring '{}'", pattern);
        builder.add(
            Glob::new(pattern)
                .map_err(|e| Error::ScanError(format!("invalid ignore pattern '{pattern}': {e}")))?,
        );
    }
    builder
        .build()
        .map_err(|e| Error::ScanError(format!("ignore patterns failed to compile: {e}")))
}
