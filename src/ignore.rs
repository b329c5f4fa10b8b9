//! Skip rules for the asset stage.
//! `README.md` files are never copied; additional glob patterns can exclude
//! more paths, matched against the path relative to the source root.

use crate::constants::README_FILE;
use crate::error::Result;
use globset::{Glob, GlobSet, GlobSetBuilder};
use log::debug;
use std::path::Path;

/// Compiled skip rules for one asset copy run.
#[derive(Debug, Clone)]
pub struct SkipRules {
    excludes: GlobSet,
}

impl SkipRules {
    /// Compiles the extra exclude patterns.
    ///
    /// # Errors
    /// * `Error::PatternError` if any pattern is not a valid glob
    ///
    /// # Example
    /// ```
    /// use sitebuild::ignore::SkipRules;
    ///
    /// let rules = SkipRules::new(&["*.map"]).unwrap();
    /// assert!(rules.is_excluded("js/app.js.map"));
    /// ```
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let pattern = pattern.as_ref().trim();
            if pattern.is_empty() {
                continue;
            }
            debug!("Adding exclude pattern '{pattern}'");
            builder.add(Glob::new(pattern)?);
        }
        Ok(Self { excludes: builder.build()? })
    }

    /// Returns true when a file must not be copied.
    /// Only the file name is checked for `README.md`.
    pub fn is_skipped_file<P: AsRef<Path>>(&self, relative_path: P) -> bool {
        let relative_path = relative_path.as_ref();
        is_readme(relative_path) || self.is_excluded(relative_path)
    }

    /// Returns true when the path matches one of the exclude patterns.
    pub fn is_excluded<P: AsRef<Path>>(&self, relative_path: P) -> bool {
        self.excludes.is_match(relative_path.as_ref())
    }
}

impl Default for SkipRules {
    fn default() -> Self {
        Self { excludes: GlobSet::empty() }
    }
}

fn is_readme(path: &Path) -> bool {
    path.file_name().is_some_and(|name| name == README_FILE)
}
