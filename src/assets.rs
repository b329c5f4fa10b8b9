//! Asset copying: mirrors a source tree into a destination tree without
//! transforming content. `README.md` files and excluded paths are left out.

use crate::error::Result;
use crate::files::{copy_file, ensure_disjoint};
use crate::ignore::SkipRules;
use crate::lock::DestinationLock;
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Options for one asset copy run.
#[derive(Debug, Clone)]
pub struct CopyOptions {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub skip: SkipRules,
}

/// What a copy run did. Paths are relative to the source root.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CopySummary {
    pub copied: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
}

/// Copies every non-skipped file from `options.source` into `options.destination`.
///
/// A missing source directory is not an error: a warning is logged and the
/// destination is left as it is. Existing destination files are overwritten.
pub fn copy_assets(options: &CopyOptions) -> Result<CopySummary> {
    let (source, destination) = (options.source.as_path(), options.destination.as_path());
    let mut summary = CopySummary::default();

    if !source.is_dir() {
        warn!("Source directory {} does not exist, nothing to copy", source.display());
        return Ok(summary);
    }
    ensure_disjoint(source, destination)?;

    let _lock = DestinationLock::acquire(destination)?;
    fs::create_dir_all(destination)?;

    let walker = WalkDir::new(source)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_excluded_dir(entry, source, &options.skip));

    for entry in walker {
        let entry = entry?;
        let path = entry.path();
        let relative_path = relative_to(path, source);
        let target = destination.join(&relative_path);

        if path.is_dir() {
            fs::create_dir_all(&target)?;
            continue;
        }

        if options.skip.is_skipped_file(&relative_path) {
            debug!("Skipping {}", relative_path.display());
            summary.skipped.push(relative_path);
            continue;
        }

        copy_file(path, &target)?;
        println!("Copied: '{}'", target.display());
        summary.copied.push(relative_path);
    }

    Ok(summary)
}

fn relative_to(path: &Path, root: &Path) -> PathBuf {
    path.strip_prefix(root).unwrap_or(path).to_path_buf()
}

fn is_excluded_dir(entry: &DirEntry, source: &Path, skip: &SkipRules) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }
    let relative_path = relative_to(entry.path(), source);
    let excluded = skip.is_excluded(&relative_path);
    if excluded {
        debug!("Skipping directory {}", relative_path.display());
    }
    excluded
}
