//! Small filesystem helpers shared by the pipeline stages.

use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Writes `content` to `path`, creating parent directories first.
pub fn write_file<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, content: C) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content).map_err(Error::IoError)
}

/// Copies `source` to `dest`, creating parent directories first and
/// overwriting an existing file.
pub fn copy_file<P: AsRef<Path>, Q: AsRef<Path>>(source: P, dest: Q) -> Result<()> {
    let dest = dest.as_ref();
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(source, dest).map(|_| ()).map_err(Error::IoError)
}

/// Rejects a source and destination that overlap: equal paths, a
/// destination inside its source (the walk would pick up its own output) or a
/// source inside its destination (wiping the destination would delete it).
pub fn ensure_disjoint<P: AsRef<Path>, Q: AsRef<Path>>(source: P, destination: Q) -> Result<()> {
    let (source, destination) = (source.as_ref(), destination.as_ref());
    let (normalized_source, normalized_destination) = (normalize(source)?, normalize(destination)?);
    if normalized_destination.starts_with(&normalized_source)
        || normalized_source.starts_with(&normalized_destination)
    {
        return Err(Error::ConfigError(format!(
            "source '{}' and destination '{}' overlap",
            source.display(),
            destination.display()
        )));
    }
    Ok(())
}

/// Makes `path` absolute and resolves symlinks through its nearest existing
/// ancestor. Components that do not exist yet are appended unchanged.
fn normalize(path: &Path) -> Result<PathBuf> {
    let path = if path.is_absolute() { path.to_path_buf() } else { std::env::current_dir()?.join(path) };

    let mut missing = Vec::new();
    let mut current = path.as_path();
    while !current.exists() {
        match (current.parent(), current.file_name()) {
            (Some(parent), Some(name)) => {
                missing.push(name.to_os_string());
                current = parent;
            }
            _ => return Ok(path.clone()),
        }
    }

    let mut normalized = current.canonicalize()?;
    normalized.extend(missing.iter().rev());
    Ok(normalized)
}
