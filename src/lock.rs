//! Exclusive ownership of a destination directory for the duration of a run.

use crate::constants::LOCK_SUFFIX;
use crate::error::{Error, Result};
use log::{debug, warn};
use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Lock file living next to a destination directory, removed on drop.
///
/// The lock sits outside the destination so that wiping the destination
/// does not release it.
#[derive(Debug)]
pub struct DestinationLock {
    path: PathBuf,
}

impl DestinationLock {
    /// Returns the lock file path for a destination: `<destination>.lock`.
    pub fn lock_path<P: AsRef<Path>>(destination: P) -> PathBuf {
        let destination = destination.as_ref();
        let mut name = destination.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        name.push(".");
        name.push(LOCK_SUFFIX);
        destination.with_file_name(name)
    }

    /// Acquires the lock for `destination`, creating parent directories as needed.
    ///
    /// # Errors
    /// * `Error::DestinationLocked` if another run holds the lock
    pub fn acquire<P: AsRef<Path>>(destination: P) -> Result<Self> {
        let path = Self::lock_path(destination);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Err(Error::DestinationLocked { lock_path: path.display().to_string() });
            }
            Err(e) => return Err(e.into()),
        };
        // Dropping the guard removes the file if the pid write fails.
        let lock = Self { path };
        writeln!(file, "{}", std::process::id())?;

        debug!("Acquired lock {}", lock.path.display());
        Ok(lock)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for DestinationLock {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!("Released lock {}", self.path.display()),
            Err(e) => warn!("Failed to remove lock {}: {}", self.path.display(), e),
        }
    }
}
