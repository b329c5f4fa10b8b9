//! Error handling for sitebuild.
//! Defines the error type and result alias used by every pipeline stage.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can abort a pipeline stage.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] std::io::Error),

    /// Represents errors raised while walking a directory tree
    #[error("Directory traversal error: {0}.")]
    WalkError(#[from] walkdir::Error),

    /// Represents an invalid exclude pattern
    #[error("Invalid exclude pattern: {0}.")]
    PatternError(#[from] globset::Error),

    /// Represents a placeholder pattern that failed to compile
    #[error("Placeholder pattern error: {0}.")]
    RegexError(#[from] regex::Error),

    /// Represents errors that occur while loading the pipeline configuration
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    #[error("Environment file '{path}' not found. Create it with KEY=VALUE lines.")]
    EnvFileNotFound { path: String },

    #[error("Source directory '{source_dir}' does not exist.")]
    SourceDoesNotExist { source_dir: String },

    #[error(
        "Destination is locked by another run: '{lock_path}'. Remove it if no build is running."
    )]
    DestinationLocked { lock_path: String },

    #[error("Unresolved placeholders left in: {}.", format_files(.files))]
    UnresolvedPlaceholders { files: Vec<PathBuf> },
}

fn format_files(files: &[PathBuf]) -> String {
    files.iter().map(|f| format!("'{}'", f.display())).collect::<Vec<_>>().join(", ")
}

/// Convenience type alias for Results with [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(1);
}
