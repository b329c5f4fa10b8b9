//! sitebuild prepares the document root of a static site.
//! It copies static assets and renders source files with values from a
//! `.env` file substituted for `{{KEY}}` placeholders.

/// Asset stage: mirrors a directory tree, skipping documentation files
pub mod assets;

/// Command-line interface module
pub mod cli;

/// Pipeline configuration: defaults, config file and flag overlays
pub mod config;

pub mod constants;

/// Dotenv parsing
pub mod env;

/// Error types and handling
pub mod error;

pub mod files;

/// Skip rules for the asset stage
pub mod ignore;

/// Environment stage: placeholder substitution into a wiped destination
pub mod inject;

/// Destination lock files
pub mod lock;

pub mod logger;

/// Runs both stages in order
pub mod pipeline;
