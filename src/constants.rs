//! Common constants used throughout sitebuild.

/// Supported configuration file names
pub const CONFIG_FILES: [&str; 3] = ["sitebuild.json", "sitebuild.yml", "sitebuild.yaml"];

/// Documentation file never copied by the asset stage
pub const README_FILE: &str = "README.md";

/// Default dotenv file, relative to the project root
pub const ENV_FILE: &str = ".env";

pub const ASSETS_SOURCE: &str = "assets";
pub const ASSETS_DESTINATION: &str = "public/assets";

pub const ENV_SOURCE: &str = "src";
pub const ENV_DESTINATION: &str = "public/js";

/// Output file spot-checked for leftover placeholders, relative to the env destination
pub const WATCH_FILE: &str = "config.js";

/// Suffix appended to a destination path to build its lock file
pub const LOCK_SUFFIX: &str = "lock";
