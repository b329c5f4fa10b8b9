//! Dotenv loading for the environment injection stage.
//!
//! The format is deliberately small: one `KEY=VALUE` pair per line, blank lines
//! and `#` comments ignored, no quoting and no escapes. The value is everything
//! after the first `=`, trimmed, so it may contain further `=` characters.

use crate::error::{Error, Result};
use indexmap::IndexMap;
use log::{debug, warn};
use std::path::Path;

/// Ordered set of environment variables loaded from a dotenv file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvVars {
    vars: IndexMap<String, String>,
}

impl EnvVars {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a pair. A repeated key keeps its position and takes the new value.
    pub fn insert<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) -> Option<String> {
        self.vars.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for EnvVars {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut vars = EnvVars::new();
        for (key, value) in iter {
            vars.insert(key, value);
        }
        vars
    }
}

/// Splits one dotenv line into a trimmed key and value.
///
/// Returns `None` for blank lines, comments, lines without `=` and lines
/// with an empty key.
fn parse_line(line: &str) -> Option<(&str, &str)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some((key, value.trim()))
}

/// Parses dotenv content into an [`EnvVars`].
///
/// Duplicate keys are not an error: the last value wins and a warning is logged.
pub fn parse_env(content: &str) -> EnvVars {
    let mut vars = EnvVars::new();
    for (number, line) in content.lines().enumerate() {
        let Some((key, value)) = parse_line(line) else {
            continue;
        };
        if vars.insert(key, value).is_some() {
            warn!("Duplicate key '{}' on line {}, using the last value", key, number + 1);
        }
    }
    vars
}

/// Loads and parses the dotenv file at `path`.
///
/// # Errors
/// * `Error::EnvFileNotFound` if the file does not exist
/// * `Error::IoError` if it cannot be read
pub fn load_env_file<P: AsRef<Path>>(path: P) -> Result<EnvVars> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(Error::EnvFileNotFound { path: path.display().to_string() });
    }

    debug!("Loading environment from {}", path.display());
    let content = std::fs::read_to_string(path)?;
    let vars = parse_env(&content);
    debug!("Loaded {} environment variable(s)", vars.len());
    Ok(vars)
}
