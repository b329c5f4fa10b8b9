//! Environment injection: renders a source tree of text files into a
//! destination tree, replacing `{{KEY}}` placeholders with dotenv values.
//!
//! The destination is wiped before every run, so its content depends only on
//! the source tree and the environment file.

use crate::env::{load_env_file, EnvVars};
use crate::error::{Error, Result};
use crate::files::{copy_file, ensure_disjoint, write_file};
use crate::lock::DestinationLock;
use indexmap::IndexMap;
use log::{debug, warn};
use regex::{NoExpand, Regex};
use std::borrow::Cow;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Matches any `{{NAME}}` token left after substitution.
const LEFTOVER_PATTERN: &str = r"\{\{([^{}]*)\}\}";

/// Placeholder replacement compiled once per run from an [`EnvVars`].
#[derive(Debug, Clone)]
pub struct Substitutor {
    patterns: Vec<(Regex, String)>,
    leftover: Regex,
}

impl Substitutor {
    /// Builds one literal pattern per key, in the set's order.
    ///
    /// Keys are escaped, so `A.B` only matches `{{A.B}}`.
    pub fn new(vars: &EnvVars) -> Result<Self> {
        let patterns = vars
            .iter()
            .map(|(key, value)| {
                let pattern = regex::escape(&format!("{{{{{key}}}}}"));
                Ok((Regex::new(&pattern)?, value.to_string()))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { patterns, leftover: Regex::new(LEFTOVER_PATTERN)? })
    }

    /// Replaces every known placeholder in `content`. Unknown tokens are kept.
    pub fn apply(&self, content: &str) -> String {
        let mut output = content.to_string();
        for (pattern, value) in &self.patterns {
            let replaced = match pattern.replace_all(&output, NoExpand(value)) {
                Cow::Borrowed(_) => continue,
                Cow::Owned(replaced) => replaced,
            };
            output = replaced;
        }
        output
    }

    /// Names of the `{{NAME}}` tokens present in `content`, in order of appearance.
    pub fn unresolved(&self, content: &str) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for caps in self.leftover.captures_iter(content) {
            let name = caps[1].to_string();
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }
}

/// Replaces every `{{KEY}}` in `content` with the matching value from `vars`.
///
/// # Example
/// ```
/// use sitebuild::env::EnvVars;
/// use sitebuild::inject::replace_placeholders;
///
/// let vars: EnvVars = [("API_KEY", "abc")].into_iter().collect();
/// let out = replace_placeholders("key={{API_KEY}} other={{OTHER}}", &vars).unwrap();
/// assert_eq!(out, "key=abc other={{OTHER}}");
/// ```
pub fn replace_placeholders(content: &str, vars: &EnvVars) -> Result<String> {
    Ok(Substitutor::new(vars)?.apply(content))
}

/// Options for one environment injection run.
#[derive(Debug, Clone)]
pub struct InjectOptions {
    pub env_file: PathBuf,
    pub source: PathBuf,
    pub destination: PathBuf,
    /// Output file, relative to `destination`, checked for leftover `{{`
    pub watch: Option<PathBuf>,
    /// Fail when any output file keeps an unresolved placeholder
    pub strict: bool,
}

/// What an injection run produced. Paths are relative to the destination.
#[derive(Debug, Default)]
pub struct InjectSummary {
    pub generated: Vec<PathBuf>,
    /// Files detected as binary and copied unchanged
    pub copied_binary: Vec<PathBuf>,
    pub unresolved: IndexMap<PathBuf, Vec<String>>,
}

fn is_binary(bytes: &[u8]) -> bool {
    bytes.contains(&0) || std::str::from_utf8(bytes).is_err()
}

/// Walks `source` and writes the substituted copy of every file under `destination`.
pub fn process_files<P: AsRef<Path>, Q: AsRef<Path>>(
    source: P,
    destination: Q,
    substitutor: &Substitutor,
) -> Result<InjectSummary> {
    let (source, destination) = (source.as_ref(), destination.as_ref());
    let mut summary = InjectSummary::default();

    fs::create_dir_all(destination)?;

    for entry in WalkDir::new(source).min_depth(1).sort_by_file_name() {
        let entry = entry?;
        let path = entry.path();
        let relative_path = path.strip_prefix(source).map_err(|e| {
            Error::ConfigError(format!("unexpected path '{}': {}", path.display(), e))
        })?;
        let target = destination.join(relative_path);

        if path.is_dir() {
            debug!("Creating directory: {}", target.display());
            fs::create_dir_all(&target)?;
            continue;
        }

        let bytes = fs::read(path)?;
        if is_binary(&bytes) {
            warn!("Copying binary file without substitution: {}", path.display());
            copy_file(path, &target)?;
            summary.copied_binary.push(relative_path.to_path_buf());
            continue;
        }

        let content = String::from_utf8_lossy(&bytes);
        let rendered = substitutor.apply(&content);
        let leftover = substitutor.unresolved(&rendered);
        if !leftover.is_empty() {
            debug!("Unresolved placeholders in {}: {}", relative_path.display(), leftover.join(", "));
            summary.unresolved.insert(relative_path.to_path_buf(), leftover);
        }

        write_file(&target, rendered)?;
        println!("Generated: '{}'", target.display());
        summary.generated.push(relative_path.to_path_buf());
    }

    Ok(summary)
}

/// Scans one output file for a leftover `{{`.
///
/// Returns `true` when the file exists and still has one. The check is
/// advisory: a missing or unreadable file is reported and treated as clean.
pub fn check_watched_file<P: AsRef<Path>>(path: P) -> bool {
    let path = path.as_ref();
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!("Watched file {} was not generated", path.display());
            return false;
        }
        Err(e) => {
            warn!("Could not check watched file {}: {}", path.display(), e);
            return false;
        }
    };

    let has_placeholders = bytes.windows(2).any(|pair| pair == b"{{");
    if has_placeholders {
        warn!(
            "{} still contains unreplaced placeholders. Check your .env file.",
            path.display()
        );
    }
    has_placeholders
}

/// Runs the whole injection stage: load the env file, wipe the destination,
/// rebuild it from the source tree, then spot-check the watched file.
///
/// Nothing under the destination is touched when the env file or the source
/// directory is missing.
pub fn inject_env(options: &InjectOptions) -> Result<InjectSummary> {
    let vars = load_env_file(&options.env_file)?;

    if !options.source.is_dir() {
        return Err(Error::SourceDoesNotExist {
            source_dir: options.source.display().to_string(),
        });
    }
    ensure_disjoint(&options.source, &options.destination)?;

    let substitutor = Substitutor::new(&vars)?;
    let _lock = DestinationLock::acquire(&options.destination)?;

    if options.destination.exists() {
        debug!("Removing previous output {}", options.destination.display());
        fs::remove_dir_all(&options.destination)?;
    }

    let summary = process_files(&options.source, &options.destination, &substitutor)?;

    if let Some(watch) = &options.watch {
        check_watched_file(options.destination.join(watch));
    }

    if options.strict && !summary.unresolved.is_empty() {
        return Err(Error::UnresolvedPlaceholders {
            files: summary.unresolved.keys().cloned().collect(),
        });
    }

    Ok(summary)
}
