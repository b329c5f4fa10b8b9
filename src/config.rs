//! Pipeline configuration.
//!
//! Settings come from three layers, later ones winning: built-in defaults, an
//! optional `sitebuild.json`/`sitebuild.yml`/`sitebuild.yaml` file at the
//! project root, and command-line flags. Relative paths resolve against the
//! project root.

use crate::assets::CopyOptions;
use crate::constants::{
    ASSETS_DESTINATION, ASSETS_SOURCE, CONFIG_FILES, ENV_DESTINATION, ENV_FILE, ENV_SOURCE,
    WATCH_FILE,
};
use crate::error::{Error, Result};
use crate::ignore::SkipRules;
use crate::inject::InjectOptions;
use log::debug;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Asset stage settings. Unset fields fall back to the defaults.
#[derive(Debug, Default, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct AssetSettings {
    pub source: Option<PathBuf>,
    pub destination: Option<PathBuf>,
    /// Extra glob patterns to leave out, relative to the source root
    pub exclude: Vec<String>,
}

/// Environment injection settings. Unset fields fall back to the defaults.
#[derive(Debug, Default, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct EnvSettings {
    pub file: Option<PathBuf>,
    pub source: Option<PathBuf>,
    pub destination: Option<PathBuf>,
    /// Output file to spot-check; an empty path disables the check
    pub watch: Option<PathBuf>,
    pub strict: Option<bool>,
}

/// Contents of a configuration file.
#[derive(Debug, Default, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub assets: AssetSettings,
    pub env: EnvSettings,
}

impl AssetSettings {
    /// Overlays `other` on top of `self`. Exclude patterns accumulate.
    pub fn merge(mut self, other: AssetSettings) -> Self {
        self.source = other.source.or(self.source);
        self.destination = other.destination.or(self.destination);
        self.exclude.extend(other.exclude);
        self
    }

    /// Resolves the settings against `root` into options for [`crate::assets::copy_assets`].
    pub fn resolve<P: AsRef<Path>>(&self, root: P) -> Result<CopyOptions> {
        let root = root.as_ref();
        Ok(CopyOptions {
            source: resolve_path(root, self.source.as_deref(), ASSETS_SOURCE),
            destination: resolve_path(root, self.destination.as_deref(), ASSETS_DESTINATION),
            skip: SkipRules::new(&self.exclude)?,
        })
    }
}

impl EnvSettings {
    /// Overlays `other` on top of `self`.
    pub fn merge(self, other: EnvSettings) -> Self {
        Self {
            file: other.file.or(self.file),
            source: other.source.or(self.source),
            destination: other.destination.or(self.destination),
            watch: other.watch.or(self.watch),
            strict: other.strict.or(self.strict),
        }
    }

    /// Resolves the settings against `root` into options for [`crate::inject::inject_env`].
    pub fn resolve<P: AsRef<Path>>(&self, root: P) -> InjectOptions {
        let root = root.as_ref();
        let watch = match &self.watch {
            Some(watch) if watch.as_os_str().is_empty() => None,
            Some(watch) => Some(watch.clone()),
            None => Some(PathBuf::from(WATCH_FILE)),
        };
        InjectOptions {
            env_file: resolve_path(root, self.file.as_deref(), ENV_FILE),
            source: resolve_path(root, self.source.as_deref(), ENV_SOURCE),
            destination: resolve_path(root, self.destination.as_deref(), ENV_DESTINATION),
            watch,
            strict: self.strict.unwrap_or(false),
        }
    }
}

impl Settings {
    pub fn merge(self, other: Settings) -> Self {
        Self { assets: self.assets.merge(other.assets), env: self.env.merge(other.env) }
    }
}

fn resolve_path(root: &Path, value: Option<&Path>, default: &str) -> PathBuf {
    root.join(value.unwrap_or_else(|| Path::new(default)))
}

/// Finds the configuration file to use.
///
/// An explicit path must exist. Otherwise the first of [`CONFIG_FILES`]
/// present under `root` is used, and having none is fine.
pub fn find_config_file<P: AsRef<Path>>(root: P, explicit: Option<&Path>) -> Result<Option<PathBuf>> {
    let root = root.as_ref();
    if let Some(path) = explicit {
        let path = root.join(path);
        if !path.is_file() {
            return Err(Error::ConfigError(format!(
                "configuration file '{}' does not exist",
                path.display()
            )));
        }
        return Ok(Some(path));
    }

    Ok(CONFIG_FILES.iter().map(|file| root.join(file)).find(|path| path.is_file()))
}

/// Parses configuration content, trying JSON first and YAML second.
pub fn parse_config(content: &str) -> Result<Settings> {
    match serde_json::from_str(content) {
        Ok(settings) => Ok(settings),
        Err(_) => serde_yaml::from_str(content)
            .map_err(|e| Error::ConfigError(format!("Invalid configuration format: {e}"))),
    }
}

/// Loads settings from the configuration file, or defaults when there is none.
pub fn load_config<P: AsRef<Path>>(root: P, explicit: Option<&Path>) -> Result<Settings> {
    match find_config_file(root, explicit)? {
        Some(path) => {
            debug!("Loading configuration from {}", path.display());
            let content = std::fs::read_to_string(&path)?;
            parse_config(&content)
        }
        None => {
            debug!("No configuration file found, using defaults");
            Ok(Settings::default())
        }
    }
}
