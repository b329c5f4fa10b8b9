//! Packaging: runs the asset stage and the environment stage in order.

use crate::assets::{copy_assets, CopySummary};
use crate::config::Settings;
use crate::error::Result;
use crate::inject::{inject_env, InjectSummary};
use log::info;
use std::path::Path;

/// Runs the asset stage, then the environment stage, stopping at the first failure.
pub fn package<P: AsRef<Path>>(root: P, settings: &Settings) -> Result<(CopySummary, InjectSummary)> {
    let root = root.as_ref();

    let copy_options = settings.assets.resolve(root)?;
    let inject_options = settings.env.resolve(root);

    info!("Copying assets from {}", copy_options.source.display());
    let copied = copy_assets(&copy_options)?;

    info!("Injecting environment into {}", inject_options.destination.display());
    let injected = inject_env(&inject_options)?;

    Ok((copied, injected))
}
