//! sitebuild's entry point.
//! Parses arguments, resolves configuration and runs the requested stage.

use sitebuild::{
    assets::copy_assets,
    cli::{get_args, Args, Command},
    config::{load_config, AssetSettings, EnvSettings, Settings},
    error::{default_error_handler, Result},
    inject::inject_env,
    logger::init_logger,
    pipeline::package,
};

fn main() {
    let args = get_args();
    init_logger(args.verbose);

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

/// Main application logic execution.
///
/// # Flow
/// 1. Loads the configuration file, if any
/// 2. Overlays command-line flags
/// 3. Runs the asset stage, the environment stage, or both
fn run(args: Args) -> Result<()> {
    let settings = load_config(&args.root, args.config.as_deref())?;

    match args.command {
        Command::CopyAssets(assets) => {
            let options = settings.assets.merge(AssetSettings::from(assets)).resolve(&args.root)?;
            let summary = copy_assets(&options)?;
            println!(
                "Copied {} file(s) to {}.",
                summary.copied.len(),
                options.destination.display()
            );
        }
        Command::InjectEnv(env) => {
            let options = settings.env.merge(EnvSettings::from(env)).resolve(&args.root);
            let summary = inject_env(&options)?;
            println!(
                "Generated {} file(s) in {}.",
                summary.generated.len() + summary.copied_binary.len(),
                options.destination.display()
            );
        }
        Command::Package { assets, env } => {
            let settings = settings.merge(Settings { assets: assets.into(), env: env.into() });
            let (copied, injected) = package(&args.root, &settings)?;
            println!(
                "Build completed successfully: {} asset(s) copied, {} file(s) generated.",
                copied.copied.len(),
                injected.generated.len() + injected.copied_binary.len()
            );
        }
    }

    Ok(())
}
