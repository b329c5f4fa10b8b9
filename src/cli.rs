//! Command-line interface implementation for sitebuild.
//! Provides argument parsing using clap. Every flag is optional.

use crate::config::{AssetSettings, EnvSettings};
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments structure for sitebuild.
#[derive(Parser, Debug)]
#[command(author, version, about = "sitebuild: copy static assets and inject .env values", long_about = None)]
pub struct Args {
    /// Project root that relative paths resolve against
    #[arg(short, long, value_name = "DIR", default_value = ".", global = true)]
    pub root: PathBuf,

    /// Configuration file (default: sitebuild.json, sitebuild.yml or sitebuild.yaml under the root)
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Mirror the asset directory into the output, skipping README.md files
    CopyAssets(AssetArgs),

    /// Render source files into the output with {{KEY}} placeholders replaced from .env
    InjectEnv(EnvArgs),

    /// Copy assets, then inject the environment
    Package {
        #[command(flatten)]
        assets: AssetArgs,

        #[command(flatten)]
        env: EnvArgs,
    },
}

#[derive(ClapArgs, Debug, Default)]
pub struct AssetArgs {
    /// Asset source directory [default: assets]
    #[arg(long, value_name = "DIR")]
    pub assets_source: Option<PathBuf>,

    /// Asset destination directory [default: public/assets]
    #[arg(long, value_name = "DIR")]
    pub assets_destination: Option<PathBuf>,

    /// Glob pattern to leave out of the copy (repeatable)
    #[arg(long, value_name = "GLOB")]
    pub exclude: Vec<String>,
}

#[derive(ClapArgs, Debug, Default)]
pub struct EnvArgs {
    /// Dotenv file [default: .env]
    #[arg(long, value_name = "FILE")]
    pub env_file: Option<PathBuf>,

    /// Directory of text files with {{KEY}} placeholders [default: src]
    #[arg(long, value_name = "DIR")]
    pub env_source: Option<PathBuf>,

    /// Output directory, wiped before every run [default: public/js]
    #[arg(long, value_name = "DIR")]
    pub env_destination: Option<PathBuf>,

    /// Output file checked for leftover placeholders [default: config.js]
    #[arg(long, value_name = "FILE", conflicts_with = "no_watch")]
    pub watch: Option<PathBuf>,

    /// Skip the leftover placeholder check
    #[arg(long)]
    pub no_watch: bool,

    /// Fail when any output file keeps an unresolved placeholder
    #[arg(long)]
    pub strict: bool,
}

impl From<AssetArgs> for AssetSettings {
    fn from(args: AssetArgs) -> Self {
        AssetSettings {
            source: args.assets_source,
            destination: args.assets_destination,
            exclude: args.exclude,
        }
    }
}

impl From<EnvArgs> for EnvSettings {
    fn from(args: EnvArgs) -> Self {
        let watch = if args.no_watch { Some(PathBuf::new()) } else { args.watch };
        EnvSettings {
            file: args.env_file,
            source: args.env_source,
            destination: args.env_destination,
            watch,
            strict: args.strict.then_some(true),
        }
    }
}

/// Parses command line arguments, exiting with clap's error handling on failure.
pub fn get_args() -> Args {
    Args::parse()
}
