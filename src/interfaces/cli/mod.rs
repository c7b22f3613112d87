mod commands;
pub mod prompt;
pub mod report;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::domain::error::Result;

#[derive(Parser, Debug)]
#[command(name = "folio-tools", version, about = "Portfolio site maintenance tools")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert the project spreadsheet into menu.json
    Menu {
        /// Path to the project CSV export
        csv: PathBuf,
        /// Path of the menu JSON to write
        out: PathBuf,
    },
    /// Optimize every image in the asset directory
    Optimize(OptimizeArgs),
    /// Optimize one image, confirming before the overwrite
    OptimizeOne {
        /// Image to optimize; a sample PNG from the asset directory when omitted
        file: Option<PathBuf>,
        #[command(flatten)]
        args: OptimizeArgs,
    },
    /// Check that the compression API accepts the configured key
    CheckApi,
    /// Upload one image and dump the raw provider response
    Inspect {
        /// Image to upload
        file: PathBuf,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct OptimizeArgs {
    /// Directory of images (overrides the configured assets_dir)
    #[arg(long)]
    pub dir: Option<PathBuf>,

    /// Use the size and aggressiveness thresholds
    #[arg(long)]
    pub conservative: bool,

    /// TOML file layered over the preset
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Do not ask for confirmation
    #[arg(long, short = 'y')]
    pub yes: bool,
}

pub async fn execute(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Menu { csv, out } => commands::menu(&csv, &out),
        Commands::Optimize(args) => commands::optimize(&args).await,
        Commands::OptimizeOne { file, args } => commands::optimize_one(file.as_deref(), &args).await,
        Commands::CheckApi => commands::check_api().await,
        Commands::Inspect { file } => commands::inspect(&file).await,
    }
}
