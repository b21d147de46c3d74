//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Wikiport blog importer CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: wikiport.toml)
    #[arg(short = 'C', long, default_value = "wikiport.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Import posts from an ikiwiki source tree
    #[command(visible_alias = "i")]
    Import {
        #[command(flatten)]
        args: ImportArgs,
    },
}

/// Import command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct ImportArgs {
    /// Directory containing ikiwiki source files
    #[arg(value_hint = clap::ValueHint::DirPath)]
    pub input: PathBuf,

    /// Output directory for converted posts (default: ./posts)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Overwrite existing posts with the same name
    #[arg(short = 'w', long)]
    pub overwrite: bool,

    /// Force ISO 8601 date stamps instead of locale-style ones
    #[arg(long)]
    pub iso8601: bool,

    /// Convert everything in memory without writing output files
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long)]
    pub verbose: bool,
}

#[allow(unused)]
impl Cli {
    pub const fn is_import(&self) -> bool {
        matches!(self.command, Commands::Import { .. })
    }
}
