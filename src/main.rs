//! Wikiport - import ikiwiki blog posts into markdown for static-site generators.

#![allow(dead_code)]

mod cli;
mod config;
mod convert;
mod logger;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::ImportConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let config = ImportConfig::load(&cli.config)?;

    match &cli.command {
        Commands::Import { args } => cli::import::run_import(args, &config),
    }
}
