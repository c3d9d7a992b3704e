//! assetrev - compile, minify and revision static assets, rewrite HTML
//! references and preview the result with live reload.

mod actor;
mod asset;
mod cli;
mod config;
mod core;
mod embed;
mod logger;
mod manifest;
mod pipeline;
mod reload;
mod utils;

use std::sync::Arc;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::PipelineConfig;

fn main() -> Result<()> {
    // Before any blocking operation
    core::setup_shutdown_handler()?;

    let cli = Cli::parse();

    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let config = Arc::new(PipelineConfig::load(&cli)?);

    match &cli.command {
        Commands::Build { .. } => cli::build::build(config),
        Commands::Watch { .. } => cli::watch::watch(config),
        Commands::Serve { .. } => cli::serve::serve(config),
    }
}
