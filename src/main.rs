//! desvg - decode `data:image/svg+xml,` data URLs back to plain SVG markup.

#![allow(dead_code)]

mod cli;
mod config;
mod controller;
mod convert;
mod logger;
mod state;
mod surface;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::Config;

fn main() -> Result<()> {
    // Setup global Ctrl+C handler (before any blocking operations)
    state::setup_shutdown_handler()?;

    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let config = Config::load(&cli.config)?;

    match &cli.command {
        Commands::Convert { args } => {
            logger::set_verbose(args.verbose);
            cli::convert::run(args, &config)
        }
        Commands::Watch { args } => {
            logger::set_verbose(args.verbose);
            cli::watch::run(args, &config)
        }
    }
}
