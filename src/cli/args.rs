//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// desvg: SVG data URL converter CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: desvg.toml)
    #[arg(short = 'C', long, default_value = "desvg.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Convert a data URL once and print or save the markup
    #[command(visible_alias = "c")]
    Convert {
        #[command(flatten)]
        args: ConvertArgs,
    },

    /// Watch an input source and convert after each quiet period
    #[command(visible_alias = "w")]
    Watch {
        #[command(flatten)]
        args: WatchArgs,
    },
}

/// Convert command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct ConvertArgs {
    /// Data URL to convert. Use `-` or omit to read from stdin.
    #[arg(value_name = "DATA_URL")]
    pub input: Option<String>,

    /// Read the data URL from a file instead of the argument
    #[arg(short, long, value_hint = clap::ValueHint::FilePath, conflicts_with = "input")]
    pub file: Option<PathBuf>,

    /// Convert the built-in sample data URL (a map-pin icon)
    #[arg(long, conflicts_with_all = ["input", "file"])]
    pub example: bool,

    /// Save the markup to the output file instead of printing it
    #[arg(short, long)]
    pub save: bool,

    /// Output file path (overrides the configured one, implies --save)
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Copy the markup to the clipboard
    #[arg(long)]
    pub copy: bool,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long)]
    pub verbose: bool,
}

/// Watch command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct WatchArgs {
    /// File to watch for data URL changes. Use `-` or omit to read lines
    /// from stdin instead.
    #[arg(value_name = "PATH", value_hint = clap::ValueHint::FilePath)]
    pub path: Option<PathBuf>,

    /// Save each successful conversion to the output file
    #[arg(short, long)]
    pub save: bool,

    /// Output file path (overrides the configured one, implies --save)
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Copy each successful conversion to the clipboard
    #[arg(long)]
    pub copy: bool,

    /// Suppress the markup preview, keep a single status line instead
    #[arg(long)]
    pub no_preview: bool,

    /// Debounce window in milliseconds (overrides the configured one)
    #[arg(long, value_name = "MS")]
    pub debounce_ms: Option<u64>,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long)]
    pub verbose: bool,
}
