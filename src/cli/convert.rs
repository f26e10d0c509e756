//! One-shot convert command.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::cli::ConvertArgs;
use crate::config::Config;
use crate::convert::{self, EXAMPLE_DATA_URL};
use crate::surface::{self, ClipboardProvider, SVG_MIME};
use crate::{debug, log};

/// Run the convert command.
pub fn run(args: &ConvertArgs, config: &Config) -> Result<()> {
    let input = read_input(args)?;
    debug!("convert"; "input: {} bytes", input.len());

    let markup = convert::decode(input.trim())?;

    let save_to = output_path(args, config);
    match &save_to {
        Some(path) => {
            let written = surface::save(&markup, path)?;
            log!("save"; "wrote {} ({} bytes, {})", written.display(), markup.len(), SVG_MIME);
        }
        // Plain stdout so the markup stays pipeable.
        None => println!("{markup}"),
    }

    if args.copy {
        let provider = ClipboardProvider::detect(config.clipboard.command.as_deref());
        provider
            .copy(&markup)
            .with_context(|| "clipboard copy failed")?;
        log!("copy"; "copied {} bytes to clipboard via {}", markup.len(), provider.name());
    }

    Ok(())
}

/// Resolve the one data URL to convert: sample, file, argument or stdin.
fn read_input(args: &ConvertArgs) -> Result<String> {
    if args.example {
        return Ok(EXAMPLE_DATA_URL.to_string());
    }

    if let Some(file) = &args.file {
        return std::fs::read_to_string(file)
            .with_context(|| format!("could not read `{}`", file.display()));
    }

    match args.input.as_deref() {
        Some("-") | None => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .context("could not read stdin")?;
            Ok(input)
        }
        Some(input) => Ok(input.to_string()),
    }
}

fn output_path(args: &ConvertArgs, config: &Config) -> Option<PathBuf> {
    if let Some(output) = &args.output {
        return Some(output.clone());
    }
    args.save.then(|| config.output_path())
}
