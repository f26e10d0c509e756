//! Tool configuration loaded from `desvg.toml`.
//!
//! The config file is optional; defaults match the original tool (150 ms
//! debounce, `converted-svg.svg` in the current directory). CLI flags
//! override file values at the call sites that consume them.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use serde::Deserialize;
use thiserror::Error;

use crate::log;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config file parsing error")]
    Toml(#[from] toml::de::Error),

    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Root configuration structure representing desvg.toml
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    /// Conversion settings
    pub convert: ConvertConfig,

    /// Output (download) settings
    pub output: OutputConfig,

    /// Clipboard settings
    pub clipboard: ClipboardConfig,
}

/// `[convert]` section
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ConvertConfig {
    /// Quiet period before a conversion runs in watch mode
    pub debounce_ms: u64,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self { debounce_ms: 150 }
    }
}

/// `[output]` section
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct OutputConfig {
    /// Directory saved files land in
    pub dir: PathBuf,
    /// Saved file name
    pub filename: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            filename: crate::surface::DOWNLOAD_FILENAME.to_string(),
        }
    }
}

/// `[clipboard]` section
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ClipboardConfig {
    /// Override the detected clipboard tool with an explicit command.
    /// The markup is piped to its stdin.
    pub command: Option<String>,
}

impl Config {
    /// Load configuration, falling back to defaults when the file is absent.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        config.validate()?;
        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields (they are ignored, not fatal).
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.output.filename.trim().is_empty() {
            return Err(ConfigError::Validation(
                "output.filename must not be empty".to_string(),
            ));
        }
        if self.convert.debounce_ms == 0 {
            return Err(ConfigError::Validation(
                "convert.debounce-ms must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Debounce window as a Duration.
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.convert.debounce_ms)
    }

    /// Full path saved files are written to.
    pub fn output_path(&self) -> PathBuf {
        self.output.dir.join(&self.output.filename)
    }
}
