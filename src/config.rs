//! Import configuration.
//!
//! Settings come from three layers, each overriding the one before:
//!
//! ```text
//! stock defaults  →  post-import.toml  →  command-line flags
//! ```
//!
//! The config file is looked up as `post-import.toml` in the working directory
//! unless `--config <path>` names one explicitly. An explicit file must exist;
//! the implicit one is optional.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! output_dir = "content/posts"  # Where post files are written
//! on_conflict = "prompt"        # prompt | overwrite | skip | fail
//! empty_slug = "error"          # error | row | date
//! extension = "md"              # Output file extension, without the dot
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name searched for when no `--config` is given.
pub const CONFIG_FILE: &str = "post-import.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// What to do when the target file already exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ConflictPolicy {
    /// Ask on the terminal; anything but yes skips the row.
    #[default]
    Prompt,
    /// Replace the existing file without asking.
    Overwrite,
    /// Leave the existing file alone and skip the row.
    Skip,
    /// Treat the collision as a write failure.
    Fail,
}

/// What to do when a title slugifies to nothing (e.g. `"!!!"`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum EmptySlugPolicy {
    /// Reject the row.
    #[default]
    Error,
    /// Name the file `post-<row>`.
    Row,
    /// Name the file after the post date.
    Date,
}

/// Import settings. All fields have defaults; config files override only
/// what they name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImportConfig {
    /// Directory receiving one file per imported post. Created on demand.
    pub output_dir: PathBuf,
    pub on_conflict: ConflictPolicy,
    pub empty_slug: EmptySlugPolicy,
    /// Output file extension without the leading dot.
    pub extension: String,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("content/posts"),
            on_conflict: ConflictPolicy::default(),
            empty_slug: EmptySlugPolicy::default(),
            extension: "md".to_string(),
        }
    }
}

impl ImportConfig {
    /// Validate values that serde alone cannot check.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.extension.is_empty() {
            return Err(ConfigError::Validation("extension must not be empty".into()));
        }
        if self.extension.contains(['.', '/', '\\']) {
            return Err(ConfigError::Validation(format!(
                "extension must be a bare name like \"md\", got {:?}",
                self.extension
            )));
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err(ConfigError::Validation("output_dir must not be empty".into()));
        }
        Ok(())
    }
}

// =============================================================================
// Config loading and validation
// =============================================================================

/// Read and validate a config file. The file must exist.
///
/// Keys the file leaves out take their stock default.
pub fn read_config_file(path: &Path) -> Result<ImportConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: ImportConfig = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// Load the effective config.
///
/// `explicit` (from `--config`) takes precedence and must exist; otherwise
/// [`CONFIG_FILE`] in `dir` is used when present, and stock defaults when not.
pub fn load_config(dir: &Path, explicit: Option<&Path>) -> Result<ImportConfig, ConfigError> {
    if let Some(path) = explicit {
        return read_config_file(path);
    }
    let config_path = dir.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(ImportConfig::default());
    }
    read_config_file(&config_path)
}

/// Returns a fully-commented stock `post-import.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# post-import configuration
# =========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Place this file as post-import.toml in the directory you run the import
# from, or pass it with --config <path>. Command-line flags override it.
# Unknown keys will cause an error.

# Directory receiving one <slug>.md file per imported post.
# Created (with any missing parents) on first write.
output_dir = "content/posts"

# What to do when <slug>.md already exists:
#   prompt    - ask on the terminal (anything but y/yes skips)
#   overwrite - replace the file without asking
#   skip      - keep the existing file, count the row as an error
#   fail      - count the row as a write error
on_conflict = "prompt"

# What to do when a title slugifies to nothing (e.g. "!!!") and the row
# has no explicit slug:
#   error - reject the row
#   row   - name the file post-<row number>
#   date  - name the file after the post date (YYYY-MM-DD)
empty_slug = "error"

# Output file extension, without the leading dot.
extension = "md"
"##
}
