//! Run options and their optional TOML defaults file.
//!
//! Flags parsed from the command line and defaults loaded from a config file
//! are merged once, by [`RunOptions::normalize`], into the options the
//! pipeline reads. A flag can only switch an option on; the file cannot turn
//! off something the command line asked for.

use crate::error::{Error, Result};
use crate::utils::io;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable naming a defaults file when `--config` is absent.
pub const CONFIG_ENV_VAR: &str = "REGEX_RENAME_CONFIG";

/// Options as they came off the command line, before normalization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RawFlags {
    pub verbose: bool,
    pub dry_run: bool,
    pub ignore_collisions: bool,
    pub skip_problematic: bool,
    pub json: bool,
}

/// Defaults read from a TOML file. Unset keys leave the flag alone.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub verbose: Option<bool>,
    #[serde(alias = "dry-run")]
    pub dry_run: Option<bool>,
    #[serde(alias = "ignore-collisions")]
    pub ignore_collisions: Option<bool>,
    #[serde(alias = "skip-problematic")]
    pub skip_problematic: Option<bool>,
    pub json: Option<bool>,
}

impl FileConfig {
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::config_invalid_toml(path, e))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::config_not_found(path));
        }
        let content = io::read_file(path, &format!("read config {}", path.display()))?;
        Self::parse(&content, path)
    }

    /// Pick the config file to load: an explicit path wins over the
    /// environment. Returns `None` when neither names one.
    pub fn locate(explicit: Option<&Path>, from_env: Option<PathBuf>) -> Option<PathBuf> {
        explicit
            .map(Path::to_path_buf)
            .or_else(|| from_env.filter(|p| !p.as_os_str().is_empty()))
    }
}

/// Finalized options for one run. Read-only once built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    pub verbose: bool,
    /// Report renames without touching the filesystem.
    pub dry_run: bool,
    /// Rename even when several files map to one destination.
    pub ignore_collisions: bool,
    /// Drop colliding files instead of aborting the run.
    pub skip_problematic: bool,
    /// Emit the final report as JSON.
    pub json: bool,
}

impl RunOptions {
    /// Merge flags with file defaults and apply cross-flag effects.
    ///
    /// Dry run implies verbose.
    pub fn normalize(flags: RawFlags, file: &FileConfig) -> Self {
        let dry_run = flags.dry_run || file.dry_run.unwrap_or(false);
        let verbose = flags.verbose || file.verbose.unwrap_or(false) || dry_run;

        RunOptions {
            verbose,
            dry_run,
            ignore_collisions: flags.ignore_collisions || file.ignore_collisions.unwrap_or(false),
            skip_problematic: flags.skip_problematic || file.skip_problematic.unwrap_or(false),
            json: flags.json || file.json.unwrap_or(false),
        }
    }
}
