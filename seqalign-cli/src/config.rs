//! Configuration handling for seqalign CLI
//!
//! Supports loading configuration from seqalign.toml files with CLI argument overrides.

use anyhow::{Result, Context};
use serde::{Deserialize, Serialize};
use seqalign_core::scoring::{
    percent_to_rate, DEFAULT_ERROR_RATE_PERCENT, DEFAULT_GAP, DEFAULT_MATCH, DEFAULT_MISMATCH,
};
use seqalign_core::{ScoringParams, WildcardPolicy};
use std::path::{Path, PathBuf};

use crate::error::CliError;

pub const DEFAULT_CONFIG_FILE: &str = "seqalign.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Reward for an identity
    #[serde(default = "default_match")]
    pub match_score: i32,

    /// Substitution score
    #[serde(default = "default_mismatch")]
    pub mismatch_score: i32,

    /// Per-residue gap score
    #[serde(default = "default_gap")]
    pub gap_score: i32,

    /// Which side treats N as a wildcard
    #[serde(default)]
    pub wildcard: WildcardPolicy,

    /// Maximum tolerated errors per 100 aligned target bases
    #[serde(default = "default_error_rate_percent")]
    pub error_rate_percent: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Result line format
    #[serde(default = "default_format")]
    pub format: OutputFormat,

    /// Also print records without an accepted alignment
    #[serde(default)]
    pub report_unaligned: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Tsv,
    Json,
}

fn default_match() -> i32 { DEFAULT_MATCH }
fn default_mismatch() -> i32 { DEFAULT_MISMATCH }
fn default_gap() -> i32 { DEFAULT_GAP }
fn default_error_rate_percent() -> i32 { DEFAULT_ERROR_RATE_PERCENT }
fn default_format() -> OutputFormat { OutputFormat::Tsv }

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            match_score: default_match(),
            mismatch_score: default_mismatch(),
            gap_score: default_gap(),
            wildcard: WildcardPolicy::default(),
            error_rate_percent: default_error_rate_percent(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            report_unaligned: false,
        }
    }
}

impl ScoringConfig {
    /// Validate and convert into engine parameters
    pub fn to_params(&self) -> Result<ScoringParams, CliError> {
        if !(0..=100).contains(&self.error_rate_percent) {
            return Err(CliError::validation(format!(
                "error_rate_percent must be within 0-100, got {}",
                self.error_rate_percent
            )));
        }
        Ok(ScoringParams::new(self.match_score, self.mismatch_score, self.gap_score)
            .with_wildcard(self.wildcard)
            .with_error_rate(percent_to_rate(self.error_rate_percent)))
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let config = match config_path {
            Some(path) => {
                log::info!("Loading configuration from: {}", path.display());
                Self::load_from_file(path)?
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    log::info!("Loading configuration from: {}", DEFAULT_CONFIG_FILE);
                    Self::load_from_file(&default_path)?
                } else {
                    log::debug!("Using default configuration");
                    Self::default()
                }
            }
        };

        Ok(config)
    }

    /// Load configuration from a specific TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse configuration file: {}", path.display()))?;

        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .context("Failed to serialize configuration")?;

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write configuration file: {}", path.display()))?;

        Ok(())
    }

    /// Generate example configuration file content
    pub fn example_toml() -> Result<String> {
        toml::to_string_pretty(&Self::default()).context("Failed to serialize default configuration")
    }
}
