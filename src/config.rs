//! Configuration file for the `bytefreq` command line
//!
//! All sections are optional; missing values fall back to the defaults below.
//!
//! # Example
//! ```
//! use bytefreq::config::Config;
//!
//! let config = Config::from_toml_str("[score]\nthreshold = 0.7\n").unwrap();
//! assert_eq!(config.score.threshold, 0.7);
//! assert_eq!(config.corpus.max_depth, 16);
//! ```

use crate::scoring::ScoringMode;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File looked up in the working directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "bytefreq.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub model: ModelConfig,
    pub score: ScoreConfig,
    pub corpus: CorpusConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Model file used when `--model` is absent
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreConfig {
    /// Scores at or above this value count as a match
    ///
    /// Default: 0.5
    pub threshold: f64,

    /// Default: frequency
    pub mode: ScoringMode,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            threshold: 0.5,
            mode: ScoringMode::Frequency,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorpusConfig {
    /// Maximum directory recursion depth for corpus inputs
    ///
    /// Default: 16
    pub max_depth: usize,

    /// Read dot-files and descend into dot-directories
    ///
    /// Default: false
    pub include_hidden: bool,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            max_depth: 16,
            include_hidden: false,
        }
    }
}

impl Config {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Config = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Load `explicit` if given, else `bytefreq.toml` in the working directory if it
    /// exists, else the defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if fallback.is_file() {
                    tracing::debug!("Using config file {}", fallback.display());
                    Self::from_file(fallback)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.score.threshold) {
            return Err(ConfigError::Invalid(format!(
                "score.threshold must be within [0, 1], got {}",
                self.score.threshold
            )));
        }
        if self.corpus.max_depth == 0 {
            return Err(ConfigError::Invalid(
                "corpus.max_depth must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
