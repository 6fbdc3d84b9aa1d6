//! # Configuration
//!
//! YAML description of a spreading-code setup: which generator to build and
//! how large a reference window to fill from it.
//!
//! ## Configuration Search Path
//!
//! Configuration is loaded from the first file found:
//! 1. Path specified via `R4W_SEQUENCE_CONFIG` environment variable
//! 2. `./r4w-sequence.yaml` (current directory)
//! 3. `~/.config/r4w/sequence.yaml` (user config)
//! 4. `/etc/r4w/sequence.yaml` (system config)
//!
//! ## Example Configuration
//!
//! ```yaml
//! generator:
//!   genpoly: m11
//!   state: 1024
//!
//! buffer:
//!   capacity: 2047
//!
//! logging:
//!   level: debug
//! ```
//!
//! Generator precedence: an explicit `polynomial` wins over `genpoly`,
//! which wins over the default table entry for `width`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::bsequence::{BitSequence, MAX_CAPACITY};
use crate::genpoly::GenPoly;
use crate::logging::LogConfig;
use crate::msequence::MSequence;
use crate::types::SequenceError;

/// Environment variable naming an explicit configuration file.
pub const CONFIG_ENV: &str = "R4W_SEQUENCE_CONFIG";

/// Error type for configuration operations.
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// Configuration file not found
    NotFound(String),
    /// Failed to read or write configuration file
    ReadError(String),
    /// Failed to parse configuration
    ParseError(String),
    /// Invalid configuration value
    ValidationError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NotFound(msg) => write!(f, "config not found: {}", msg),
            ConfigError::ReadError(msg) => write!(f, "failed to read config: {}", msg),
            ConfigError::ParseError(msg) => write!(f, "failed to parse config: {}", msg),
            ConfigError::ValidationError(msg) => write!(f, "invalid config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<SequenceError> for ConfigError {
    fn from(err: SequenceError) -> Self {
        ConfigError::ValidationError(err.to_string())
    }
}

/// Generator selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Register width, used with the default polynomial table
    pub width: u32,
    /// Catalog entry (e.g. `m11`)
    pub genpoly: Option<GenPoly>,
    /// Explicit polynomial, x^m term included
    pub polynomial: Option<u64>,
    /// Initial register state (defaults to the MSB only)
    pub state: Option<u32>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            width: 11,
            genpoly: None,
            polynomial: None,
            state: None,
        }
    }
}

/// Reference window settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BufferConfig {
    /// Window capacity in bits (defaults to one generator period)
    pub capacity: Option<usize>,
}

/// Complete configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SequenceConfig {
    pub generator: GeneratorConfig,
    pub buffer: BufferConfig,
    pub logging: LogConfig,
}

impl SequenceConfig {
    /// Load configuration from the standard search path.
    ///
    /// Returns default config if no file is found.
    pub fn load() -> Result<Self, ConfigError> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            let path = PathBuf::from(path);
            if !path.exists() {
                return Err(ConfigError::NotFound(format!(
                    "{} points to {}",
                    CONFIG_ENV,
                    path.display()
                )));
            }
            return Self::load_from(&path);
        }

        for path in Self::config_search_paths() {
            if path.exists() {
                return Self::load_from(&path);
            }
        }

        tracing::debug!("no sequence config found, using defaults");
        Ok(Self::default())
    }

    /// Load configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(format!("{}: {}", path.display(), e)))?;

        let config = Self::parse(&content)?;
        tracing::debug!(path = %path.display(), "sequence config loaded");
        Ok(config)
    }

    /// Parse configuration from a YAML string.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(yaml).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content =
            serde_yaml::to_string(self).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        std::fs::write(path, content)
            .map_err(|e| ConfigError::ReadError(format!("{}: {}", path.display(), e)))
    }

    /// Get configuration search paths.
    pub fn config_search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("./r4w-sequence.yaml")];

        if let Some(dirs) = directories::ProjectDirs::from("", "", "r4w") {
            paths.push(dirs.config_dir().join("sequence.yaml"));
        }

        paths.push(PathBuf::from("/etc/r4w/sequence.yaml"));

        paths
    }

    /// Check that the generator and buffer can be built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ms = self.build_generator()?;
        let capacity = self.capacity_for(&ms);
        if capacity == 0 || capacity > MAX_CAPACITY {
            return Err(ConfigError::ValidationError(format!(
                "buffer capacity must be 1-{}, got {}",
                MAX_CAPACITY, capacity
            )));
        }
        Ok(())
    }

    /// Build the configured generator.
    pub fn build_generator(&self) -> Result<MSequence, ConfigError> {
        let generator = &self.generator;
        let ms = match (generator.polynomial, generator.genpoly) {
            (Some(polynomial), _) => MSequence::from_polynomial(polynomial)?,
            (None, Some(genpoly)) => MSequence::from_genpoly(genpoly)?,
            (None, None) => MSequence::with_width(generator.width)?,
        };

        match generator.state {
            Some(state) => Ok(MSequence::new(ms.width(), ms.polynomial(), state)?),
            None => Ok(ms),
        }
    }

    /// Build the reference window and fill it from `ms`.
    pub fn build_buffer(&self, ms: &mut MSequence) -> Result<BitSequence, ConfigError> {
        let mut buffer = BitSequence::new(self.capacity_for(ms))?;
        buffer.init_msequence(ms);
        Ok(buffer)
    }

    fn capacity_for(&self, ms: &MSequence) -> usize {
        self.buffer.capacity.unwrap_or(ms.length() as usize)
    }
}
