//! Run configuration read from `Config.json`.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};

use crate::compression::CompressionMethod;
use crate::domain::TimeFormat;
use crate::network::SolveStrategy;

/// Default minimum headway between consecutive trains on a segment.
pub const DEFAULT_MIN_HEADWAY: i64 = 6;

/// File name looked up in the data directory when no path is given.
pub const CONFIG_FILE: &str = "Config.json";

/// Errors from reading the configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file exists but could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The file is not valid configuration JSON
    #[error("invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A value is out of range
    #[error("invalid configuration: {message}")]
    Invalid { message: String },
}

/// Settings for one compression run.
///
/// Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompressionConfig {
    pub method: CompressionMethod,

    /// Values above zero also write the network debug files.
    pub output_level: u32,

    /// Headway for every segment without an override in `SegmentTrackPara.csv`.
    pub min_headway: i64,

    pub solve_strategy: SolveStrategy,

    /// How times are read from and written to CSV.
    pub time_format: TimeFormat,
}

impl Default for CompressionConfig {
    fn default() -> Self {
        Self {
            method: CompressionMethod::default(),
            output_level: 0,
            min_headway: DEFAULT_MIN_HEADWAY,
            solve_strategy: SolveStrategy::default(),
            time_format: TimeFormat::default(),
        }
    }
}

impl CompressionConfig {
    /// Parse and validate a configuration document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read the configuration at `path`.
    ///
    /// A missing file yields the defaults; any other failure is an error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(path = %path.display(), "configuration file not found, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        let config = Self::from_json_str(&contents)?;
        debug!(path = %path.display(), ?config, "configuration loaded");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_headway < 0 {
            return Err(ConfigError::Invalid {
                message: format!("min_headway must not be negative, got {}", self.min_headway),
            });
        }
        Ok(())
    }

    /// Whether the network debug files should be written.
    pub fn writes_debug_files(&self) -> bool {
        self.output_level > 0
    }
}
