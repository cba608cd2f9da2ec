//! Configuration types and utilities

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{GridmulError, Result};

/// Main gridmul configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GridmulConfig {
    pub run: RunConfig,
    pub pool: PoolConfig,
    pub logging: LoggingConfig,
}

impl Default for GridmulConfig {
    fn default() -> Self {
        Self {
            run: RunConfig::default(),
            pool: PoolConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl GridmulConfig {
    /// Load and validate a configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| GridmulError::Config(format!("{}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    /// Check value constraints that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.run.matrix_size == 0 {
            return Err(GridmulError::Config("matrix_size must be at least 1".to_string()));
        }
        if self.run.value_min > self.run.value_max {
            return Err(GridmulError::Config(format!(
                "value_min {} exceeds value_max {}",
                self.run.value_min, self.run.value_max
            )));
        }
        if self.pool.workers == Some(0) {
            return Err(GridmulError::InvalidPoolSize(0));
        }
        Ok(())
    }
}

/// One-shot and background run parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Square matrix dimension.
    pub matrix_size: usize,
    /// Folder holding matrix, result, and log files.
    pub workdir: PathBuf,
    /// Background task duration in seconds.
    pub duration_secs: u64,
    /// Inclusive lower bound for generated values.
    pub value_min: i64,
    /// Inclusive upper bound for generated values.
    pub value_max: i64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            matrix_size: 5,
            workdir: PathBuf::from("matrix_files"),
            duration_secs: 10,
            value_min: 0,
            value_max: 10,
        }
    }
}

/// Worker pool parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Worker thread count; `None` uses the machine's available parallelism.
    pub workers: Option<usize>,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self { workers: None }
    }
}

/// Logging parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (trace, debug, info, warn, error).
    pub level: String,
    /// Output format (pretty, compact, json).
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), format: "pretty".to_string() }
    }
}

/// Builder merging a configuration file with command-line overrides.
///
/// `None` arguments leave the current value untouched, so CLI flags can be
/// passed through directly.
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: GridmulConfig,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from the TOML file at `path`.
    pub fn from_file(path: &Path) -> Result<Self> {
        Ok(Self { config: GridmulConfig::from_file(path)? })
    }

    pub fn matrix_size(mut self, size: Option<usize>) -> Self {
        if let Some(size) = size {
            self.config.run.matrix_size = size;
        }
        self
    }

    pub fn workdir(mut self, workdir: Option<PathBuf>) -> Self {
        if let Some(workdir) = workdir {
            self.config.run.workdir = workdir;
        }
        self
    }

    pub fn duration_secs(mut self, secs: Option<u64>) -> Self {
        if let Some(secs) = secs {
            self.config.run.duration_secs = secs;
        }
        self
    }

    pub fn workers(mut self, workers: Option<usize>) -> Self {
        if let Some(workers) = workers {
            self.config.pool.workers = Some(workers);
        }
        self
    }

    pub fn log_level(mut self, level: Option<String>) -> Self {
        if let Some(level) = level {
            self.config.logging.level = level;
        }
        self
    }

    pub fn log_format(mut self, format: Option<String>) -> Self {
        if let Some(format) = format {
            self.config.logging.format = format;
        }
        self
    }

    /// Validate and return the final configuration.
    pub fn build(self) -> Result<GridmulConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
