//! Configuration schema for Wagecast
//!
//! Configuration is stored at `~/.config/wagecast/config.toml`

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Employee dataset settings
    pub dataset: DatasetConfig,

    /// Prediction cache settings
    pub cache: CacheConfig,

    /// Estimation service settings
    pub estimator: EstimatorConfig,

    /// Progress presentation while an estimate is computed
    pub progress: ProgressConfig,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log format: "text" or "json"
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_format: "text".to_string(),
        }
    }
}

/// Dataset configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// CSV file with employee records
    pub path: PathBuf,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("Employee_Salary_Data.csv"),
        }
    }
}

/// Prediction cache configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// SQLite database file (defaults to the state directory)
    pub db_path: Option<PathBuf>,
}

/// Estimation service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    /// Provider name: "gemini" or "command"
    pub provider: String,

    /// Model name, overridden by `model_env` when that variable is set
    pub model: String,

    /// Environment variable holding the model override
    pub model_env: String,

    /// Environment variable holding the API key
    pub api_key_env: String,

    /// API base URL
    pub endpoint: String,

    /// Give up on an estimate after this many seconds
    pub timeout_secs: u64,

    /// Program and arguments for the "command" provider (prompt on stdin)
    pub command: Vec<String>,
}

impl EstimatorConfig {
    /// Timeout as a `Duration`, never shorter than one second
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            provider: "gemini".to_string(),
            model: "gemini-1.5-flash".to_string(),
            model_env: "GEMINI_MODEL".to_string(),
            api_key_env: "GEMINI_KEY".to_string(),
            endpoint: "https://generativelanguage.googleapis.com".to_string(),
            timeout_secs: 60,
            command: vec![],
        }
    }
}

/// Progress presentation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressConfig {
    /// Completion fractions shown in order
    pub steps: Vec<f64>,

    /// Delay before advancing past each step, in milliseconds
    pub delays_ms: Vec<u64>,

    /// How often completion of the estimate is checked, in milliseconds
    pub poll_interval_ms: u64,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            steps: vec![0.0, 0.25, 0.50, 0.75, 0.99, 1.0],
            delays_ms: vec![500, 1500, 2000, 3000],
            poll_interval_ms: 100,
        }
    }
}
