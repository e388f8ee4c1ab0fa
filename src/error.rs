//! Error types for Wagecast
//!
//! All modules use `WagecastResult<T>` as their return type.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for Wagecast operations
pub type WagecastResult<T> = Result<T, WagecastError>;

/// All errors that can occur in Wagecast
#[derive(Error, Debug)]
pub enum WagecastError {
    // Request errors
    #[error("Incomplete prediction request: missing {0}")]
    IncompleteRequest(String),

    #[error("Invalid prediction request: {field}: {reason}")]
    InvalidRequest { field: String, reason: String },

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Dataset errors
    #[error("Dataset not found: {0}")]
    DatasetNotFound(PathBuf),

    #[error("Failed to read dataset {path}: {reason}")]
    DatasetRead { path: PathBuf, reason: String },

    #[error("Invalid contribution: {0}")]
    InvalidContribution(String),

    #[error("Invalid experience bucket {bucket}: expected 1 to {max} years")]
    InvalidBucket { bucket: u32, max: u32 },

    #[error("Unknown field: {0}")]
    UnknownField(String),

    // Cache store errors
    #[error("Cache store error while {context}: {source}")]
    Store {
        context: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Cache entry not found: {0}")]
    CacheEntryNotFound(String),

    // Estimation errors
    #[error("Estimator not configured: environment variable {0} is not set")]
    EstimatorNotConfigured(String),

    #[error("Estimation failed ({provider}): {reason}")]
    Estimation { provider: String, reason: String },

    #[error("Estimation returned an empty response")]
    EmptyEstimate,

    #[error("Estimation did not finish within {0:?}")]
    EstimationTimeout(Duration),

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    // General errors
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("{0}")]
    User(String),
}

impl WagecastError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a cache store error with context
    pub fn store(context: impl Into<String>, source: rusqlite::Error) -> Self {
        Self::Store {
            context: context.into(),
            source,
        }
    }

    /// Create an estimation failure for a provider
    pub fn estimation(provider: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Estimation {
            provider: provider.into(),
            reason: reason.into(),
        }
    }

    /// Check if the failed operation may succeed when simply retried
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Estimation { .. } | Self::EmptyEstimate | Self::EstimationTimeout(_)
        )
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::EstimatorNotConfigured(_) => {
                Some("Export the API key or add it to a .env file in the working directory")
            }
            Self::DatasetNotFound(_) => Some("Run: wagecast config set dataset.path <file.csv>"),
            Self::IncompleteRequest(_) => Some("Pass every field as a flag, or run in a terminal"),
            Self::EstimationTimeout(_) => Some("Retry, or raise estimator.timeout_secs"),
            Self::Store { .. } => Some("Check that cache.db_path is writable"),
            Self::InvalidBucket { .. } => Some("Buckets cannot be wider than the dataset's experience span"),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = WagecastError::IncompleteRequest("location".to_string());
        assert!(err.to_string().contains("missing location"));
    }

    #[test]
    fn error_hint() {
        let err = WagecastError::EstimatorNotConfigured("GEMINI_KEY".to_string());
        assert!(err.hint().is_some());
        assert!(WagecastError::EmptyEstimate.hint().is_none());
    }

    #[test]
    fn error_retryable() {
        assert!(WagecastError::EmptyEstimate.is_retryable());
        assert!(WagecastError::EstimationTimeout(Duration::from_secs(1)).is_retryable());
        assert!(!WagecastError::UnknownField("x".into()).is_retryable());
    }

    #[test]
    fn store_error_keeps_context() {
        let err = WagecastError::store("reading entry", rusqlite::Error::InvalidQuery);
        assert!(err.to_string().contains("reading entry"));
    }
}
