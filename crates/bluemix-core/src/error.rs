//! Typed errors for answer validation and configuration loading

use std::path::PathBuf;
use thiserror::Error;

/// Reason an answer was rejected. Shown inline before the question is asked again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} must be a positive integer, got '{value}'")]
    NotPositiveInteger { field: &'static str, value: String },

    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    #[error("'{value}' is not a valid domain name")]
    InvalidDomain { value: String },

    #[error("'{value}' is not a valid subdomain")]
    InvalidHost { value: String },

    #[error("Please answer 'yes' or 'no', got '{value}'")]
    NotYesNo { value: String },
}

/// Failure to load question defaults
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read defaults file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse defaults file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid default for {question}: {source}")]
    InvalidDefault {
        question: &'static str,
        #[source]
        source: ValidationError,
    },
}
