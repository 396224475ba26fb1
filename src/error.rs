//! Error types for forkscan.
//!
//! Uses `thiserror` for ergonomic error definitions.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised at the GitHub API boundary.
///
/// None of these are retried. They abort the current run and the next
/// invocation resumes from the persisted progress.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("malformed response from {endpoint}: {reason}")]
    MalformedResponse { endpoint: String, reason: String },

    #[error("{endpoint} returned an error: {message}")]
    Remote { endpoint: String, message: String },

    #[error("branch '{branch}' not found in {repo}")]
    MissingRef { repo: String, branch: String },

    #[error("invalid API base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("{0} contains characters not allowed in an HTTP header")]
    InvalidHeader(&'static str),
}

/// Progress file persistence errors.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("no progress file at {0}")]
    NotFound(PathBuf),

    #[error("failed to read {path}: {reason}")]
    ReadFailed { path: PathBuf, reason: String },

    #[error("progress file {path} is corrupt: {reason}")]
    Corrupt { path: PathBuf, reason: String },

    #[error("failed to save progress to {path}: {reason}")]
    SaveFailed { path: PathBuf, reason: String },

    #[error("directory error: {0}")]
    DirectoryError(String),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Configuration loading errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not determine a home directory for configuration files")]
    DirectoryNotFound,

    #[error("failed to read {path}: {reason}")]
    ReadFailed { path: PathBuf, reason: String },

    #[error("invalid settings format: {0}")]
    InvalidFormat(String),

    #[error("missing required value: {0}")]
    MissingValue(&'static str),

    #[error("invalid repository: {0}")]
    InvalidRepo(String),
}

/// Errors that abort a fork scan.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Top-level error for CLI command handlers.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("output error: {0}")]
    Output(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for API client calls.
pub type ApiResult<T> = Result<T, ApiError>;

/// Result type alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Result type alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type alias for scan operations.
pub type ScanResult<T> = Result<T, ScanError>;

/// Result type alias for CLI commands.
pub type CliResult<T> = Result<T, CliError>;
