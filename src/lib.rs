//! APK-Sieve: static endpoint discovery for mobile application packages
//!
//! This crate walks APK/XAPK containers (including nested split packages),
//! extracts URL-like strings from their entries, filters out noise, groups the
//! surviving endpoints into categories and exports them as a request collection
//! that API-testing tools can import.

pub mod archive;
pub mod capture;
pub mod classify;
pub mod config;
pub mod output;
pub mod url;

use thiserror::Error;

/// Main error type for APK-Sieve operations
#[derive(Debug, Error)]
pub enum SieveError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to open container {path}: {source}")]
    ContainerOpen { path: String, source: ArchiveError },

    #[error("Capture import error: {0}")]
    Capture(#[from] capture::CaptureError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Analysis task failed: {0}")]
    Task(String),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid blacklist entry: {0}")]
    InvalidBlacklistEntry(String),
}

/// Container-level errors
///
/// Only an outer container failing to open is fatal; every other variant is
/// absorbed by the walker and reported through logs and statistics.
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Failed to read entry '{name}': {reason}")]
    EntryRead { name: String, reason: String },

    #[error("Failed to open nested container '{name}': {reason}")]
    Nested { name: String, reason: String },

    #[error("Nested container '{name}' exceeds max nesting depth {max_depth}")]
    DepthExceeded { name: String, max_depth: usize },
}

/// Result type alias for APK-Sieve operations
pub type Result<T> = std::result::Result<T, SieveError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for container operations
pub type ArchiveResult<T> = std::result::Result<T, ArchiveError>;

// Re-export commonly used types
pub use archive::{analyze_package, analyze_package_async, Discovery};
pub use classify::{classify_urls, Classification};
pub use config::Config;
pub use output::{export_requests, export_urls, CollectionDocument};
pub use crate::url::{scan_bytes, CandidateFilter};
