//! Configuration module for APK-Sieve
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file. Every section is optional; a missing file section falls
//! back to the built-in defaults.
//!
//! # Example
//!
//! ```no_run
//! use apk_sieve::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("sieve.toml")).unwrap();
//! println!("Extra blacklist entries: {}", config.filter.extra_blacklist.len());
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{ArchiveConfig, Config, ExportConfig, FilterConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
