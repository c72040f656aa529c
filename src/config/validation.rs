use crate::config::types::{ArchiveConfig, Config, ExportConfig, FilterConfig};
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_filter_config(&config.filter)?;
    validate_archive_config(&config.archive)?;
    validate_export_config(&config.export)?;
    Ok(())
}

/// Validates the extra blacklist entries
fn validate_filter_config(config: &FilterConfig) -> Result<(), ConfigError> {
    for entry in &config.extra_blacklist {
        validate_blacklist_entry(entry)?;
    }
    Ok(())
}

/// Validates archive walk limits
fn validate_archive_config(config: &ArchiveConfig) -> Result<(), ConfigError> {
    if config.max_nesting_depth == Some(0) {
        return Err(ConfigError::Validation(
            "max_nesting_depth must be >= 1 when set, got 0".to_string(),
        ));
    }
    Ok(())
}

/// Validates export settings
fn validate_export_config(config: &ExportConfig) -> Result<(), ConfigError> {
    if let Some(name) = &config.collection_name {
        if name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "collection_name cannot be empty".to_string(),
            ));
        }
    }
    Ok(())
}

/// Validates a single blacklist substring
///
/// Entries are matched as raw substrings, so they may be partial hosts
/// ("tracker.") but must not be empty or contain whitespace.
fn validate_blacklist_entry(entry: &str) -> Result<(), ConfigError> {
    if entry.is_empty() {
        return Err(ConfigError::InvalidBlacklistEntry(
            "Blacklist entry cannot be empty".to_string(),
        ));
    }

    if entry.chars().any(char::is_whitespace) {
        return Err(ConfigError::InvalidBlacklistEntry(format!(
            "Blacklist entry '{}' contains whitespace",
            entry
        )));
    }

    Ok(())
}
