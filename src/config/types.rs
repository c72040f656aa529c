use serde::Deserialize;

/// Main configuration structure for APK-Sieve
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub filter: FilterConfig,
    #[serde(default)]
    pub archive: ArchiveConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

/// Candidate filter configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterConfig {
    /// Additional domain substrings rejected after the built-in blacklist
    #[serde(rename = "extra-blacklist", default)]
    pub extra_blacklist: Vec<String>,
}

/// Archive walk configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArchiveConfig {
    /// Maximum nesting depth for containers inside containers.
    /// `None` walks every nested container regardless of depth.
    #[serde(rename = "max-nesting-depth", default)]
    pub max_nesting_depth: Option<usize>,
}

/// Collection export configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExportConfig {
    /// Name written to `info.name` of exported collections
    #[serde(rename = "collection-name", default)]
    pub collection_name: Option<String>,
}
