//! Package analysis: container access, recursive walking and result
//! aggregation
//!
//! [`analyze_package`] is the discovery entry point. It opens the outer
//! container (the only failure that aborts a run), walks it and every nested
//! package, and returns the sorted, de-duplicated URLs together with walk
//! statistics. Failures below the outer container are logged and skipped, so
//! a partial result is a normal outcome.

mod aggregator;
mod container;
mod walker;

pub use aggregator::ResultAggregator;
pub use container::{
    ArchiveEntry, Container, ContainerReader, EntryHeader, ZipContainer, ZipReader,
};
pub use walker::{
    is_nested_container, is_scan_worthy, ArchiveWalker, NESTED_CONTAINER_EXTENSION,
    SCAN_WORTHY_EXTENSIONS,
};

use crate::config::ArchiveConfig;
use crate::output::WalkStatistics;
use crate::url::CandidateFilter;
use crate::{Result, SieveError};
use std::path::{Path, PathBuf};

/// Label used in diagnostics for containers analyzed from memory
const IN_MEMORY_LABEL: &str = "<memory>";

/// Result of one discovery run
#[derive(Debug, Clone, Default)]
pub struct Discovery {
    /// Unique URLs in lexicographic order
    pub urls: Vec<String>,

    /// Counters collected during the walk
    pub stats: WalkStatistics,
}

/// Analyzes a package file on disk using the zip reader
///
/// # Arguments
///
/// * `path` - Path to the APK/XAPK
/// * `filter` - Candidate filter applied to every scanned substring
/// * `config` - Archive walk settings
///
/// # Returns
///
/// * `Ok(Discovery)` - Possibly partial results
/// * `Err(SieveError::ContainerOpen)` - The package itself could not be opened
///
/// # Example
///
/// ```no_run
/// use apk_sieve::archive::analyze_package;
/// use apk_sieve::config::ArchiveConfig;
/// use apk_sieve::url::CandidateFilter;
/// use std::path::Path;
///
/// let discovery = analyze_package(
///     Path::new("app.xapk"),
///     &CandidateFilter::new(),
///     &ArchiveConfig::default(),
/// ).unwrap();
/// for url in &discovery.urls {
///     println!("{}", url);
/// }
/// ```
pub fn analyze_package(
    path: &Path,
    filter: &CandidateFilter,
    config: &ArchiveConfig,
) -> Result<Discovery> {
    analyze_with(&ZipReader, path, filter, config)
}

/// Analyzes a package file with any container reader
pub fn analyze_with<R: ContainerReader>(
    reader: &R,
    path: &Path,
    filter: &CandidateFilter,
    config: &ArchiveConfig,
) -> Result<Discovery> {
    let label = path.display().to_string();
    let mut container = reader
        .open_path(path)
        .map_err(|source| SieveError::ContainerOpen {
            path: label.clone(),
            source,
        })?;

    Ok(run_walk(reader, &mut container, &label, filter, config))
}

/// Analyzes a package held in memory
pub fn analyze_package_bytes(
    bytes: Vec<u8>,
    filter: &CandidateFilter,
    config: &ArchiveConfig,
) -> Result<Discovery> {
    let reader = ZipReader;
    let mut container = reader
        .open_bytes(bytes)
        .map_err(|source| SieveError::ContainerOpen {
            path: IN_MEMORY_LABEL.to_string(),
            source,
        })?;

    Ok(run_walk(&reader, &mut container, IN_MEMORY_LABEL, filter, config))
}

/// Runs [`analyze_package`] on tokio's blocking pool
///
/// The walk itself is synchronous and never yields; this keeps it off the
/// async worker threads.
pub async fn analyze_package_async(
    path: PathBuf,
    filter: CandidateFilter,
    config: ArchiveConfig,
) -> Result<Discovery> {
    tokio::task::spawn_blocking(move || analyze_package(&path, &filter, &config))
        .await
        .map_err(|e| SieveError::Task(e.to_string()))?
}

fn run_walk<R: ContainerReader, C: Container>(
    reader: &R,
    container: &mut C,
    label: &str,
    filter: &CandidateFilter,
    config: &ArchiveConfig,
) -> Discovery {
    let mut walker = ArchiveWalker::new(reader, filter, config.max_nesting_depth);
    walker.walk(container, label);
    let (urls, stats) = walker.finish();

    tracing::info!(
        "Analyzed {}: {} unique URLs from {} candidates ({} containers, {} failures)",
        label,
        urls.len(),
        stats.candidates_found,
        stats.containers_opened,
        stats.nested_failures + stats.entry_failures
    );

    Discovery { urls, stats }
}
