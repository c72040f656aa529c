//! Recursive container traversal
//!
//! The walker visits every non-directory entry of a container. Entries that
//! are themselves packages are reopened and walked in place, so URLs found in
//! split APKs inside an XAPK land in the same result set as the outer ones.

use crate::archive::aggregator::ResultAggregator;
use crate::archive::container::{Container, ContainerReader};
use crate::output::WalkStatistics;
use crate::url::{CandidateFilter, UrlMatches};
use crate::ArchiveError;

/// Entries with this suffix are walked as nested containers
pub const NESTED_CONTAINER_EXTENSION: &str = ".apk";

/// Entries with one of these suffixes are scanned for URLs: compiled code,
/// the resource table, markup, native libraries, scripts and structured data
pub const SCAN_WORTHY_EXTENSIONS: &[&str] = &[
    ".dex",
    ".arsc",
    ".xml",
    ".html",
    ".so",
    ".js",
    ".json",
    ".properties",
];

/// Returns true if the entry should be reopened as a nested container
pub fn is_nested_container(name: &str) -> bool {
    name.ends_with(NESTED_CONTAINER_EXTENSION)
}

/// Returns true if the entry's bytes should be scanned
pub fn is_scan_worthy(name: &str) -> bool {
    SCAN_WORTHY_EXTENSIONS.iter().any(|ext| name.ends_with(ext))
}

/// Walks one outer container and everything nested inside it
///
/// A walker owns its aggregator and statistics; separate analyses never
/// share state.
pub struct ArchiveWalker<'a, R: ContainerReader> {
    reader: &'a R,
    filter: &'a CandidateFilter,
    max_nesting_depth: Option<usize>,
    aggregator: ResultAggregator,
    stats: WalkStatistics,
}

impl<'a, R: ContainerReader> ArchiveWalker<'a, R> {
    /// Creates a walker
    ///
    /// # Arguments
    ///
    /// * `reader` - Opens nested containers from entry bytes
    /// * `filter` - Decides which scanned candidates are kept
    /// * `max_nesting_depth` - `None` follows nested containers without limit
    pub fn new(
        reader: &'a R,
        filter: &'a CandidateFilter,
        max_nesting_depth: Option<usize>,
    ) -> Self {
        Self {
            reader,
            filter,
            max_nesting_depth,
            aggregator: ResultAggregator::new(),
            stats: WalkStatistics::default(),
        }
    }

    /// Walks a container opened by the caller
    ///
    /// `label` names the container in diagnostics.
    pub fn walk<C: Container>(&mut self, container: &mut C, label: &str) {
        self.walk_at_depth(container, label, 0);
    }

    /// Finishes the walk, returning the sorted URLs and the statistics
    pub fn finish(mut self) -> (Vec<String>, WalkStatistics) {
        let urls = self.aggregator.finish();
        self.stats.unique_urls = urls.len() as u64;
        (urls, self.stats)
    }

    fn walk_at_depth<C: Container>(&mut self, container: &mut C, label: &str, depth: usize) {
        self.stats.containers_opened += 1;
        tracing::debug!(
            "Walking {} ({} entries, depth {})",
            label,
            container.len(),
            depth
        );

        for index in 0..container.len() {
            let header = match container.header(index) {
                Ok(header) => header,
                Err(e) => {
                    tracing::warn!("Skipping entry in {}: {}", label, e);
                    self.stats.entry_failures += 1;
                    continue;
                }
            };

            if header.is_directory {
                continue;
            }
            self.stats.entries_seen += 1;

            if is_nested_container(&header.name) {
                self.visit_nested(container, index, &header.name, label, depth);
            } else if is_scan_worthy(&header.name) {
                self.scan_entry(container, index, &header.name, label);
            }
        }
    }

    fn visit_nested<C: Container>(
        &mut self,
        container: &mut C,
        index: usize,
        name: &str,
        label: &str,
        depth: usize,
    ) {
        let nested_depth = depth + 1;
        if let Some(max_depth) = self.max_nesting_depth {
            if nested_depth > max_depth {
                let err = ArchiveError::DepthExceeded {
                    name: name.to_string(),
                    max_depth,
                };
                tracing::warn!("Skipping nested container in {}: {}", label, err);
                self.stats.nested_failures += 1;
                return;
            }
        }

        let nested = container
            .read_entry(index)
            .and_then(|entry| self.reader.open_bytes(entry.bytes))
            .map_err(|e| ArchiveError::Nested {
                name: name.to_string(),
                reason: e.to_string(),
            });

        match nested {
            Ok(mut nested) => {
                self.stats.nested_containers += 1;
                let nested_label = format!("{}!{}", label, name);
                self.walk_at_depth(&mut nested, &nested_label, nested_depth);
            }
            Err(e) => {
                tracing::warn!("Skipping nested container in {}: {}", label, e);
                self.stats.nested_failures += 1;
            }
        }
    }

    fn scan_entry<C: Container>(
        &mut self,
        container: &mut C,
        index: usize,
        name: &str,
        label: &str,
    ) {
        let entry = match container.read_entry(index) {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("Skipping entry {} in {}: {}", name, label, e);
                self.stats.entry_failures += 1;
                return;
            }
        };
        self.stats.entries_scanned += 1;

        for candidate in UrlMatches::new(&entry.bytes) {
            self.stats.candidates_found += 1;
            match self.filter.check(&candidate) {
                Ok(()) => {
                    self.aggregator.insert(candidate);
                }
                Err(rejection) => {
                    tracing::trace!("Rejected {} ({:?}) in {}", candidate, rejection, name);
                    self.stats.candidates_rejected += 1;
                }
            }
        }
    }
}
