use std::collections::BTreeSet;

/// Accumulates accepted candidates across an entire walk
///
/// Uniqueness is exact string equality; the finished sequence is in ordinary
/// lexicographic order.
#[derive(Debug, Default)]
pub struct ResultAggregator {
    urls: BTreeSet<String>,
}

impl ResultAggregator {
    /// Creates an empty aggregator
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a URL, returning false if it was already present
    pub fn insert(&mut self, url: String) -> bool {
        self.urls.insert(url)
    }

    /// Returns true if the URL has already been accepted
    pub fn contains(&self, url: &str) -> bool {
        self.urls.contains(url)
    }

    /// Number of unique URLs accepted so far
    pub fn len(&self) -> usize {
        self.urls.len()
    }

    /// Returns true if nothing has been accepted
    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    /// Finalizes the walk into a sorted, duplicate-free sequence
    pub fn finish(self) -> Vec<String> {
        self.urls.into_iter().collect()
    }
}
