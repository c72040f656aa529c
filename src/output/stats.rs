//! Walk statistics
//!
//! Counters collected while walking a package, and their console rendering.

/// Counters for one discovery run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalkStatistics {
    /// Containers walked, the outer one included
    pub containers_opened: u64,

    /// Nested containers successfully opened
    pub nested_containers: u64,

    /// Non-directory entries visited
    pub entries_seen: u64,

    /// Entries whose bytes were scanned
    pub entries_scanned: u64,

    /// URL-like substrings extracted before filtering
    pub candidates_found: u64,

    /// Candidates dropped by the filter
    pub candidates_rejected: u64,

    /// Nested containers skipped (unreadable, not a container, too deep)
    pub nested_failures: u64,

    /// Single entries skipped because they could not be read
    pub entry_failures: u64,

    /// Unique URLs in the final result
    pub unique_urls: u64,
}

impl WalkStatistics {
    /// Returns true if anything was skipped, i.e. the result may be partial
    pub fn is_partial(&self) -> bool {
        self.nested_failures > 0 || self.entry_failures > 0
    }

    /// Returns the share of candidates that survived filtering, as a percentage
    pub fn acceptance_rate(&self) -> f64 {
        if self.candidates_found == 0 {
            return 0.0;
        }
        let accepted = self.candidates_found - self.candidates_rejected;
        (accepted as f64 / self.candidates_found as f64) * 100.0
    }
}

/// Prints statistics to stdout in a human-readable format
pub fn print_statistics(stats: &WalkStatistics) {
    println!("=== Walk Statistics ===\n");

    println!("Containers:");
    println!("  Walked: {}", stats.containers_opened);
    println!("  Nested: {}", stats.nested_containers);
    println!("  Skipped: {}", stats.nested_failures);

    println!("\nEntries:");
    println!("  Seen: {}", stats.entries_seen);
    println!("  Scanned: {}", stats.entries_scanned);
    println!("  Unreadable: {}", stats.entry_failures);

    println!("\nCandidates:");
    println!("  Found: {}", stats.candidates_found);
    println!("  Rejected: {}", stats.candidates_rejected);
    println!("  Acceptance rate: {:.2}%", stats.acceptance_rate());
    println!("  Unique URLs: {}", stats.unique_urls);

    if stats.is_partial() {
        println!("\n! Some containers or entries were skipped; results may be partial");
    }
}
