//! URL handling module for APK-Sieve
//!
//! This module provides the content scanner that pulls URL-like strings out of
//! raw entry bytes, the candidate filter that separates plausible API endpoints
//! from noise, and the decomposition used when URLs are exported.

mod decompose;
mod filter;
mod scanner;

// Re-export main functions
pub use decompose::{parse_url, ParsedUrl, QueryParam, UrlParts, FALLBACK_PROTOCOL};
pub use filter::{
    CandidateFilter, Rejection, BLACKLIST, LOOPBACK_MARKERS, MIN_CANDIDATE_LEN,
    STATIC_ASSET_EXTENSIONS,
};
pub use scanner::{decode_latin1, scan_bytes, UrlMatches};
