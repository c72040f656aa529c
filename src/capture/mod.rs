//! Captured HTTP requests
//!
//! Requests recorded by an external proxy or browser are the input of the
//! request-list exporter. This module defines their shape and imports them
//! from HAR (HTTP Archive 1.2) captures.

mod har;

pub use har::{load_har, parse_har};

use thiserror::Error;

/// Errors that can occur while importing captured requests
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("Failed to read capture file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse HAR: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A request captured from live traffic
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedRequest {
    /// HTTP method, e.g. "GET"
    pub method: String,

    /// Full request URL
    pub url: String,

    /// Host the request was sent to
    pub host: String,

    /// Path (and query) of the request
    pub path: String,

    /// Request headers in capture order
    pub request_headers: Vec<(String, String)>,

    /// Request body, if any
    pub request_body: Option<String>,
}

impl CapturedRequest {
    /// Returns the first header with the given name (case-insensitive)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.request_headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Returns the Content-Type header, if present
    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }
}
