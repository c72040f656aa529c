//! Output module for exporting discovery results
//!
//! This module handles:
//! - Building and serializing request collection documents
//! - Rendering markdown discovery reports
//! - Recording and printing walk statistics

mod document;
mod export;
mod markdown;
pub mod stats;

pub use document::{
    BodyOptions, CollectionDocument, CollectionInfo, FolderItem, HeaderEntry, Item, RawOptions,
    RequestBody, RequestItem, RequestSpec, COLLECTION_SCHEMA,
};
pub use export::{
    body_language, build_request_collection, build_url_collection, export_requests, export_urls,
    to_json, write_collection,
};
pub use markdown::{format_markdown_report, generate_markdown_report};
pub use stats::{print_statistics, WalkStatistics};

use thiserror::Error;

/// Errors that can occur while writing reports
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
