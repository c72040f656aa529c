//! Collection export
//!
//! Two entry points share URL decomposition and serialization:
//! captured requests become a flat list of request entries, while plain URL
//! lists are classified and written as one folder per non-empty category.

use crate::capture::CapturedRequest;
use crate::classify::classify_urls;
use crate::output::document::{
    CollectionDocument, FolderItem, HeaderEntry, Item, RequestBody, RequestItem, RequestSpec,
};
use crate::url::parse_url;
use crate::Result;
use std::path::Path;

/// Content-type substrings that map to a body language, checked in order
const BODY_LANGUAGES: &[&str] = &["json", "xml", "html", "javascript"];

/// Body language used when the content type matches none of [`BODY_LANGUAGES`]
const DEFAULT_BODY_LANGUAGE: &str = "text";

/// Builds a flat collection with one request entry per captured request
pub fn build_request_collection(name: &str, requests: &[CapturedRequest]) -> CollectionDocument {
    let mut document = CollectionDocument::new(name);
    document.item = requests
        .iter()
        .map(|request| Item::Request(captured_item(request)))
        .collect();
    document
}

/// Builds a collection of classified URLs, one folder per non-empty category
pub fn build_url_collection(name: &str, urls: &[String]) -> CollectionDocument {
    let classification = classify_urls(urls);

    let mut document = CollectionDocument::new(name);
    document.item = classification
        .non_empty()
        .map(|bucket| {
            Item::Folder(FolderItem {
                name: bucket.display_name.to_string(),
                item: bucket
                    .urls
                    .iter()
                    .map(|url| Item::Request(url_item(url)))
                    .collect(),
            })
        })
        .collect();
    document
}

/// Exports captured requests as collection JSON
///
/// # Example
///
/// ```
/// use apk_sieve::capture::CapturedRequest;
/// use apk_sieve::output::export_requests;
///
/// let request = CapturedRequest {
///     method: "GET".to_string(),
///     url: "https://api.example.com/v1/me".to_string(),
///     host: "api.example.com".to_string(),
///     path: "/v1/me".to_string(),
///     request_headers: vec![],
///     request_body: None,
/// };
/// let json = export_requests("Captured", &[request]).unwrap();
/// assert!(json.contains("\"GET /v1/me\""));
/// ```
pub fn export_requests(name: &str, requests: &[CapturedRequest]) -> Result<String> {
    to_json(&build_request_collection(name, requests))
}

/// Classifies URLs and exports them as collection JSON
pub fn export_urls(name: &str, urls: &[String]) -> Result<String> {
    to_json(&build_url_collection(name, urls))
}

/// Serializes a document with stable key order and two-space indentation
pub fn to_json(document: &CollectionDocument) -> Result<String> {
    Ok(serde_json::to_string_pretty(document)?)
}

/// Serializes a document and writes it to `path`
pub fn write_collection(document: &CollectionDocument, path: &Path) -> Result<()> {
    let json = to_json(document)?;
    std::fs::write(path, json)?;
    tracing::info!(
        "Wrote collection '{}' ({} requests) to {}",
        document.info.name,
        document.request_count(),
        path.display()
    );
    Ok(())
}

/// Maps a Content-Type value to the body language tag
pub fn body_language(content_type: Option<&str>) -> &'static str {
    let Some(content_type) = content_type else {
        return DEFAULT_BODY_LANGUAGE;
    };
    let lower = content_type.to_lowercase();
    BODY_LANGUAGES
        .iter()
        .find(|language| lower.contains(*language))
        .copied()
        .unwrap_or(DEFAULT_BODY_LANGUAGE)
}

fn captured_item(request: &CapturedRequest) -> RequestItem {
    let url = parse_url(&request.url, &request.host, &request.path).into_parts();

    let body = request
        .request_body
        .as_ref()
        .map(|body| RequestBody::raw(body.clone(), body_language(request.content_type())));

    RequestItem {
        name: format!("{} {}", request.method, request.path),
        request: RequestSpec {
            method: request.method.clone(),
            header: request
                .request_headers
                .iter()
                .map(|(key, value)| HeaderEntry::text(key.clone(), value.clone()))
                .collect(),
            url,
            body,
        },
        response: Vec::new(),
    }
}

fn url_item(url: &str) -> RequestItem {
    let parts = parse_url(url, url, "").into_parts();

    let name = if parts.path.is_empty() {
        url.to_string()
    } else {
        format!("/{}", parts.path.join("/"))
    };

    RequestItem {
        name,
        request: RequestSpec {
            method: "GET".to_string(),
            header: Vec::new(),
            url: parts,
            body: None,
        },
        response: Vec::new(),
    }
}
