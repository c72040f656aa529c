//! Collection document model
//!
//! Field names and nesting match the Postman Collection v2.1 format so that
//! exported files import directly into API-testing tools.

use crate::url::UrlParts;
use serde::{Deserialize, Serialize};

/// Schema identifier written to `info.schema`
pub const COLLECTION_SCHEMA: &str =
    "https://schema.getpostman.com/json/collection/v2.1.0/collection.json";

/// Top-level collection document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionDocument {
    pub info: CollectionInfo,
    pub item: Vec<Item>,
}

/// Collection metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionInfo {
    pub name: String,
    pub schema: String,
}

/// A collection entry: either a request or a folder of entries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Item {
    Request(RequestItem),
    Folder(FolderItem),
}

/// A single request entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestItem {
    pub name: String,
    pub request: RequestSpec,
    /// Saved responses; always empty on export
    #[serde(default)]
    pub response: Vec<serde_json::Value>,
}

/// A named folder of entries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FolderItem {
    pub name: String,
    pub item: Vec<Item>,
}

/// The request part of a [`RequestItem`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestSpec {
    pub method: String,
    pub header: Vec<HeaderEntry>,
    pub url: UrlParts,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<RequestBody>,
}

/// A request header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderEntry {
    pub key: String,
    pub value: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl HeaderEntry {
    /// Creates a plain-text header entry
    pub fn text(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            kind: "text".to_string(),
        }
    }
}

/// A raw request body with its declared language
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestBody {
    pub mode: String,
    pub raw: String,
    pub options: BodyOptions,
}

impl RequestBody {
    /// Creates a raw body tagged with `language` ("json", "xml", "text", ...)
    pub fn raw(raw: impl Into<String>, language: &str) -> Self {
        Self {
            mode: "raw".to_string(),
            raw: raw.into(),
            options: BodyOptions {
                raw: RawOptions {
                    language: language.to_string(),
                },
            },
        }
    }

    /// The declared body language
    pub fn language(&self) -> &str {
        &self.options.raw.language
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BodyOptions {
    pub raw: RawOptions,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawOptions {
    pub language: String,
}

impl CollectionDocument {
    /// Creates an empty document with the fixed schema identifier
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            info: CollectionInfo {
                name: name.into(),
                schema: COLLECTION_SCHEMA.to_string(),
            },
            item: Vec::new(),
        }
    }

    /// Counts request entries at any depth
    pub fn request_count(&self) -> usize {
        fn count(items: &[Item]) -> usize {
            items
                .iter()
                .map(|item| match item {
                    Item::Request(_) => 1,
                    Item::Folder(folder) => count(&folder.item),
                })
                .sum()
        }
        count(&self.item)
    }
}
