//! Auxiliary metadata records

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A record from the external keyed metadata store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataRecord {
    /// Lookup key (usually a page image or document path)
    pub key: String,
    /// Stored document
    pub document: serde_json::Value,
}

/// Book and page fields found in metadata documents
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMetadata {
    /// Book title
    #[serde(default)]
    pub text_book_name: Option<String>,
    /// Volume label
    #[serde(default)]
    pub volume: Option<String>,
    /// Page number within the book
    #[serde(default)]
    pub page_number: Option<u32>,
    /// Path of the page image
    #[serde(default)]
    pub image_location_path: Option<String>,
    /// Path of the source book
    #[serde(default)]
    pub textbook_location_path: Option<String>,
}

impl MetadataRecord {
    /// Create a record
    pub fn new(key: impl Into<String>, document: serde_json::Value) -> Self {
        Self {
            key: key.into(),
            document,
        }
    }

    /// Typed view over the book/page fields; `None` if the document is not an object
    pub fn page_metadata(&self) -> Option<PageMetadata> {
        if !self.document.is_object() {
            return None;
        }
        serde_json::from_value(self.document.clone()).ok()
    }

    /// Decode the base64 `content` field, if present
    pub fn content_bytes(&self) -> Result<Option<Vec<u8>>> {
        match self.document.get("content").and_then(|v| v.as_str()) {
            Some(encoded) => Ok(Some(STANDARD.decode(encoded)?)),
            None => Ok(None),
        }
    }
}
