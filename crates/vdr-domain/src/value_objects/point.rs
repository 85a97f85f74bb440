//! Points written to the vector store

use serde::{Deserialize, Serialize};

use super::embedding::EmbeddingVector;
use super::page::PageImage;

/// Typed payload stored next to each vector
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointPayload {
    /// Path of the stored page image
    pub image: String,
    /// 1-based page number within the source artifact
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_number: Option<u32>,
    /// Book identifier (ISBN or catalogue id)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub book_id: Option<String>,
    /// Original artifact name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl PointPayload {
    /// Payload with only the image path
    pub fn new(image: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            ..Default::default()
        }
    }

    /// Payload describing a page image
    pub fn for_page(page: &PageImage) -> Self {
        Self {
            image: page.path_string(),
            page_number: Some(page.page_index),
            book_id: None,
            source: None,
        }
    }

    /// Set the book id
    pub fn with_book_id(mut self, book_id: impl Into<String>) -> Self {
        self.book_id = Some(book_id.into());
        self
    }

    /// Set the source artifact name
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

/// A record submitted to the vector store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexedPoint {
    /// Collection-unique, monotonically assigned id
    pub id: u64,
    /// Page embedding
    pub vector: EmbeddingVector,
    /// Payload
    pub payload: PointPayload,
}
