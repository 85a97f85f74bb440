//! Rasterized page images

use std::io::Cursor;
use std::path::PathBuf;

use image::{DynamicImage, ImageFormat};

use crate::error::{Error, Result};

/// A single page produced by ingestion
///
/// Carries the decoded pixels and the path the page is stored under once
/// persisted. The path is what ends up in the vector store payload.
#[derive(Debug, Clone)]
pub struct PageImage {
    /// Id of the artifact the page came from
    pub artifact_id: String,
    /// 1-based position within the artifact
    pub page_index: u32,
    /// Decoded pixel data
    pub image: DynamicImage,
    /// Derived storage path
    pub path: PathBuf,
}

impl PageImage {
    /// Create a page image
    pub fn new(
        artifact_id: impl Into<String>,
        page_index: u32,
        image: DynamicImage,
        path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            artifact_id: artifact_id.into(),
            page_index,
            image,
            path: path.into(),
        }
    }

    /// Storage path as a string (lossy for non UTF-8 paths)
    pub fn path_string(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }

    /// Encode the pixels as PNG
    pub fn to_png_bytes(&self) -> Result<Vec<u8>> {
        let mut buffer = Cursor::new(Vec::new());
        self.image
            .write_to(&mut buffer, ImageFormat::Png)
            .map_err(|e| {
                Error::ingestion_with_source(
                    format!("Failed to encode page {} as PNG", self.page_index),
                    e,
                )
            })?;
        Ok(buffer.into_inner())
    }

    /// Write the page to its storage path as PNG, creating parent directories
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                Error::io_with_source(format!("Failed to create {}", parent.display()), e)
            })?;
        }
        self.image
            .save_with_format(&self.path, ImageFormat::Png)
            .map_err(|e| {
                Error::io_with_source(format!("Failed to write {}", self.path.display()), e)
            })
    }

    /// Whether the page has already been written
    pub fn is_persisted(&self) -> bool {
        self.path.exists()
    }
}
