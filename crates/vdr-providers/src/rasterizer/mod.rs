//! PDF rasterizer implementations

use image::DynamicImage;
use vdr_domain::error::{Error, Result};
use vdr_domain::ports::providers::PdfRasterizer;

#[cfg(feature = "rasterizer-pdfium")]
pub mod pdfium;

#[cfg(feature = "rasterizer-pdfium")]
pub use self::pdfium::PdfiumRasterizer;

/// Rasterizer used when no PDF backend could be set up
///
/// Every PDF is rejected with an ingestion error naming `reason`; ZIP and
/// image uploads are unaffected.
#[derive(Debug, Clone)]
pub struct UnavailableRasterizer {
    reason: String,
}

impl UnavailableRasterizer {
    /// Rasterizer failing with `reason`
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    fn error(&self) -> Error {
        Error::ingestion(format!("PDF rasterization unavailable: {}", self.reason))
    }
}

impl PdfRasterizer for UnavailableRasterizer {
    fn page_count(&self, _pdf: &[u8]) -> Result<usize> {
        Err(self.error())
    }

    fn render_page(&self, _pdf: &[u8], _index: usize, _dpi: f32) -> Result<DynamicImage> {
        Err(self.error())
    }
}
