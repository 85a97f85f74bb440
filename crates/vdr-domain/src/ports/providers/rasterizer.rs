//! PDF rasterizer port

use image::DynamicImage;

use crate::error::Result;

/// Renders PDF pages to bitmaps
///
/// Rendering is CPU bound; callers on an async runtime should run it on a
/// blocking thread.
pub trait PdfRasterizer: Send + Sync {
    /// Number of pages in the document
    fn page_count(&self, pdf: &[u8]) -> Result<usize>;

    /// Render the page at 0-based `index` with the given resolution
    fn render_page(&self, pdf: &[u8], index: usize, dpi: f32) -> Result<DynamicImage>;
}
