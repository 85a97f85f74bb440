//! Pdfium PDF rasterizer
//!
//! Binds the pdfium shared library once per process (from `PDFIUM_LIB_PATH`
//! when set, otherwise the system library path) and renders pages to
//! bitmaps at the requested resolution.

use std::path::PathBuf;
use std::sync::OnceLock;

use image::DynamicImage;
use pdfium_render::prelude::*;
use tracing::{debug, info};
use vdr_domain::constants::PDF_POINTS_PER_INCH;
use vdr_domain::error::{Error, Result};
use vdr_domain::ports::providers::PdfRasterizer;

/// Environment variable pointing at a directory holding the pdfium library
pub const PDFIUM_LIB_PATH_ENV: &str = "PDFIUM_LIB_PATH";

struct SyncPdfium(Pdfium);

// SAFETY: the `thread_safe` feature of pdfium-render serializes every call
// into the library behind a global mutex.
#[allow(unsafe_code)]
unsafe impl Send for SyncPdfium {}
#[allow(unsafe_code)]
unsafe impl Sync for SyncPdfium {}

static PDFIUM: OnceLock<std::result::Result<SyncPdfium, String>> = OnceLock::new();

fn bind_pdfium() -> std::result::Result<SyncPdfium, String> {
    if let Some(dir) = std::env::var_os(PDFIUM_LIB_PATH_ENV).map(PathBuf::from) {
        let path = Pdfium::pdfium_platform_library_name_at_path(&dir);
        match Pdfium::bind_to_library(&path) {
            Ok(bindings) => {
                info!(path = %path.display(), "Using pdfium library");
                return Ok(SyncPdfium(Pdfium::new(bindings)));
            }
            Err(e) => debug!(path = %path.display(), error = ?e, "pdfium library not usable"),
        }
    }
    Pdfium::bind_to_system_library()
        .map(|bindings| {
            info!("Using system pdfium library");
            SyncPdfium(Pdfium::new(bindings))
        })
        .map_err(|e| format!("pdfium library not found: {e:?}"))
}

fn pdfium() -> Result<&'static Pdfium> {
    PDFIUM
        .get_or_init(bind_pdfium)
        .as_ref()
        .map(|p| &p.0)
        .map_err(|e| Error::ingestion(e.clone()))
}

/// Pdfium-backed rasterizer
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfiumRasterizer;

impl PdfiumRasterizer {
    /// Create a rasterizer, failing when the pdfium library cannot be bound
    pub fn new() -> Result<Self> {
        pdfium()?;
        Ok(Self)
    }
}

fn load(pdf: &[u8]) -> Result<PdfDocument<'_>> {
    pdfium()?
        .load_pdf_from_byte_slice(pdf, None)
        .map_err(|e| Error::ingestion(format!("Failed to open PDF: {e:?}")))
}

impl PdfRasterizer for PdfiumRasterizer {
    fn page_count(&self, pdf: &[u8]) -> Result<usize> {
        let document = load(pdf)?;
        Ok(document.pages().len() as usize)
    }

    fn render_page(&self, pdf: &[u8], index: usize, dpi: f32) -> Result<DynamicImage> {
        let document = load(pdf)?;
        let page_index = u16::try_from(index)
            .map_err(|_| Error::ingestion(format!("page index {index} exceeds pdfium limit")))?;
        let page = document
            .pages()
            .get(page_index)
            .map_err(|e| Error::ingestion(format!("Failed to get page {}: {e:?}", index + 1)))?;

        let config = PdfRenderConfig::new().scale_page_by_factor(dpi / PDF_POINTS_PER_INCH);
        let bitmap = page
            .render_with_config(&config)
            .map_err(|e| Error::ingestion(format!("Failed to render page {}: {e:?}", index + 1)))?;
        Ok(bitmap.as_image())
    }
}
