//! Document Ingestor
//!
//! Turns an [`Artifact`] into a lazy, restartable sequence of [`PageImage`]s.
//! Nothing is decoded until the sequence is iterated, and every call to
//! [`PageSequence::iter`] starts again from the first page.

use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::DynamicImage;
use tracing::{debug, warn};
use vdr_domain::constants::{PAGE_FILE_INFIX, RENDER_DPI};
use vdr_domain::error::{Error, Result};
use vdr_domain::ports::providers::PdfRasterizer;
use vdr_domain::value_objects::{Artifact, ArtifactKind, PageImage, is_image_file_name};
use zip::ZipArchive;

/// Converts uploaded artifacts into page images
pub struct DocumentIngestor {
    rasterizer: Arc<dyn PdfRasterizer>,
    image_dir: PathBuf,
    dpi: f32,
}

impl DocumentIngestor {
    /// Ingestor writing page paths under `image_dir`, rendering PDFs at 300 DPI
    pub fn new(rasterizer: Arc<dyn PdfRasterizer>, image_dir: impl Into<PathBuf>) -> Self {
        Self {
            rasterizer,
            image_dir: image_dir.into(),
            dpi: RENDER_DPI,
        }
    }

    /// Override the rendering resolution
    pub fn with_dpi(mut self, dpi: f32) -> Self {
        self.dpi = dpi;
        self
    }

    /// Directory page images are stored under
    pub fn image_dir(&self) -> &Path {
        &self.image_dir
    }

    /// Prepare the page sequence of an artifact
    ///
    /// PDFs and ZIPs are opened here so that unreadable containers fail
    /// early; pages themselves are decoded during iteration.
    pub fn ingest(&self, artifact: Artifact) -> Result<PageSequence> {
        let source = match artifact.kind() {
            ArtifactKind::Pdf => {
                let pages = self.rasterizer.page_count(artifact.bytes())?;
                PageSource::Pdf { pages }
            }
            ArtifactKind::Zip => PageSource::Zip {
                entries: list_image_entries(artifact.bytes())?,
            },
            ArtifactKind::Image => PageSource::Image,
        };
        debug!(
            artifact = artifact.name(),
            kind = %artifact.kind(),
            "Prepared artifact for ingestion"
        );
        Ok(PageSequence {
            artifact,
            source,
            rasterizer: Arc::clone(&self.rasterizer),
            image_dir: self.image_dir.clone(),
            dpi: self.dpi,
        })
    }
}

/// An image entry of a ZIP archive
#[derive(Debug, Clone)]
struct ZipEntry {
    /// Index inside the archive
    archive_index: usize,
    /// Entry name
    name: String,
}

#[derive(Debug, Clone)]
enum PageSource {
    Pdf { pages: usize },
    Zip { entries: Vec<ZipEntry> },
    Image,
}

fn open_archive(bytes: &[u8]) -> Result<ZipArchive<Cursor<&[u8]>>> {
    ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| Error::ingestion_with_source("Failed to open ZIP archive", e))
}

/// Image entries in archive order; directories and other files are ignored
fn list_image_entries(bytes: &[u8]) -> Result<Vec<ZipEntry>> {
    let mut archive = open_archive(bytes)?;
    let mut entries = Vec::new();
    for archive_index in 0..archive.len() {
        match archive.by_index_raw(archive_index) {
            Ok(file) if !file.is_dir() && is_image_file_name(file.name()) => {
                entries.push(ZipEntry {
                    archive_index,
                    name: file.name().to_string(),
                });
            }
            Ok(_) => {}
            Err(e) => warn!(index = archive_index, error = %e, "Skipping unreadable ZIP entry"),
        }
    }
    Ok(entries)
}

/// Replace anything outside `[A-Za-z0-9._-]` so stems are safe file names
fn sanitize_stem(stem: &str) -> String {
    let cleaned: String = stem
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "page".to_string()
    } else {
        cleaned
    }
}

fn file_stem(name: &str) -> String {
    Path::new(name)
        .file_stem()
        .and_then(|s| s.to_str())
        .map(sanitize_stem)
        .unwrap_or_else(|| "page".to_string())
}

/// Pages of one artifact
pub struct PageSequence {
    artifact: Artifact,
    source: PageSource,
    rasterizer: Arc<dyn PdfRasterizer>,
    image_dir: PathBuf,
    dpi: f32,
}

impl PageSequence {
    /// Number of pages the sequence will attempt to produce
    ///
    /// Corrupt ZIP entries are skipped during iteration, so the number of
    /// pages actually yielded can be lower.
    pub fn len(&self) -> usize {
        match &self.source {
            PageSource::Pdf { pages } => *pages,
            PageSource::Zip { entries } => entries.len(),
            PageSource::Image => 1,
        }
    }

    /// Whether the artifact has no page at all
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The artifact the pages come from
    pub fn artifact(&self) -> &Artifact {
        &self.artifact
    }

    /// Iterate from the first page
    pub fn iter(&self) -> PageIter<'_> {
        self.iter_from(0)
    }

    fn iter_from(&self, position: usize) -> PageIter<'_> {
        let archive = match self.source {
            PageSource::Zip { .. } => Some(open_archive(self.artifact.bytes())),
            _ => None,
        };
        PageIter {
            sequence: self,
            position,
            archive,
        }
    }

    /// Decode every page
    pub fn collect_pages(&self) -> Result<Vec<PageImage>> {
        self.iter().collect()
    }

    /// Turn the sequence into an owned cursor pulled a chunk at a time
    pub fn into_cursor(self) -> PageCursor {
        PageCursor {
            sequence: self,
            position: 0,
        }
    }

    /// `{stem}_{artifact_id}`: same-named uploads with different content
    /// never share a file
    fn file_prefix(&self) -> String {
        format!("{}_{}", sanitize_stem(&self.artifact.stem()), self.artifact.id())
    }

    fn page_path(&self, file_name: String) -> PathBuf {
        self.image_dir.join(file_name)
    }

    fn pdf_page(&self, index: usize) -> Result<PageImage> {
        let image = self
            .rasterizer
            .render_page(self.artifact.bytes(), index, self.dpi)?;
        let page_number = page_number(index)?;
        let file_name = format!("{}{}{}.png", self.file_prefix(), PAGE_FILE_INFIX, page_number);
        Ok(PageImage::new(
            self.artifact.id(),
            page_number,
            image,
            self.page_path(file_name),
        ))
    }

    fn single_image(&self) -> Result<PageImage> {
        let image = decode_image(self.artifact.bytes(), self.artifact.name())?;
        let file_name = format!("{}.png", self.file_prefix());
        Ok(PageImage::new(
            self.artifact.id(),
            1,
            image,
            self.page_path(file_name),
        ))
    }

    fn zip_entry(
        &self,
        archive: &mut ZipArchive<Cursor<&[u8]>>,
        position: usize,
        entry: &ZipEntry,
    ) -> Result<PageImage> {
        let mut file = archive
            .by_index(entry.archive_index)
            .map_err(|e| Error::ingestion_with_source(format!("Failed to open {}", entry.name), e))?;
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)
            .map_err(|e| Error::ingestion_with_source(format!("Failed to read {}", entry.name), e))?;
        let image = decode_image(&bytes, &entry.name)?;
        let page_number = page_number(position)?;
        let file_name = format!(
            "{}{}{}_{}.png",
            self.file_prefix(),
            PAGE_FILE_INFIX,
            page_number,
            file_stem(&entry.name)
        );
        Ok(PageImage::new(
            self.artifact.id(),
            page_number,
            image,
            self.page_path(file_name),
        ))
    }
}

impl<'a> IntoIterator for &'a PageSequence {
    type Item = Result<PageImage>;
    type IntoIter = PageIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn page_number(index: usize) -> Result<u32> {
    u32::try_from(index + 1)
        .map_err(|_| Error::ingestion(format!("page index {index} out of range")))
}

fn decode_image(bytes: &[u8], name: &str) -> Result<DynamicImage> {
    image::load_from_memory(bytes)
        .map_err(|e| Error::ingestion_with_source(format!("Failed to decode image {name}"), e))
}

/// Owned position in a [`PageSequence`]
///
/// Decodes at most `max` pages per [`PageCursor::next_chunk`] call, so a
/// caller holds one chunk of bitmaps at a time. Can be moved into a
/// blocking task between chunks.
pub struct PageCursor {
    sequence: PageSequence,
    position: usize,
}

impl PageCursor {
    /// Decode the next pages, up to `max`; empty once the sequence is done
    pub fn next_chunk(&mut self, max: usize) -> Result<Vec<PageImage>> {
        let mut iter = self.sequence.iter_from(self.position);
        let chunk = iter.by_ref().take(max).collect::<Result<Vec<_>>>();
        self.position = iter.position;
        chunk
    }

    /// Upper bound on the pages still to come
    pub fn remaining(&self) -> usize {
        self.sequence.len().saturating_sub(self.position)
    }

    /// The sequence being walked
    pub fn sequence(&self) -> &PageSequence {
        &self.sequence
    }
}

/// Iterator over the pages of a [`PageSequence`]
pub struct PageIter<'a> {
    sequence: &'a PageSequence,
    position: usize,
    archive: Option<Result<ZipArchive<Cursor<&'a [u8]>>>>,
}

impl Iterator for PageIter<'_> {
    type Item = Result<PageImage>;

    fn next(&mut self) -> Option<Self::Item> {
        let sequence = self.sequence;
        match &sequence.source {
            PageSource::Pdf { pages } => {
                if self.position >= *pages {
                    return None;
                }
                let index = self.position;
                self.position += 1;
                Some(sequence.pdf_page(index))
            }
            PageSource::Image => {
                if self.position > 0 {
                    return None;
                }
                self.position = 1;
                Some(sequence.single_image())
            }
            PageSource::Zip { entries } => loop {
                let entry = entries.get(self.position)?;
                let position = self.position;
                self.position += 1;
                if matches!(self.archive, Some(Err(_))) {
                    self.position = entries.len();
                    return self.archive.take().and_then(Result::err).map(Err);
                }
                let Some(Ok(archive)) = self.archive.as_mut() else {
                    return None;
                };
                match sequence.zip_entry(archive, position, entry) {
                    Ok(page) => return Some(Ok(page)),
                    Err(e) => warn!(
                        artifact = sequence.artifact.name(),
                        entry = %entry.name,
                        error = %e,
                        "Skipping undecodable ZIP entry"
                    ),
                }
            },
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.sequence.len().saturating_sub(self.position);
        (0, Some(remaining))
    }
}
