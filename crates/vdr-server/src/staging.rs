//! Upload staging
//!
//! Each upload is written into its own directory under `server.staging_dir`.
//! The directory is tagged with an upload id and removed when the
//! [`StagedUpload`] is dropped, whichever way the request ends.

use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tracing::debug;
use uuid::Uuid;
use vdr_domain::error::{Error, Result};

use crate::constants::STAGING_DIR_PREFIX;

/// A per-upload staging directory
#[derive(Debug)]
pub struct StagedUpload {
    id: String,
    dir: TempDir,
    file_name: String,
}

impl StagedUpload {
    /// Create the staging directory for an upload named `file_name`
    ///
    /// Only the final path component of the client supplied name is kept.
    pub async fn create(staging_root: &Path, file_name: &str) -> Result<Self> {
        let file_name = safe_file_name(file_name)?;
        tokio::fs::create_dir_all(staging_root).await.map_err(|e| {
            Error::io_with_source(
                format!("Failed to create staging root {}", staging_root.display()),
                e,
            )
        })?;

        let id = Uuid::new_v4().simple().to_string();
        let dir = tempfile::Builder::new()
            .prefix(&format!("{STAGING_DIR_PREFIX}{id}-"))
            .tempdir_in(staging_root)
            .map_err(|e| Error::io_with_source("Failed to create staging directory", e))?;
        debug!(upload = %id, dir = %dir.path().display(), "Upload staged");

        Ok(Self { id, dir, file_name })
    }

    /// Upload id used in logs
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Sanitized original file name
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Staging directory
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// Where the uploaded bytes are written
    pub fn file_path(&self) -> PathBuf {
        self.dir.path().join(&self.file_name)
    }
}

/// Final path component of a client supplied file name
pub fn safe_file_name(raw: &str) -> Result<String> {
    let last = raw.rsplit(['/', '\\']).next().unwrap_or_default().trim();
    if last.is_empty() || last == "." || last == ".." {
        return Err(Error::invalid_argument("uploaded file has no usable name"));
    }
    Ok(last.to_string())
}
