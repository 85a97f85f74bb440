//! Uploaded artifacts and their classification

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::constants::IMAGE_EXTENSIONS;
use crate::error::{Error, Result};

/// Length of the hex prefix used as artifact id
const ARTIFACT_ID_LEN: usize = 16;

/// Kind of an uploaded artifact, derived from its file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    /// Multi-page PDF document
    Pdf,
    /// ZIP archive of page images
    Zip,
    /// Single PNG or JPEG image
    Image,
}

impl ArtifactKind {
    /// Classify a file name by its (case-insensitive) extension
    pub fn from_file_name(name: &str) -> Result<Self> {
        let extension = file_extension(name).ok_or_else(|| Error::unsupported_artifact(name))?;
        match extension.as_str() {
            "pdf" => Ok(Self::Pdf),
            "zip" => Ok(Self::Zip),
            ext if IMAGE_EXTENSIONS.contains(&ext) => Ok(Self::Image),
            _ => Err(Error::unsupported_artifact(name)),
        }
    }

    /// Stable lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Zip => "zip",
            Self::Image => "image",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a file name carries one of the supported image extensions
pub fn is_image_file_name(name: &str) -> bool {
    file_extension(name).is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

fn file_extension(name: &str) -> Option<String> {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
}

/// An uploaded file, transient: converted into page images then discarded
#[derive(Clone)]
pub struct Artifact {
    id: String,
    kind: ArtifactKind,
    name: String,
    bytes: Vec<u8>,
}

impl Artifact {
    /// Classify and wrap raw upload bytes
    ///
    /// Fails with [`Error::UnsupportedArtifactKind`] when the name has no
    /// PDF, ZIP or image extension.
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Result<Self> {
        let name = name.into();
        let kind = ArtifactKind::from_file_name(&name)?;
        let digest = hex::encode(Sha256::digest(&bytes));
        Ok(Self {
            id: digest[..ARTIFACT_ID_LEN].to_string(),
            kind,
            name,
            bytes,
        })
    }

    /// Content-derived identifier (hash prefix)
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Artifact kind
    pub fn kind(&self) -> ArtifactKind {
        self.kind
    }

    /// Original file name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// File name without directory and extension
    pub fn stem(&self) -> String {
        Path::new(&self.name)
            .file_stem()
            .and_then(|s| s.to_str())
            .filter(|s| !s.is_empty())
            .unwrap_or(&self.id)
            .to_string()
    }

    /// Raw bytes
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Artifact")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("name", &self.name)
            .field("len", &self.bytes.len())
            .finish()
    }
}
