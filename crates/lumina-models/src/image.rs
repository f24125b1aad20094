//! Reference image models.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Stable identity of an item in the image collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageId(pub Uuid);

impl ImageId {
    /// Generate a new random image ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ImageId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where an image came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    /// Picked from the local filesystem; must be persisted before use
    Uploaded,
    /// Discovered at a remote URL; already hosted
    Remote,
}

impl Provenance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provenance::Uploaded => "uploaded",
            Provenance::Remote => "remote",
        }
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Handle to an image file on the local filesystem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalImage {
    /// Location of the file
    pub path: PathBuf,
    /// File name shown to the user and sent with the upload
    pub file_name: String,
}

impl LocalImage {
    /// Create a handle, deriving the file name from the path.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self { path, file_name }
    }

    /// MIME type guessed from the file extension.
    pub fn mime_type(&self) -> &'static str {
        mime_for_path(&self.path)
    }
}

fn mime_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        "avif" => "image/avif",
        _ => "application/octet-stream",
    }
}

/// Content behind an image item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "provenance", content = "content", rename_all = "snake_case")]
pub enum ImageSource {
    Uploaded(LocalImage),
    Remote(String),
}

/// A candidate reference image for video generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageItem {
    pub id: ImageId,
    pub source: ImageSource,
    /// Displayable reference. For uploads this is a transient reference
    /// owned by the collection; for remote images it is the URL itself.
    pub preview_url: String,
    pub display_name: String,
}

impl ImageItem {
    /// Create an item for a local file with an already-minted preview reference.
    pub fn uploaded(image: LocalImage, preview_url: impl Into<String>) -> Self {
        Self {
            id: ImageId::new(),
            display_name: image.file_name.clone(),
            source: ImageSource::Uploaded(image),
            preview_url: preview_url.into(),
        }
    }

    /// Create an item for a remotely hosted image.
    pub fn remote(url: impl Into<String>, display_name: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            id: ImageId::new(),
            preview_url: url.clone(),
            source: ImageSource::Remote(url),
            display_name: display_name.into(),
        }
    }

    pub fn provenance(&self) -> Provenance {
        match self.source {
            ImageSource::Uploaded(_) => Provenance::Uploaded,
            ImageSource::Remote(_) => Provenance::Remote,
        }
    }

    /// The local file, if this item was uploaded.
    pub fn local_image(&self) -> Option<&LocalImage> {
        match &self.source {
            ImageSource::Uploaded(image) => Some(image),
            ImageSource::Remote(_) => None,
        }
    }
}
