//! Uploaded image files and the document's asset table.
//!
//! Image elements refer to their pixels through an [`ImageHandle`]. The
//! document owns the bytes and releases them when the element is deleted.

use std::collections::BTreeMap;
use std::io::Cursor;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{CoreError, CoreResult, ImageHandle};

/// A file handed over by the file picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    /// File name as shown to the user.
    pub file_name: String,
    /// Reported MIME type.
    pub mime_type: String,
    /// File contents.
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// Create an upload from its parts.
    #[must_use]
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Read a file from disk, detecting its MIME type from the contents and
    /// falling back to the extension.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Io`] if the file cannot be read. A non-image file
    /// is read successfully; it is rejected later by [`ImageUpload::validate`].
    pub fn from_path(path: impl AsRef<Path>) -> CoreResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| CoreError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let mime_type = sniff_mime(&bytes, path);
        let file_name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
        Ok(Self {
            file_name,
            mime_type,
            bytes,
        })
    }

    /// Whether the MIME type is an `image/*` type.
    #[must_use]
    pub fn is_image(&self) -> bool {
        self.mime_type.to_ascii_lowercase().starts_with("image/")
    }

    /// Reject anything that is not an image.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NotAnImage`] when the MIME type is not `image/*`.
    pub fn validate(&self) -> CoreResult<()> {
        if self.is_image() {
            Ok(())
        } else {
            Err(CoreError::NotAnImage {
                file_name: self.file_name.clone(),
                mime_type: self.mime_type.clone(),
            })
        }
    }
}

fn sniff_mime(bytes: &[u8], path: &Path) -> String {
    if let Ok(format) = image::guess_format(bytes) {
        return format.to_mime_type().to_string();
    }
    path.extension()
        .and_then(image::ImageFormat::from_extension)
        .map_or("application/octet-stream", |format| format.to_mime_type())
        .to_string()
}

/// Image data owned by the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageAsset {
    /// Original file name.
    pub file_name: String,
    /// MIME type of `bytes`.
    pub mime_type: String,
    /// Encoded image bytes. Left out of serialized documents.
    #[serde(skip_serializing, default)]
    pub bytes: Vec<u8>,
    /// Pixel size of the decoded image, when the header could be read.
    pub intrinsic_size: Option<(u32, u32)>,
}

impl ImageAsset {
    /// Take ownership of a validated upload.
    #[must_use]
    pub fn from_upload(upload: ImageUpload) -> Self {
        let intrinsic_size = image::ImageReader::new(Cursor::new(&upload.bytes))
            .with_guessed_format()
            .ok()
            .and_then(|reader| reader.into_dimensions().ok());
        if intrinsic_size.is_none() {
            tracing::warn!("Could not read dimensions of {}", upload.file_name);
        }
        Self {
            file_name: upload.file_name,
            mime_type: upload.mime_type,
            bytes: upload.bytes,
            intrinsic_size,
        }
    }
}

/// Table of live image assets keyed by handle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageAssets {
    next_handle: u64,
    entries: BTreeMap<u64, ImageAsset>,
}

impl ImageAssets {
    /// Store an asset and return its handle. Handles are never reused.
    pub fn insert(&mut self, asset: ImageAsset) -> ImageHandle {
        let raw = self.next_handle;
        self.next_handle += 1;
        self.entries.insert(raw, asset);
        ImageHandle::from_raw(raw)
    }

    /// Look up an asset.
    #[must_use]
    pub fn get(&self, handle: ImageHandle) -> Option<&ImageAsset> {
        self.entries.get(&handle.raw())
    }

    /// Drop an asset, returning it if it was live.
    pub fn release(&mut self, handle: ImageHandle) -> Option<ImageAsset> {
        self.entries.remove(&handle.raw())
    }

    /// Number of live assets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no assets are live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
