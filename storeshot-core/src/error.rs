//! Error types for document operations.

use thiserror::Error;

/// Result type for document operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur while editing a document.
///
/// None of these are fatal: every variant describes a rejected user action
/// that left the document unchanged.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The selected file is not an image.
    #[error("Please select an image file (got {mime_type:?} for {file_name})")]
    NotAnImage {
        /// Name of the rejected file.
        file_name: String,
        /// MIME type reported for the file.
        mime_type: String,
    },

    /// A colour string is not a valid `#rgb` or `#rrggbb` hex colour.
    #[error("Invalid hex colour: {0}")]
    InvalidColor(String),

    /// A named value (position slot, gradient preset) is not recognised.
    #[error("Unknown {kind}: {name}")]
    UnknownName {
        /// What kind of name was looked up.
        kind: &'static str,
        /// The name that did not match.
        name: String,
    },

    /// Reading an uploaded file failed.
    #[error("Failed to read {path}: {source}")]
    Io {
        /// Path that was being read.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl CoreError {
    pub(crate) fn unknown(kind: &'static str, name: &str) -> Self {
        Self::UnknownName {
            kind,
            name: name.to_string(),
        }
    }
}
