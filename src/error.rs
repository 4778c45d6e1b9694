//! Error types for the tagdoc library.
//!
//! Problems inside the scanned text are never errors: they surface as
//! [`Diagnostic`](crate::model::Diagnostic)s on the affected record.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for tagdoc operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// No comment syntax is known for the file's extension.
    #[error("unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("unknown format: {0}. Use markdown, html, or json")]
    UnknownFormat(String),

    #[error("invalid config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A `[languages]` entry with no usable comment marker.
    #[error("invalid comment markers for extension `{0}`")]
    InvalidMarkers(String),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}
