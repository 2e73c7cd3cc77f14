//! Errors from host-side integrations: clipboard and export files.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),

    #[error("failed to write clipboard: {0}")]
    WriteFailed(String),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("no directory available for export")]
    NoDirectory,

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
