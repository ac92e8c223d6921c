use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum UploadError {
    #[error("No file selected")]
    EmptyFilename,
    #[error("Invalid file type: {0}")]
    DisallowedExtension(String),
    #[error("Uploaded file is empty")]
    EmptyContent,
    #[error("failed to store upload at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl UploadError {
    /// True when the client sent something unusable, as opposed to a server-side I/O failure.
    pub fn is_invalid_input(&self) -> bool {
        !matches!(self, UploadError::Io { .. })
    }
}
