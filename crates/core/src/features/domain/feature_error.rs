use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeatureError {
    /// The container could not be opened, or a packet failed to decode.
    #[error("could not read video {path}: {reason}")]
    SourceUnreadable { path: PathBuf, reason: String },
    /// Extraction succeeded but produced nothing to aggregate.
    #[error("no frames to process")]
    NoFrames,
}
