use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClassifierError {
    #[error("Model not loaded.")]
    ModelNotLoaded,
    #[error("failed to load model from {path}: {reason}")]
    Load { path: PathBuf, reason: String },
    #[error("model expects {expected}, but frames are configured as {configured}")]
    ShapeMismatch { expected: String, configured: String },
    #[error("inference failed: {0}")]
    Inference(String),
    #[error("model produced a non-finite score ({0})")]
    InvalidOutput(f64),
}
