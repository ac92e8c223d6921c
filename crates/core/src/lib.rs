//! Video feature extraction and binary violence classification.
//!
//! The crate is split into bounded contexts, each with a `domain` layer
//! (types and traits) and an `infrastructure` layer (ffmpeg, ONNX Runtime,
//! filesystem). Use cases in [`pipeline`] wire them together.

pub mod classification;
pub mod features;
pub mod pipeline;
pub mod shared;
pub mod upload;
pub mod video;
