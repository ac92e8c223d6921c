use std::path::Path;

use crate::shared::frame::Frame;
use crate::shared::video_metadata::VideoMetadata;

/// Reads frames from a video source.
///
/// Implementations handle container and codec details; the feature pipeline
/// only sees [`Frame`] and [`VideoMetadata`].
pub trait VideoReader: Send {
    /// Opens a video file and returns its metadata.
    fn open(&mut self, path: &Path) -> Result<VideoMetadata, Box<dyn std::error::Error>>;

    /// Returns a lazy iterator over every `stride`-th decoded frame, in decode
    /// order, starting with frame 0. Each yielded frame keeps its decode index.
    ///
    /// A `stride` of 0 is treated as 1.
    fn frames(
        &mut self,
        stride: usize,
    ) -> Box<dyn Iterator<Item = Result<Frame, Box<dyn std::error::Error>>> + '_>;

    /// Releases any resources held by the reader.
    fn close(&mut self);
}
