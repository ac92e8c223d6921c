use std::path::PathBuf;

/// Container-level facts about an opened video source.
///
/// `total_frames` is whatever the container reports; some formats report 0.
#[derive(Clone, Debug, PartialEq)]
pub struct VideoMetadata {
    pub width: u32,
    pub height: u32,
    pub fps: f64,
    pub total_frames: usize,
    pub codec: String,
    pub source_path: Option<PathBuf>,
}

impl VideoMetadata {
    /// Approximate duration in seconds, or `None` when fps or frame count is unknown.
    pub fn duration_secs(&self) -> Option<f64> {
        if self.fps > 0.0 && self.total_frames > 0 {
            Some(self.total_frames as f64 / self.fps)
        } else {
            None
        }
    }
}
