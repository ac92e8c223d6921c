/// Side length the classifier was trained on (frames are resized to this square).
pub const DEFAULT_TARGET_SIZE: u32 = 128;

/// Keep every Nth decoded frame.
pub const DEFAULT_FRAME_INTERVAL: usize = 10;

/// Upper bound on sampled frames per video.
pub const DEFAULT_MAX_FRAMES: usize = 50;

/// Scores strictly above this are classified as violent.
pub const VIOLENCE_THRESHOLD: f64 = 0.5;

pub const DEFAULT_ALLOWED_EXTENSIONS: &[&str] = &["mp4", "avi", "mov", "mkv", "webm"];

/// 100 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 100 * 1024 * 1024;

pub const DEFAULT_UPLOAD_DIR: &str = "uploads";

/// Cache subdirectory (under the platform cache dir) for downloaded models.
pub const MODEL_CACHE_APP_DIR: &str = "violence-detect";
