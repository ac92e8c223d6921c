use crate::shared::constants::{DEFAULT_FRAME_INTERVAL, DEFAULT_MAX_FRAMES, DEFAULT_TARGET_SIZE};

/// Channel layout the classifier expects in its input tensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChannelOrder {
    #[default]
    Rgb,
    Bgr,
}

impl std::str::FromStr for ChannelOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rgb" => Ok(ChannelOrder::Rgb),
            "bgr" => Ok(ChannelOrder::Bgr),
            other => Err(format!("channel order must be 'rgb' or 'bgr', got '{other}'")),
        }
    }
}

impl std::fmt::Display for ChannelOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChannelOrder::Rgb => write!(f, "rgb"),
            ChannelOrder::Bgr => write!(f, "bgr"),
        }
    }
}

/// How frames are sampled from a video and shaped for the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractionSettings {
    pub target_width: u32,
    pub target_height: u32,
    /// Keep frames whose decode index is a multiple of this.
    pub stride: usize,
    /// Stop once this many frames have been kept.
    pub max_frames: usize,
    pub channel_order: ChannelOrder,
}

impl Default for ExtractionSettings {
    fn default() -> Self {
        Self {
            target_width: DEFAULT_TARGET_SIZE,
            target_height: DEFAULT_TARGET_SIZE,
            stride: DEFAULT_FRAME_INTERVAL,
            max_frames: DEFAULT_MAX_FRAMES,
            channel_order: ChannelOrder::Rgb,
        }
    }
}

impl ExtractionSettings {
    pub fn validate(&self) -> Result<(), String> {
        if self.target_width == 0 || self.target_height == 0 {
            return Err(format!(
                "Target size must be positive, got {}x{}",
                self.target_width, self.target_height
            ));
        }
        if self.stride == 0 {
            return Err("Frame interval must be at least 1".to_string());
        }
        if self.max_frames == 0 {
            return Err("Max frames must be at least 1".to_string());
        }
        Ok(())
    }
}
