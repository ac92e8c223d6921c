use std::path::PathBuf;

use clap::Parser;

use violence_detect_core::features::domain::extraction_settings::{
    ChannelOrder, ExtractionSettings,
};

/// HTTP service that classifies uploaded videos as violent or non-violent.
#[derive(Parser, Debug)]
#[command(name = "violence-detect")]
pub struct Cli {
    /// Address to bind.
    #[arg(long, env = "VD_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on.
    #[arg(long, env = "VD_PORT", default_value = "5000")]
    pub port: u16,

    /// ONNX classifier model.
    #[arg(long = "model", env = "VD_MODEL_PATH", default_value = "model.onnx")]
    pub model: PathBuf,

    /// Download the model from here if it is not found locally.
    #[arg(long, env = "VD_MODEL_URL")]
    pub model_url: Option<String>,

    /// Scratch directory for uploads (created if missing).
    #[arg(long, env = "VD_UPLOAD_DIR", default_value = "uploads")]
    pub upload_dir: PathBuf,

    /// Accepted file extensions (comma-separated, case-insensitive).
    #[arg(
        long,
        env = "VD_ALLOWED_EXTENSIONS",
        value_delimiter = ',',
        default_value = "mp4,avi,mov,mkv,webm"
    )]
    pub allowed_extensions: Vec<String>,

    /// Maximum request body size in MiB.
    #[arg(long, env = "VD_MAX_UPLOAD_MB", default_value = "100")]
    pub max_upload_mb: usize,

    /// Keep every Nth decoded frame.
    #[arg(long, env = "VD_FRAME_INTERVAL", default_value = "10")]
    pub frame_interval: usize,

    /// Upper bound on sampled frames per video.
    #[arg(long, env = "VD_MAX_FRAMES", default_value = "50")]
    pub max_frames: usize,

    /// Width the model expects.
    #[arg(long, env = "VD_TARGET_WIDTH", default_value = "128")]
    pub target_width: u32,

    /// Height the model expects.
    #[arg(long, env = "VD_TARGET_HEIGHT", default_value = "128")]
    pub target_height: u32,

    /// Channel order the model expects: rgb or bgr.
    #[arg(long, env = "VD_CHANNEL_ORDER", default_value = "rgb")]
    pub channel_order: ChannelOrder,
}

impl Cli {
    pub fn validate(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.extraction_settings().validate()?;
        if self.max_upload_mb == 0 {
            return Err("Max upload size must be at least 1 MiB".into());
        }
        if self.allowed_extensions().is_empty() {
            return Err("At least one allowed extension is required".into());
        }
        Ok(())
    }

    pub fn extraction_settings(&self) -> ExtractionSettings {
        ExtractionSettings {
            target_width: self.target_width,
            target_height: self.target_height,
            stride: self.frame_interval,
            max_frames: self.max_frames,
            channel_order: self.channel_order,
        }
    }

    /// Extensions without surrounding whitespace or a leading dot; blanks dropped.
    pub fn allowed_extensions(&self) -> Vec<String> {
        self.allowed_extensions
            .iter()
            .map(|e| e.trim().trim_start_matches('.').to_string())
            .filter(|e| !e.is_empty())
            .collect()
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb.saturating_mul(1024 * 1024)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use violence_detect_core::shared::constants::{
        DEFAULT_ALLOWED_EXTENSIONS, DEFAULT_MAX_UPLOAD_BYTES, DEFAULT_UPLOAD_DIR,
    };

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("violence-detect").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&[]);
        assert_eq!(cli.bind_address(), "0.0.0.0:5000");
        assert_eq!(cli.model, PathBuf::from("model.onnx"));
        assert_eq!(cli.upload_dir, PathBuf::from(DEFAULT_UPLOAD_DIR));
        assert_eq!(cli.allowed_extensions(), DEFAULT_ALLOWED_EXTENSIONS);
        assert_eq!(cli.max_upload_bytes(), DEFAULT_MAX_UPLOAD_BYTES);
        assert_eq!(cli.extraction_settings(), ExtractionSettings::default());
        assert!(cli.validate().is_ok());
    }

    #[test]
    fn test_extensions_are_trimmed() {
        let cli = parse(&["--allowed-extensions", " .mp4, mkv ,,"]);
        assert_eq!(cli.allowed_extensions(), vec!["mp4", "mkv"]);
    }

    #[test]
    fn test_channel_order_parses() {
        let cli = parse(&["--channel-order", "BGR"]);
        assert_eq!(cli.channel_order, ChannelOrder::Bgr);
    }

    #[test]
    fn test_unknown_channel_order_is_rejected() {
        let result = Cli::try_parse_from(["violence-detect", "--channel-order", "hsv"]);
        assert!(result.is_err());
    }

    #[rstest]
    #[case(&["--frame-interval", "0"])]
    #[case(&["--max-frames", "0"])]
    #[case(&["--target-width", "0"])]
    #[case(&["--max-upload-mb", "0"])]
    #[case(&["--allowed-extensions", ","])]
    fn test_invalid_values_fail_validation(#[case] args: &[&str]) {
        assert!(parse(args).validate().is_err());
    }
}
