use std::path::Path;

use crate::features::domain::extraction_settings::ExtractionSettings;
use crate::features::domain::feature_error::FeatureError;
use crate::features::domain::frame_preprocessor::FramePreprocessor;
use crate::features::domain::preprocessed_frame::PreprocessedFrame;
use crate::video::domain::video_reader::VideoReader;

/// Samples a video at a fixed stride and preprocesses each kept frame.
///
/// Frames are pulled lazily, so once `max_frames` are kept the rest of the
/// container is never decoded. Any open or decode error aborts the whole
/// extraction.
pub struct ExtractFramesUseCase {
    reader: Box<dyn VideoReader>,
    preprocessor: FramePreprocessor,
    stride: usize,
    max_frames: usize,
}

impl ExtractFramesUseCase {
    pub fn new(reader: Box<dyn VideoReader>, settings: &ExtractionSettings) -> Self {
        Self {
            reader,
            preprocessor: FramePreprocessor::new(
                settings.target_width,
                settings.target_height,
                settings.channel_order,
            ),
            stride: settings.stride,
            max_frames: settings.max_frames,
        }
    }

    /// Returns the preprocessed frames in decode order. An empty result is
    /// valid; callers decide whether it is an error.
    pub fn execute(&mut self, path: &Path) -> Result<Vec<PreprocessedFrame>, FeatureError> {
        let unreadable = |e: Box<dyn std::error::Error>| FeatureError::SourceUnreadable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        };

        let metadata = self.reader.open(path).map_err(unreadable)?;
        log::info!(
            "Video info: {} frames, {} FPS ({}x{} {})",
            metadata.total_frames,
            metadata.fps,
            metadata.width,
            metadata.height,
            metadata.codec
        );

        let result = self.sample(unreadable);
        self.reader.close();

        let frames = result?;
        log::info!("Extracted {} frames", frames.len());
        Ok(frames)
    }

    fn sample(
        &mut self,
        unreadable: impl Fn(Box<dyn std::error::Error>) -> FeatureError,
    ) -> Result<Vec<PreprocessedFrame>, FeatureError> {
        let preprocessor = self.preprocessor;
        let mut frames = Vec::with_capacity(self.max_frames.min(64));
        for decoded in self.reader.frames(self.stride).take(self.max_frames) {
            let frame = decoded.map_err(&unreadable)?;
            frames.push(preprocessor.preprocess(&frame));
        }
        Ok(frames)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::domain::extraction_settings::ChannelOrder;
    use crate::shared::frame::Frame;
    use crate::shared::video_metadata::VideoMetadata;
    use crate::video::infrastructure::ffmpeg_reader::{test_video, FfmpegReader};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    // --- Stubs ---

    /// Serves `count` solid frames; optionally fails at a given decode index.
    struct StubReader {
        count: usize,
        fail_at: Option<usize>,
        decoded: Arc<AtomicUsize>,
        closed: Arc<AtomicUsize>,
    }

    impl StubReader {
        fn new(count: usize) -> Self {
            Self {
                count,
                fail_at: None,
                decoded: Arc::new(AtomicUsize::new(0)),
                closed: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    impl VideoReader for StubReader {
        fn open(&mut self, _path: &Path) -> Result<VideoMetadata, Box<dyn std::error::Error>> {
            Ok(VideoMetadata {
                width: 32,
                height: 24,
                fps: 25.0,
                total_frames: self.count,
                codec: "stub".to_string(),
                source_path: None,
            })
        }

        fn frames(
            &mut self,
            stride: usize,
        ) -> Box<dyn Iterator<Item = Result<Frame, Box<dyn std::error::Error>>> + '_> {
            let fail_at = self.fail_at;
            let decoded = self.decoded.clone();
            Box::new(
                (0..self.count)
                    .inspect(move |_| {
                        decoded.fetch_add(1, Ordering::SeqCst);
                    })
                    .filter(move |i| i % stride.max(1) == 0)
                    .map(move |i| -> Result<Frame, Box<dyn std::error::Error>> {
                        if Some(i) == fail_at {
                            Err("corrupt packet".into())
                        } else {
                            Ok(Frame::solid(32, 24, [(i % 256) as u8, 0, 0], i))
                        }
                    }),
            )
        }

        fn close(&mut self) {
            self.closed.fetch_add(1, Ordering::SeqCst);
        }
    }

    struct UnopenableReader;

    impl VideoReader for UnopenableReader {
        fn open(&mut self, _path: &Path) -> Result<VideoMetadata, Box<dyn std::error::Error>> {
            Err("moov atom not found".into())
        }

        fn frames(
            &mut self,
            _stride: usize,
        ) -> Box<dyn Iterator<Item = Result<Frame, Box<dyn std::error::Error>>> + '_> {
            Box::new(std::iter::empty())
        }

        fn close(&mut self) {}
    }

    fn settings(stride: usize, max_frames: usize) -> ExtractionSettings {
        ExtractionSettings {
            target_width: 16,
            target_height: 8,
            stride,
            max_frames,
            channel_order: ChannelOrder::Rgb,
        }
    }

    fn indices(frames: &[PreprocessedFrame]) -> Vec<usize> {
        frames.iter().map(|f| f.index()).collect()
    }

    // --- Tests ---

    #[test]
    fn test_samples_every_stride_th_frame() {
        let reader = Box::new(StubReader::new(25));
        let mut use_case = ExtractFramesUseCase::new(reader, &settings(10, 50));
        let frames = use_case.execute(Path::new("clip.mp4")).unwrap();
        assert_eq!(indices(&frames), vec![0, 10, 20]);
    }

    #[test]
    fn test_caps_output_and_stops_decoding() {
        let reader = StubReader::new(1000);
        let decoded = reader.decoded.clone();
        let mut use_case = ExtractFramesUseCase::new(Box::new(reader), &settings(2, 4));

        let frames = use_case.execute(Path::new("long.mp4")).unwrap();
        assert_eq!(indices(&frames), vec![0, 2, 4, 6]);
        // Lazy: nothing past the fourth kept frame was decoded
        assert_eq!(decoded.load(Ordering::SeqCst), 7);
    }

    #[test]
    fn test_frames_have_target_shape_and_unit_range() {
        let reader = Box::new(StubReader::new(30));
        let mut use_case = ExtractFramesUseCase::new(reader, &settings(1, 50));
        let frames = use_case.execute(Path::new("clip.mp4")).unwrap();
        assert_eq!(frames.len(), 30);
        for f in &frames {
            assert_eq!(f.shape(), (8, 16, 3));
            assert!(f.pixels().iter().all(|v| (0.0..=1.0).contains(v)));
        }
    }

    #[test]
    fn test_empty_video_yields_empty_sequence() {
        let reader = Box::new(StubReader::new(0));
        let mut use_case = ExtractFramesUseCase::new(reader, &settings(10, 50));
        let frames = use_case.execute(Path::new("empty.mp4")).unwrap();
        assert!(frames.is_empty());
    }

    #[test]
    fn test_open_failure_is_source_unreadable() {
        let mut use_case =
            ExtractFramesUseCase::new(Box::new(UnopenableReader), &settings(10, 50));
        let err = use_case.execute(Path::new("broken.mp4")).unwrap_err();
        match err {
            FeatureError::SourceUnreadable { path, reason } => {
                assert_eq!(path, Path::new("broken.mp4"));
                assert!(reason.contains("moov atom"));
            }
            other => panic!("expected SourceUnreadable, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_error_aborts_and_closes_reader() {
        let mut reader = StubReader::new(50);
        reader.fail_at = Some(20);
        let closed = reader.closed.clone();
        let mut use_case = ExtractFramesUseCase::new(Box::new(reader), &settings(10, 50));

        let err = use_case.execute(Path::new("clip.mp4")).unwrap_err();
        assert!(matches!(err, FeatureError::SourceUnreadable { .. }));
        assert_eq!(closed.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_real_video_scenario() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.mp4");
        test_video::create(&path, 25, 160, 120, 25);

        let defaults = ExtractionSettings::default();
        let mut use_case = ExtractFramesUseCase::new(Box::new(FfmpegReader::new()), &defaults);
        let frames = use_case.execute(&path).unwrap();

        assert_eq!(indices(&frames), vec![0, 10, 20]);
        for f in &frames {
            assert_eq!(f.shape(), (128, 128, 3));
            assert!(f.pixels().iter().all(|v| (0.0..=1.0).contains(v)));
        }
    }
}
