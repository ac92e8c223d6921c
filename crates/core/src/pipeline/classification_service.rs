use std::sync::Arc;

use crate::classification::domain::predictor::Predictor;
use crate::features::domain::extraction_settings::ExtractionSettings;
use crate::upload::domain::upload_guard::UploadGuard;
use crate::upload::domain::upload_store::UploadStore;
use crate::video::domain::video_reader::VideoReader;

use super::classify_video_use_case::{ClassifyError, ClassifyVideoUseCase, VideoVerdict};
use super::extract_frames_use_case::ExtractFramesUseCase;
use super::pipeline_logger::LogPipelineLogger;

/// Creates a fresh reader for each request.
pub type ReaderFactory = Box<dyn Fn() -> Box<dyn VideoReader> + Send + Sync>;

/// Entry point for classifying uploaded video bytes.
///
/// Shared across request handlers. Each call stores the upload, runs the
/// pipeline on its own reader, and removes the stored file before returning.
pub struct VideoClassificationService {
    uploads: Box<dyn UploadStore>,
    predictor: Arc<Predictor>,
    reader_factory: ReaderFactory,
    settings: ExtractionSettings,
}

impl VideoClassificationService {
    pub fn new(
        uploads: Box<dyn UploadStore>,
        predictor: Arc<Predictor>,
        reader_factory: ReaderFactory,
        settings: ExtractionSettings,
    ) -> Self {
        Self {
            uploads,
            predictor,
            reader_factory,
            settings,
        }
    }

    pub fn is_allowed_extension(&self, filename: &str) -> bool {
        self.uploads.is_allowed_extension(filename)
    }

    pub fn is_model_loaded(&self) -> bool {
        self.predictor.is_loaded()
    }

    pub fn settings(&self) -> &ExtractionSettings {
        &self.settings
    }

    pub fn classify_upload(
        &self,
        original_name: &str,
        contents: &[u8],
    ) -> Result<VideoVerdict, ClassifyError> {
        let upload = UploadGuard::store(self.uploads.as_ref(), contents, original_name)?;
        log::info!("Processing video: {original_name}");

        let extractor = ExtractFramesUseCase::new((self.reader_factory)(), &self.settings);
        let mut use_case = ClassifyVideoUseCase::new(
            extractor,
            self.predictor.clone(),
            Box::new(LogPipelineLogger::new(original_name)),
        );
        let verdict = use_case.execute(upload.path())?;

        log::info!(
            "Prediction for {original_name}: violent={}, score={:.4}",
            verdict.prediction.is_violent(),
            verdict.prediction.score()
        );
        Ok(verdict)
    }
}
