use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use thiserror::Error;

use crate::classification::domain::classifier_error::ClassifierError;
use crate::classification::domain::prediction::Prediction;
use crate::classification::domain::predictor::Predictor;
use crate::features::domain::feature_aggregator::extract_features;
use crate::features::domain::feature_error::FeatureError;
use crate::upload::domain::upload_error::UploadError;

use super::extract_frames_use_case::ExtractFramesUseCase;
use super::pipeline_logger::PipelineLogger;

/// Result of classifying one video.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VideoVerdict {
    pub prediction: Prediction,
    pub frames_processed: usize,
}

#[derive(Error, Debug)]
pub enum ClassifyError {
    #[error(transparent)]
    Upload(#[from] UploadError),
    #[error(transparent)]
    Decode(#[from] FeatureError),
    #[error(transparent)]
    Model(#[from] ClassifierError),
}

/// Runs extract, aggregate and predict for a video already on disk.
pub struct ClassifyVideoUseCase {
    extractor: ExtractFramesUseCase,
    predictor: Arc<Predictor>,
    logger: Box<dyn PipelineLogger>,
}

impl ClassifyVideoUseCase {
    pub fn new(
        extractor: ExtractFramesUseCase,
        predictor: Arc<Predictor>,
        logger: Box<dyn PipelineLogger>,
    ) -> Self {
        Self {
            extractor,
            predictor,
            logger,
        }
    }

    pub fn execute(&mut self, path: &Path) -> Result<VideoVerdict, ClassifyError> {
        let start = Instant::now();
        let frames = self.extractor.execute(path)?;
        self.logger.timing("decode", elapsed_ms(start));
        self.logger.metric("frames_sampled", frames.len() as f64);

        let start = Instant::now();
        let features = extract_features(&frames)?;
        self.logger.timing("aggregate", elapsed_ms(start));

        let start = Instant::now();
        let score = self.predictor.predict(&features)?;
        self.logger.timing("inference", elapsed_ms(start));
        self.logger.summary();

        Ok(VideoVerdict {
            prediction: Prediction::from_score(score),
            frames_processed: frames.len(),
        })
    }
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}
