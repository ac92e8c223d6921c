use std::sync::{Mutex, OnceLock};

use crate::classification::domain::classifier::Classifier;
use crate::classification::domain::classifier_error::ClassifierError;
use crate::features::domain::feature_tensor::FeatureTensor;

/// Builds the classifier; invoked at most once per successful [`Predictor::load`].
pub type ClassifierLoader =
    Box<dyn Fn() -> Result<Box<dyn Classifier>, ClassifierError> + Send + Sync>;

/// Process-wide handle to the classifier.
///
/// Created unloaded, loaded once at startup, then shared read-only (behind an
/// `Arc`) by every request.
pub struct Predictor {
    loader: ClassifierLoader,
    model: OnceLock<Box<dyn Classifier>>,
    load_lock: Mutex<()>,
}

impl Predictor {
    pub fn new(loader: ClassifierLoader) -> Self {
        Self {
            loader,
            model: OnceLock::new(),
            load_lock: Mutex::new(()),
        }
    }

    /// Loads the classifier. Calling it again after a success is a no-op;
    /// after a failure it retries.
    pub fn load(&self) -> Result<(), ClassifierError> {
        if self.is_loaded() {
            return Ok(());
        }

        let _guard = self.load_lock.lock().unwrap_or_else(|e| e.into_inner());
        if self.is_loaded() {
            return Ok(());
        }

        let classifier = (self.loader)()?;
        // Cannot already be set: writers hold load_lock
        let _ = self.model.set(classifier);
        Ok(())
    }

    pub fn is_loaded(&self) -> bool {
        self.model.get().is_some()
    }

    /// Probability that the clip is violent, clamped to `[0, 1]`.
    pub fn predict(&self, features: &FeatureTensor) -> Result<f64, ClassifierError> {
        let model = self.model.get().ok_or(ClassifierError::ModelNotLoaded)?;
        let score = model.score(features)?;
        if !score.is_finite() {
            return Err(ClassifierError::InvalidOutput(score));
        }
        if !(0.0..=1.0).contains(&score) {
            log::warn!("Classifier score {score} outside [0, 1]; clamping");
        }
        Ok(score.clamp(0.0, 1.0))
    }
}
