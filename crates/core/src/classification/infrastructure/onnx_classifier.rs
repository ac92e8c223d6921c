use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use crate::classification::domain::classifier::Classifier;
use crate::classification::domain::classifier_error::ClassifierError;
use crate::features::domain::feature_tensor::FeatureTensor;
use crate::shared::frame::FRAME_CHANNELS;

use super::execution_provider::preferred_execution_providers;

/// Binary violence classifier backed by an ONNX Runtime session.
///
/// Expects a model exported with an NHWC `float32` input of shape
/// `[1, height, width, 3]` and a single sigmoid output; the first output
/// element is read as the probability of the violent class.
pub struct OnnxClassifier {
    // `Session::run` takes `&mut self`; requests take turns.
    session: Mutex<ort::session::Session>,
    model_path: PathBuf,
}

impl OnnxClassifier {
    /// Loads the model and checks that any statically declared input
    /// dimensions agree with the configured frame size.
    pub fn load(
        model_path: &Path,
        target_width: u32,
        target_height: u32,
    ) -> Result<Self, ClassifierError> {
        let session = build_session(model_path).map_err(|e| ClassifierError::Load {
            path: model_path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let declared = session.inputs().first().and_then(|input| {
            if let ort::value::ValueType::Tensor { ref shape, .. } = input.dtype() {
                Some(shape.iter().copied().collect::<Vec<i64>>())
            } else {
                None
            }
        });
        if let Some(dims) = declared {
            check_input_dims(&dims, target_width, target_height)?;
        }

        log::info!("Loaded classifier from {}", model_path.display());
        Ok(Self {
            session: Mutex::new(session),
            model_path: model_path.to_path_buf(),
        })
    }

    pub fn model_path(&self) -> &Path {
        &self.model_path
    }
}

fn build_session(model_path: &Path) -> Result<ort::session::Session, Box<dyn std::error::Error>> {
    let intra_threads = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    let session = ort::session::Session::builder()?
        .with_optimization_level(ort::session::builder::GraphOptimizationLevel::Level3)?
        .with_intra_threads(intra_threads)?
        .with_execution_providers(preferred_execution_providers())?
        .commit_from_file(model_path)?;
    Ok(session)
}

/// Validates an NHWC input shape against the configured frame size.
///
/// Non-positive dimensions are dynamic and accept anything.
fn check_input_dims(
    dims: &[i64],
    target_width: u32,
    target_height: u32,
) -> Result<(), ClassifierError> {
    let configured = format!("[1, {target_height}, {target_width}, {FRAME_CHANNELS}]");
    let mismatch = || ClassifierError::ShapeMismatch {
        expected: format!("{dims:?}"),
        configured: configured.clone(),
    };

    if dims.len() != 4 {
        return Err(mismatch());
    }

    let wanted = [
        1,
        target_height as i64,
        target_width as i64,
        FRAME_CHANNELS as i64,
    ];
    let agrees = dims
        .iter()
        .zip(wanted)
        .all(|(&declared, want)| declared <= 0 || declared == want);
    if agrees {
        Ok(())
    } else {
        Err(mismatch())
    }
}

/// A panic in one inference call leaves the session usable; later requests
/// keep running instead of failing on a poisoned lock.
fn lock_recovering<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| {
        log::warn!("Recovering classifier session after a panicked inference");
        e.into_inner()
    })
}

fn inference_error(e: impl Display) -> ClassifierError {
    ClassifierError::Inference(e.to_string())
}

impl Classifier for OnnxClassifier {
    fn score(&self, features: &FeatureTensor) -> Result<f64, ClassifierError> {
        let input = ort::value::Tensor::from_array(features.clone().into_array())
            .map_err(inference_error)?;

        let mut session = lock_recovering(&self.session);
        let outputs = session.run(ort::inputs![input]).map_err(inference_error)?;
        if outputs.len() == 0 {
            return Err(ClassifierError::Inference(
                "model produced no outputs".to_string(),
            ));
        }

        let probabilities = outputs[0]
            .try_extract_array::<f32>()
            .map_err(inference_error)?;
        let score = probabilities
            .iter()
            .next()
            .copied()
            .ok_or_else(|| ClassifierError::Inference("model output is empty".to_string()))?;

        Ok(score as f64)
    }
}
