use crate::classification::domain::classifier_error::ClassifierError;
use crate::features::domain::feature_tensor::FeatureTensor;

/// A loaded binary classifier.
///
/// Shared across request threads, hence `Sync`; implementations that need
/// exclusive access to their runtime serialize calls internally.
pub trait Classifier: Send + Sync {
    /// Raw probability that the clip is violent.
    fn score(&self, features: &FeatureTensor) -> Result<f64, ClassifierError>;
}
