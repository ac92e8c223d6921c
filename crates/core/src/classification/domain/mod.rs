pub mod classifier;
pub mod classifier_error;
pub mod prediction;
pub mod predictor;
