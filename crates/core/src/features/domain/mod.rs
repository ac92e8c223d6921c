pub mod extraction_settings;
pub mod feature_aggregator;
pub mod feature_error;
pub mod feature_tensor;
pub mod frame_preprocessor;
pub mod preprocessed_frame;
