mod execution_provider;
pub mod onnx_classifier;
