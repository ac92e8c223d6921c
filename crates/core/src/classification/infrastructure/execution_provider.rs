use ort::execution_providers::ExecutionProviderDispatch;

/// Hardware-accelerated providers to try before ONNX Runtime's CPU fallback.
///
/// Empty on platforms without a bundled accelerator; the session then runs on CPU.
pub(super) fn preferred_execution_providers() -> Vec<ExecutionProviderDispatch> {
    #[cfg(target_os = "macos")]
    let providers = vec![ort::execution_providers::CoreMLExecutionProvider::default().build()];

    #[cfg(target_os = "windows")]
    let providers = vec![ort::execution_providers::DirectMLExecutionProvider::default().build()];

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    let providers = Vec::new();

    providers
}
