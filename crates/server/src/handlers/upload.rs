use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::multipart::MultipartRejection;
use axum::extract::Multipart;

use violence_detect_core::pipeline::classification_service::VideoClassificationService;
use violence_detect_core::pipeline::classify_video_use_case::VideoVerdict;

use crate::error::{ApiError, ApiResult};

pub(super) struct UploadedFile {
    pub filename: String,
    pub contents: Bytes,
}

/// A request that is not `multipart/form-data` carries no upload at all.
pub(super) fn missing_upload(rejection: MultipartRejection, message: &str) -> ApiError {
    log::warn!("Rejected non-multipart upload: {rejection}");
    ApiError::BadRequest(message.to_string())
}

/// Reads up to the next multipart field called `name`, skipping any others.
/// A part without a filename is returned with an empty one.
pub(super) async fn next_file(
    multipart: &mut Multipart,
    name: &str,
) -> ApiResult<Option<UploadedFile>> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(name) {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let contents = field.bytes().await?;
        return Ok(Some(UploadedFile { filename, contents }));
    }
    Ok(None)
}

/// Runs the pipeline for one upload on the blocking pool.
pub(super) async fn classify(
    service: Arc<VideoClassificationService>,
    file: UploadedFile,
) -> ApiResult<VideoVerdict> {
    let UploadedFile { filename, contents } = file;
    tokio::task::spawn_blocking(move || service.classify_upload(&filename, &contents))
        .await
        .map_err(|e| ApiError::PredictionFailed(format!("worker task failed: {e}")))?
        .map_err(ApiError::from)
}
