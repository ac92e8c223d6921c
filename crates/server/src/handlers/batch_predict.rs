use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;

use crate::app::AppState;
use crate::error::{ApiError, ApiResult};

use super::upload::{classify, missing_upload, next_file};

/// One entry per uploaded file, in upload order.
#[derive(Serialize, Debug)]
#[serde(untagged)]
pub enum BatchItem {
    Success {
        filename: String,
        violent: bool,
        confidence: f64,
        prediction_score: f64,
    },
    Failure {
        filename: String,
        error: String,
    },
}

#[derive(Serialize, Debug)]
pub struct BatchResponse {
    results: Vec<BatchItem>,
}

/// POST /batch-predict - classify every video in the repeated field `files`.
///
/// A failing file becomes an error entry; it never fails the request.
pub async fn batch_predict(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Json<BatchResponse>> {
    let mut multipart = multipart.map_err(|e| missing_upload(e, "No files provided"))?;
    let mut files = Vec::new();
    while let Some(file) = next_file(&mut multipart, "files").await? {
        files.push(file);
    }

    let Some(first) = files.first() else {
        return Err(ApiError::BadRequest("No files provided".to_string()));
    };
    if first.filename.is_empty() {
        return Err(ApiError::BadRequest("No files selected".to_string()));
    }

    let mut results = Vec::with_capacity(files.len());
    for file in files {
        let filename = file.filename.clone();
        let item = match classify(state.service.clone(), file).await {
            Ok(verdict) => BatchItem::Success {
                filename,
                violent: verdict.prediction.is_violent(),
                confidence: verdict.prediction.rounded_confidence(),
                prediction_score: verdict.prediction.score(),
            },
            Err(e) => {
                let error = e.message();
                log::warn!("Batch item {filename} failed: {error}");
                BatchItem::Failure { filename, error }
            }
        };
        results.push(item);
    }

    Ok(Json(BatchResponse { results }))
}
