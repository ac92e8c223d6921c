use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;

use violence_detect_core::pipeline::classify_video_use_case::VideoVerdict;

use crate::app::AppState;
use crate::error::{ApiError, ApiResult};

use super::upload::{classify, missing_upload, next_file};

#[derive(Serialize, Debug)]
pub struct PredictResponse {
    violent: bool,
    confidence: f64,
    prediction_score: f64,
    frames_processed: usize,
    message: &'static str,
}

impl From<VideoVerdict> for PredictResponse {
    fn from(verdict: VideoVerdict) -> Self {
        let prediction = verdict.prediction;
        Self {
            violent: prediction.is_violent(),
            confidence: prediction.rounded_confidence(),
            prediction_score: prediction.score(),
            frames_processed: verdict.frames_processed,
            message: prediction.message(),
        }
    }
}

/// POST /predict - classify the video in multipart field `file`.
pub async fn predict(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Json<PredictResponse>> {
    let mut multipart = multipart.map_err(|e| missing_upload(e, "No file provided"))?;
    let file = next_file(&mut multipart, "file")
        .await?
        .ok_or_else(|| ApiError::BadRequest("No file provided".to_string()))?;
    if file.filename.is_empty() {
        return Err(ApiError::BadRequest("No file selected".to_string()));
    }

    let verdict = classify(state.service.clone(), file).await?;
    Ok(Json(PredictResponse::from(verdict)))
}
