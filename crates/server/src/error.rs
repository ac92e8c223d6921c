use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use violence_detect_core::pipeline::classify_video_use_case::ClassifyError;
use violence_detect_core::upload::domain::upload_error::UploadError;

pub type ApiResult<T> = Result<T, ApiError>;

/// Every failure a handler can report, rendered as `{"error": "..."}`.
#[derive(Debug)]
pub enum ApiError {
    /// The client sent something unusable.
    BadRequest(String),
    /// The upload was stored but no frames could be decoded from it.
    Undecodable(String),
    /// Model or storage failure while serving an otherwise valid request.
    PredictionFailed(String),
    /// Malformed or oversized multipart body; keeps the framework's status.
    Multipart { status: StatusCode, message: String },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::Undecodable(_) => StatusCode::BAD_REQUEST,
            ApiError::PredictionFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Multipart { status, .. } => *status,
        }
    }

    /// Text placed in the `error` field.
    pub fn message(&self) -> String {
        match self {
            ApiError::BadRequest(msg) | ApiError::Multipart { message: msg, .. } => msg.clone(),
            ApiError::Undecodable(_) => "Could not extract frames from video".to_string(),
            ApiError::PredictionFailed(msg) => format!("Prediction failed: {msg}"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            ApiError::Undecodable(reason) => log::warn!("Frame extraction failed: {reason}"),
            ApiError::PredictionFailed(reason) => log::error!("Prediction error: {reason}"),
            _ => {}
        }

        (status, Json(json!({ "error": self.message() }))).into_response()
    }
}

impl From<ClassifyError> for ApiError {
    fn from(err: ClassifyError) -> Self {
        match err {
            ClassifyError::Upload(UploadError::DisallowedExtension(_)) => {
                ApiError::BadRequest("Invalid file type".to_string())
            }
            ClassifyError::Upload(e) if e.is_invalid_input() => ApiError::BadRequest(e.to_string()),
            ClassifyError::Upload(e) => ApiError::PredictionFailed(e.to_string()),
            ClassifyError::Decode(e) => ApiError::Undecodable(e.to_string()),
            ClassifyError::Model(e) => ApiError::PredictionFailed(e.to_string()),
        }
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        ApiError::Multipart {
            status: err.status(),
            message: err.body_text(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::path::PathBuf;
    use violence_detect_core::classification::domain::classifier_error::ClassifierError;
    use violence_detect_core::features::domain::feature_error::FeatureError;

    #[rstest]
    #[case(
        ClassifyError::Upload(UploadError::DisallowedExtension("a.txt".into())),
        StatusCode::BAD_REQUEST,
        "Invalid file type"
    )]
    #[case(
        ClassifyError::Upload(UploadError::EmptyFilename),
        StatusCode::BAD_REQUEST,
        "No file selected"
    )]
    #[case(
        ClassifyError::Upload(UploadError::EmptyContent),
        StatusCode::BAD_REQUEST,
        "Uploaded file is empty"
    )]
    #[case(
        ClassifyError::Decode(FeatureError::NoFrames),
        StatusCode::BAD_REQUEST,
        "Could not extract frames from video"
    )]
    #[case(
        ClassifyError::Decode(FeatureError::SourceUnreadable {
            path: PathBuf::from("x.mp4"),
            reason: "moov atom not found".into(),
        }),
        StatusCode::BAD_REQUEST,
        "Could not extract frames from video"
    )]
    #[case(
        ClassifyError::Model(ClassifierError::ModelNotLoaded),
        StatusCode::INTERNAL_SERVER_ERROR,
        "Prediction failed: Model not loaded."
    )]
    fn test_classify_error_mapping(
        #[case] err: ClassifyError,
        #[case] status: StatusCode,
        #[case] message: &str,
    ) {
        let api = ApiError::from(err);
        assert_eq!(api.status(), status);
        assert_eq!(api.message(), message);
    }

    #[test]
    fn test_storage_failure_is_server_error() {
        let err = ClassifyError::Upload(UploadError::Io {
            path: PathBuf::from("uploads/x.mp4"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        });
        let api = ApiError::from(err);
        assert_eq!(api.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(api.message().starts_with("Prediction failed: "));
    }

    #[test]
    fn test_response_carries_status() {
        let response = ApiError::BadRequest("No file provided".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
