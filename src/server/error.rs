//! HTTP error responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::QuizError;
use crate::protocol::ErrorResponse;

pub const EXPLANATION_TIMEOUT_MESSAGE: &str =
    "The explanation is taking longer than expected. Please try again.";
pub const EXPLANATION_FAILED_MESSAGE: &str = "Failed to generate explanation";
pub const STUDY_GUIDE_TIMEOUT_MESSAGE: &str = "The study guide is taking longer than expected to \
generate. Please try again with fewer questions or try again later.";
pub const STUDY_GUIDE_FAILED_MESSAGE: &str =
    "Failed to generate study guide. Please try again later.";

#[derive(Debug, Clone, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Timeout(&'static str),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Timeout(_) => StatusCode::REQUEST_TIMEOUT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Map a tutor failure from `POST /explain`.
    pub fn from_explain(err: QuizError) -> Self {
        Self::from_generation(err, EXPLANATION_TIMEOUT_MESSAGE, EXPLANATION_FAILED_MESSAGE)
    }

    /// Map a tutor failure from `POST /study-guide`.
    pub fn from_study_guide(err: QuizError) -> Self {
        Self::from_generation(err, STUDY_GUIDE_TIMEOUT_MESSAGE, STUDY_GUIDE_FAILED_MESSAGE)
    }

    fn from_generation(err: QuizError, timeout: &'static str, failed: &'static str) -> Self {
        match err {
            QuizError::Validation(reason) => ApiError::BadRequest(reason),
            QuizError::Timeout(_) => ApiError::Timeout(timeout),
            other => {
                tracing::error!(error = %other, "generation request failed");
                ApiError::Internal(failed.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse {
            error: self.to_string(),
        });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::BadRequest("bad".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Timeout(EXPLANATION_TIMEOUT_MESSAGE).status_code(),
            StatusCode::REQUEST_TIMEOUT
        );
        assert_eq!(
            ApiError::Internal("boom".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_messages_per_endpoint() {
        let err = ApiError::from_explain(QuizError::Timeout(Duration::from_secs(25)));
        assert_eq!(err.to_string(), EXPLANATION_TIMEOUT_MESSAGE);

        let err = ApiError::from_study_guide(QuizError::Timeout(Duration::from_secs(45)));
        assert_eq!(err.to_string(), STUDY_GUIDE_TIMEOUT_MESSAGE);

        let err = ApiError::from_study_guide(QuizError::GenerationFailed("401".to_string()));
        assert_eq!(err.to_string(), STUDY_GUIDE_FAILED_MESSAGE);
        assert!(!err.to_string().contains("401"));
    }

    #[test]
    fn test_validation_keeps_reason() {
        let err = ApiError::from_study_guide(QuizError::Validation(
            "No wrong questions provided".to_string(),
        ));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "No wrong questions provided");
    }
}
