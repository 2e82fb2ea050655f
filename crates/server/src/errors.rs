use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use service::errors::ServiceError;
use thiserror::Error;
use tracing::warn;

/// Failures surfaced by the HTTP layer. Bodies are plain text.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request carried no `json` file part.
    #[error("no json file in the request!")]
    MissingPayload,
    /// The upload exceeded the request body limit.
    #[error("json file too large!")]
    PayloadTooLarge,
    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingPayload => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Service(ServiceError::Parse(_) | ServiceError::InvalidInput(_)) => StatusCode::BAD_REQUEST,
            ApiError::Service(ServiceError::Conflict(_)) => StatusCode::CONFLICT,
            ApiError::Service(ServiceError::NotFound(_)) => StatusCode::NOT_FOUND,
        }
    }

    /// Message returned to the client.
    pub fn message(&self) -> String {
        match self {
            ApiError::MissingPayload | ApiError::PayloadTooLarge => self.to_string(),
            ApiError::Service(ServiceError::Parse(_)) => "failed to parse JSON file correctly!".into(),
            ApiError::Service(ServiceError::InvalidInput(msg)) => msg.clone(),
            ApiError::Service(ServiceError::Conflict(_)) => "already in the records!".into(),
            ApiError::Service(ServiceError::NotFound(_)) => "no such record found!".into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        warn!(status = status.as_u16(), error = %self, "request rejected");
        (status, self.message()).into_response()
    }
}
