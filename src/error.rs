use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use thiserror::Error;

use crate::models::{ErrorResponse, Tier};

pub const UNSUPPORTED_MEDIA_TYPE: &str = "Unsupported Media Type. Only JSON requests are allowed.";

/// Failures of the prediction pipeline
///
/// Every variant short-circuits the request and is rendered as a JSON
/// error body by the [`ResponseError`] impl below.
#[derive(Debug, Error)]
pub enum PredictionError {
    #[error("Unsupported Media Type. Only JSON requests are allowed.")]
    UnsupportedMediaType,

    #[error("Missing feature: {0}")]
    MissingFeature(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("could not convert value {value} of column '{column}' to a number")]
    InvalidValue { column: String, value: String },

    #[error("assembled columns do not match the {tier} schema: {detail}")]
    SchemaMismatch { tier: Tier, detail: String },

    #[error("model for the {0} tier is unavailable")]
    ModelUnavailable(Tier),

    #[error("{0}")]
    Internal(String),
}

impl PredictionError {
    pub fn invalid_value(column: &str, value: &serde_json::Value) -> Self {
        PredictionError::InvalidValue {
            column: column.to_string(),
            value: value.to_string(),
        }
    }

    fn body(&self) -> ErrorResponse {
        match self {
            PredictionError::UnsupportedMediaType | PredictionError::MissingFeature(_) => {
                ErrorResponse::new(self.to_string())
            }
            PredictionError::BadRequest(_) | PredictionError::InvalidValue { .. } => {
                ErrorResponse::with_message("Bad Request", self.to_string())
            }
            PredictionError::SchemaMismatch { .. }
            | PredictionError::ModelUnavailable(_)
            | PredictionError::Internal(_) => {
                ErrorResponse::with_message("Internal Server Error", self.to_string())
            }
        }
    }
}

impl ResponseError for PredictionError {
    fn status_code(&self) -> StatusCode {
        match self {
            PredictionError::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            PredictionError::MissingFeature(_)
            | PredictionError::BadRequest(_)
            | PredictionError::InvalidValue { .. } => StatusCode::BAD_REQUEST,
            PredictionError::SchemaMismatch { .. }
            | PredictionError::ModelUnavailable(_)
            | PredictionError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self.body())
    }
}
