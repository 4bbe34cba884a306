use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Response for both prediction endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub prediction: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    /// Load state per tier, keyed by tier name
    pub tiers: BTreeMap<String, TierHealth>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TierHealth {
    pub available: bool,
    /// Load failure, present only when the tier is unavailable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Error response
///
/// `message` is omitted for errors that carry their whole meaning in `error`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: None,
        }
    }

    pub fn with_message(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: Some(message.into()),
        }
    }
}
