use crate::models::{Label, PredictionResult};

pub const LIKELY_MESSAGE: &str = "You are likely to have PCOS";
pub const UNLIKELY_MESSAGE: &str = "You are unlikely to have PCOS";

/// Map a classifier label to the message returned to the caller
pub fn format_prediction(label: Label) -> PredictionResult {
    let message = match label {
        Label::Likely => LIKELY_MESSAGE,
        Label::Unlikely => UNLIKELY_MESSAGE,
    };
    PredictionResult { label, message }
}
