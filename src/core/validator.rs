use serde_json::Value;

use crate::core::schema::FeatureSchema;
use crate::error::PredictionError;
use crate::models::RawRequest;

/// Check that a `Content-Type` header declares JSON
///
/// Accepts `application/json` and structured suffixes such as
/// `application/problem+json`. Parameters (`charset=...`) are ignored.
pub fn ensure_json(content_type: Option<&str>) -> Result<(), PredictionError> {
    let Some(content_type) = content_type else {
        return Err(PredictionError::UnsupportedMediaType);
    };

    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    let is_json = essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"));

    if is_json {
        Ok(())
    } else {
        Err(PredictionError::UnsupportedMediaType)
    }
}

/// Decode a request body into a [`RawRequest`]
///
/// The body must be a single JSON object.
pub fn parse_body(body: &[u8]) -> Result<RawRequest, PredictionError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| PredictionError::BadRequest(format!("Failed to decode JSON object: {}", e)))?;

    match value {
        Value::Object(fields) => Ok(RawRequest::new(fields)),
        other => Err(PredictionError::BadRequest(format!(
            "Expected a JSON object of features, got {}",
            json_kind(&other)
        ))),
    }
}

/// Confirm every required column is present
///
/// Numeric columns are checked before categorical ones, each in schema
/// order, and the first absent column is reported.
pub fn validate(request: &RawRequest, schema: &FeatureSchema) -> Result<(), PredictionError> {
    tracing::debug!(
        "Validating {} fields against {} schema {}",
        request.len(),
        schema.tier,
        schema.version
    );

    for column in schema.required() {
        if !request.contains(column) {
            let kind = if schema.is_numeric(column) { "numerical" } else { "categorical" };
            tracing::error!("Missing {} feature: {}", kind, column);
            return Err(PredictionError::MissingFeature(column.to_string()));
        }
    }

    Ok(())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
