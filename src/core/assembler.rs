use serde_json::Value;
use std::collections::HashMap;

use crate::core::schema::FeatureSchema;
use crate::error::PredictionError;
use crate::models::{FeatureVector, RawRequest};

/// Encode a categorical code as a number
///
/// Codes arrive as numbers (`15` for a blood group), numeric strings,
/// booleans, or `"Y"`/`"N"` flags.
pub fn categorical_code(column: &str, value: &Value) -> Result<f64, PredictionError> {
    let code = match value {
        Value::Number(n) => n.as_f64(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::String(s) => {
            let s = s.trim();
            if s.eq_ignore_ascii_case("y") {
                Some(1.0)
            } else if s.eq_ignore_ascii_case("n") {
                Some(0.0)
            } else {
                s.parse::<f64>().ok()
            }
        }
        _ => None,
    };

    code.filter(|v| v.is_finite())
        .ok_or_else(|| PredictionError::invalid_value(column, value))
}

/// Categorical columns of a validated request, in schema order
pub fn collect_categorical(request: &RawRequest, schema: &FeatureSchema) -> Result<Vec<f64>, PredictionError> {
    schema
        .categorical
        .iter()
        .map(|column| {
            let value = request
                .get(column)
                .ok_or_else(|| PredictionError::MissingFeature(column.to_string()))?;
            categorical_code(column, value)
        })
        .collect()
}

/// Interleave rescaled numeric and categorical values into the classifier's column order
pub fn assemble(
    schema: &FeatureSchema,
    numeric: &[f64],
    categorical: &[f64],
) -> Result<FeatureVector, PredictionError> {
    if numeric.len() != schema.numeric.len() || categorical.len() != schema.categorical.len() {
        return Err(PredictionError::SchemaMismatch {
            tier: schema.tier,
            detail: format!(
                "got {} numeric and {} categorical values, expected {} and {}",
                numeric.len(),
                categorical.len(),
                schema.numeric.len(),
                schema.categorical.len()
            ),
        });
    }

    let by_column: HashMap<&str, f64> = schema
        .numeric
        .iter()
        .copied()
        .zip(numeric.iter().copied())
        .chain(schema.categorical.iter().copied().zip(categorical.iter().copied()))
        .collect();

    let values = schema
        .full
        .iter()
        .map(|column| {
            by_column.get(column).copied().ok_or_else(|| PredictionError::SchemaMismatch {
                tier: schema.tier,
                detail: format!("no value for column '{}'", column),
            })
        })
        .collect::<Result<Vec<f64>, _>>()?;

    let vector = FeatureVector::from_parts(schema.full.to_vec(), values);
    ensure_schema_order(&vector, schema)?;
    Ok(vector)
}

/// Reject a vector whose columns differ from the schema's full order in count or position
pub fn ensure_schema_order(vector: &FeatureVector, schema: &FeatureSchema) -> Result<(), PredictionError> {
    if vector.columns() == schema.full {
        return Ok(());
    }

    let detail = match vector
        .columns()
        .iter()
        .zip(schema.full)
        .position(|(got, expected)| got != expected)
    {
        Some(i) => format!(
            "column {} is '{}', expected '{}'",
            i,
            vector.columns()[i],
            schema.full[i]
        ),
        None => format!(
            "got {} columns, expected {}",
            vector.len(),
            schema.full.len()
        ),
    };

    Err(PredictionError::SchemaMismatch {
        tier: schema.tier,
        detail,
    })
}
