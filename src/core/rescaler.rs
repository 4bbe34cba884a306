use serde::Deserialize;
use serde_json::Value;

use crate::core::schema::FeatureSchema;
use crate::error::PredictionError;
use crate::models::RawRequest;

/// Where the standardization statistics come from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalingMode {
    /// Fit mean and variance on the request's own numeric values.
    ///
    /// With a single row every column has zero variance, so each value is
    /// centered to exactly `0.0`. Kept as the default to reproduce the
    /// deployed behavior.
    #[default]
    PerRequest,
    /// Use the mean and scale stored with the model artifact
    Persisted,
}

/// Per-column standardization: `(x - mean) / scale`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl StandardScaler {
    /// Fit on a set of rows, using population variance
    ///
    /// Columns with (near) zero variance get a scale of 1 so they are
    /// centered but not divided by zero.
    pub fn fit(rows: &[Vec<f64>]) -> Self {
        let width = rows.first().map(Vec::len).unwrap_or(0);
        let n = rows.len().max(1) as f64;

        let mean: Vec<f64> = (0..width)
            .map(|j| rows.iter().map(|row| row[j]).sum::<f64>() / n)
            .collect();

        let scale = (0..width)
            .map(|j| {
                let var = rows.iter().map(|row| (row[j] - mean[j]).powi(2)).sum::<f64>() / n;
                let std = var.sqrt();
                if std <= 10.0 * f64::EPSILON * mean[j].abs().max(1.0) {
                    1.0
                } else {
                    std
                }
            })
            .collect();

        Self { mean, scale }
    }

    pub fn transform(&self, row: &[f64]) -> Vec<f64> {
        row.iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(x, (mean, scale))| (x - mean) / scale)
            .collect()
    }

    pub fn width(&self) -> usize {
        self.mean.len()
    }

    pub fn is_finite(&self) -> bool {
        self.mean.iter().chain(&self.scale).all(|v| v.is_finite())
            && self.scale.iter().all(|s| *s != 0.0)
    }
}

/// Read a numeric column value
///
/// JSON numbers are taken as-is and strings must parse to a finite number.
pub fn numeric_value(column: &str, value: &Value) -> Result<f64, PredictionError> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    parsed
        .filter(|v| v.is_finite())
        .ok_or_else(|| PredictionError::invalid_value(column, value))
}

/// Numeric columns of a validated request, in schema order
pub fn collect_numeric(request: &RawRequest, schema: &FeatureSchema) -> Result<Vec<f64>, PredictionError> {
    schema
        .numeric
        .iter()
        .map(|column| {
            let value = request
                .get(column)
                .ok_or_else(|| PredictionError::MissingFeature(column.to_string()))?;
            numeric_value(column, value)
        })
        .collect()
}

/// Standardize numeric values
///
/// Without persisted statistics the scaler is fitted on `values` alone.
pub fn rescale(values: &[f64], persisted: Option<&StandardScaler>) -> Result<Vec<f64>, PredictionError> {
    match persisted {
        Some(scaler) if scaler.width() != values.len() => Err(PredictionError::Internal(format!(
            "scaler expects {} numeric columns, got {}",
            scaler.width(),
            values.len()
        ))),
        Some(scaler) => Ok(scaler.transform(values)),
        None => Ok(StandardScaler::fit(&[values.to_vec()]).transform(values)),
    }
}
