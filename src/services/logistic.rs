use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use crate::core::{Classifier, FeatureSchema, ScalingMode, StandardScaler};
use crate::error::PredictionError;
use crate::models::{FeatureVector, Label, Tier};

/// Errors that can occur when loading a model artifact
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to read model file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse model JSON: {0}")]
    ParseJson(#[from] serde_json::Error),

    #[error("artifact was exported for the {found} tier, expected {expected}")]
    WrongTier { expected: Tier, found: Tier },

    #[error("feature order differs from the {tier} schema at position {index}: '{found}' != '{expected}'")]
    FeatureOrder {
        tier: Tier,
        index: usize,
        expected: String,
        found: String,
    },

    #[error("expected {expected} {what}, got {got}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("non-finite value in {0}")]
    NonFinite(&'static str),

    #[error("threshold {0} is outside [0, 1]")]
    InvalidThreshold(f64),

    #[error("persisted scaling requested but the artifact has no scaler statistics")]
    MissingScaler,
}

/// Logistic-regression classifier exported from training as JSON
///
/// ```json
/// {
///   "model_id": "best_logistic_reg_simple_smote",
///   "tier": "simple",
///   "feature_names": [" Age (yrs)", "Weight (Kg)", "..."],
///   "coefficients": [0.12, -0.4, "..."],
///   "intercept": -0.31,
///   "threshold": 0.5,
///   "scaler": { "mean": ["..."], "scale": ["..."] }
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct LogisticModel {
    pub model_id: String,
    pub tier: Tier,
    /// Must equal the tier schema's full column order
    pub feature_names: Vec<String>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    /// Training-time statistics for the tier's numeric columns
    #[serde(default)]
    pub scaler: Option<StandardScaler>,
}

fn default_threshold() -> f64 { 0.5 }

impl LogisticModel {
    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read, parse and validate an artifact for `tier`
    pub async fn load<P: AsRef<Path>>(path: P, tier: Tier, scaling: ScalingMode) -> Result<Self, ModelError> {
        let json = tokio::fs::read_to_string(path.as_ref()).await?;
        let model = Self::from_json(&json)?;
        model.validate(tier, scaling)?;
        Ok(model)
    }

    /// Check the artifact is usable for `tier` under the given scaling mode
    pub fn validate(&self, tier: Tier, scaling: ScalingMode) -> Result<(), ModelError> {
        if self.tier != tier {
            return Err(ModelError::WrongTier { expected: tier, found: self.tier });
        }

        let schema = FeatureSchema::for_tier(tier);
        if self.feature_names.len() != schema.full.len() {
            return Err(ModelError::DimensionMismatch {
                what: "feature names",
                expected: schema.full.len(),
                got: self.feature_names.len(),
            });
        }
        if let Some((index, (found, expected))) = self
            .feature_names
            .iter()
            .zip(schema.full)
            .enumerate()
            .find(|(_, (found, expected))| found.as_str() != **expected)
        {
            return Err(ModelError::FeatureOrder {
                tier,
                index,
                expected: expected.to_string(),
                found: found.clone(),
            });
        }

        if self.coefficients.len() != schema.full.len() {
            return Err(ModelError::DimensionMismatch {
                what: "coefficients",
                expected: schema.full.len(),
                got: self.coefficients.len(),
            });
        }
        if !self.coefficients.iter().all(|w| w.is_finite()) {
            return Err(ModelError::NonFinite("coefficients"));
        }
        if !self.intercept.is_finite() {
            return Err(ModelError::NonFinite("intercept"));
        }
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(ModelError::InvalidThreshold(self.threshold));
        }

        match (&self.scaler, scaling) {
            (None, ScalingMode::Persisted) => return Err(ModelError::MissingScaler),
            (Some(scaler), _) => {
                if scaler.mean.len() != schema.numeric.len() || scaler.scale.len() != schema.numeric.len() {
                    return Err(ModelError::DimensionMismatch {
                        what: "scaler entries",
                        expected: schema.numeric.len(),
                        got: scaler.mean.len().min(scaler.scale.len()),
                    });
                }
                if !scaler.is_finite() {
                    return Err(ModelError::NonFinite("scaler"));
                }
            }
            (None, ScalingMode::PerRequest) => {}
        }

        Ok(())
    }

    /// Probability of the positive class
    pub fn probability(&self, features: &FeatureVector) -> f64 {
        let z = self
            .coefficients
            .iter()
            .zip(features.values())
            .map(|(w, x)| w * x)
            .sum::<f64>()
            + self.intercept;
        sigmoid(z)
    }
}

impl Classifier for LogisticModel {
    fn predict(&self, features: &FeatureVector) -> Result<Label, PredictionError> {
        if features.len() != self.coefficients.len() {
            return Err(PredictionError::SchemaMismatch {
                tier: self.tier,
                detail: format!(
                    "model {} takes {} features, got {}",
                    self.model_id,
                    self.coefficients.len(),
                    features.len()
                ),
            });
        }

        let p = self.probability(features);
        Ok(Label::from(p >= self.threshold))
    }

    fn training_scaler(&self) -> Option<&StandardScaler> {
        self.scaler.as_ref()
    }
}

fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let ez = z.exp();
        ez / (1.0 + ez)
    }
}
