use crate::core::{
    assembler::{assemble, collect_categorical},
    classifier::{classify, Classifier},
    formatter::format_prediction,
    rescaler::{collect_numeric, rescale, ScalingMode},
    schema::FeatureSchema,
    validator::validate,
};
use crate::error::PredictionError;
use crate::models::{PredictionResult, RawRequest, Tier};

/// Prediction orchestrator - runs one request through the tier pipeline
///
/// # Pipeline Stages
/// 1. Validate required columns
/// 2. Rescale numeric columns
/// 3. Assemble the model-ordered feature vector
/// 4. Classify
/// 5. Format the label as a message
///
/// Holds no per-request state, so one instance serves every worker.
#[derive(Debug, Clone, Copy, Default)]
pub struct Predictor {
    scaling: ScalingMode,
}

impl Predictor {
    pub fn new(scaling: ScalingMode) -> Self {
        Self { scaling }
    }

    pub fn scaling(&self) -> ScalingMode {
        self.scaling
    }

    /// Predict for one request
    ///
    /// Any stage failure is returned immediately; later stages do not run.
    /// `classifier` is `None` when the tier's model never loaded; that only
    /// fails the request once a stage needs the model, so malformed requests
    /// still get their validation error.
    pub fn predict(
        &self,
        tier: Tier,
        request: &RawRequest,
        classifier: Option<&dyn Classifier>,
    ) -> Result<PredictionResult, PredictionError> {
        let require_model = || {
            classifier.ok_or_else(|| {
                tracing::error!("Model for the {} tier is unavailable", tier);
                PredictionError::ModelUnavailable(tier)
            })
        };

        let schema = FeatureSchema::for_tier(tier);

        // Stage 1: presence of every required column
        validate(request, schema)?;

        // Stage 2: numeric columns, standardized
        let numeric = collect_numeric(request, schema)?;
        let persisted = match self.scaling {
            ScalingMode::PerRequest => None,
            ScalingMode::Persisted => Some(require_model()?.training_scaler().ok_or_else(|| {
                PredictionError::Internal(format!("no training scaler for the {} model", tier))
            })?),
        };
        let scaled = rescale(&numeric, persisted)?;

        // Stage 3: categorical codes interleaved in model order
        let categorical = collect_categorical(request, schema)?;
        let features = assemble(schema, &scaled, &categorical)?;

        // Stage 4 & 5
        let label = classify(require_model()?, &features, schema)?;
        tracing::debug!("{} model returned label {}", tier, label.as_u8());

        Ok(format_prediction(label))
    }
}
