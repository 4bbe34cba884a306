use std::fmt::Debug;

use crate::core::assembler::ensure_schema_order;
use crate::core::rescaler::StandardScaler;
use crate::core::schema::FeatureSchema;
use crate::error::PredictionError;
use crate::models::{FeatureVector, Label};

/// A pre-trained binary classifier for one tier
///
/// Implementations are loaded once and shared read-only between workers.
pub trait Classifier: Debug + Send + Sync {
    /// Predict a label for a vector already ordered per the tier's schema
    fn predict(&self, features: &FeatureVector) -> Result<Label, PredictionError>;

    /// Standardization statistics saved at training time, if the artifact has them
    fn training_scaler(&self) -> Option<&StandardScaler> {
        None
    }
}

/// Run a classifier after confirming the vector matches the schema exactly
pub fn classify(
    classifier: &dyn Classifier,
    features: &FeatureVector,
    schema: &FeatureSchema,
) -> Result<Label, PredictionError> {
    ensure_schema_order(features, schema)?;
    classifier.predict(features)
}
