//! PCOS risk prediction service
//!
//! Serves two pre-trained logistic-regression classifiers over HTTP. Each
//! request is validated against a fixed per-tier column schema, its numeric
//! columns are standardized, and the reassembled feature vector is
//! classified into one of two messages.

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{Classifier, FeatureSchema, Predictor, ScalingMode};
pub use error::PredictionError;
pub use models::{FeatureVector, Label, PredictionResult, RawRequest, Tier};
pub use services::{LogisticModel, ModelRegistry};
