// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{FeatureVector, Label, PredictionResult, Tier};
pub use requests::RawRequest;
pub use responses::{ErrorResponse, HealthResponse, PredictionResponse, TierHealth};
