// Service exports
pub mod logistic;
pub mod registry;

pub use logistic::{LogisticModel, ModelError};
pub use registry::{ModelRegistry, TierModel};
