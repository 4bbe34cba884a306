// Core pipeline exports
pub mod assembler;
pub mod classifier;
pub mod formatter;
pub mod predictor;
pub mod rescaler;
pub mod schema;
pub mod validator;

pub use assembler::{assemble, categorical_code, ensure_schema_order};
pub use classifier::{classify, Classifier};
pub use formatter::{format_prediction, LIKELY_MESSAGE, UNLIKELY_MESSAGE};
pub use predictor::Predictor;
pub use rescaler::{rescale, ScalingMode, StandardScaler};
pub use schema::{FeatureSchema, ENHANCED_SCHEMA, SIMPLE_SCHEMA};
pub use validator::{ensure_json, parse_body, validate};
