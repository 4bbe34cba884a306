use serde::{Deserialize, Serialize};
use std::fmt;

/// Prediction pathway, each with its own schema and model artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// General-public survey features
    Simple,
    /// Scan and lab-panel features
    Enhanced,
}

impl Tier {
    pub const ALL: [Tier; 2] = [Tier::Simple, Tier::Enhanced];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Simple => "simple",
            Tier::Enhanced => "enhanced",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered feature values ready for a classifier
///
/// Columns and values are kept side by side so the order handed to the
/// model can always be checked against the schema it was built for.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    columns: Vec<&'static str>,
    values: Vec<f64>,
}

impl FeatureVector {
    pub(crate) fn from_parts(columns: Vec<&'static str>, values: Vec<f64>) -> Self {
        debug_assert_eq!(columns.len(), values.len());
        Self { columns, values }
    }

    pub fn columns(&self) -> &[&'static str] {
        &self.columns
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value for a named column, if present
    pub fn get(&self, column: &str) -> Option<f64> {
        self.columns
            .iter()
            .position(|c| *c == column)
            .map(|i| self.values[i])
    }
}

/// Binary classifier output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    Unlikely = 0,
    Likely = 1,
}

impl Label {
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl From<bool> for Label {
    fn from(positive: bool) -> Self {
        if positive { Label::Likely } else { Label::Unlikely }
    }
}

/// Label together with the message shown to the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictionResult {
    pub label: Label,
    pub message: &'static str,
}
