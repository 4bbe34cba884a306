use serde_json::{Map, Value};

/// Feature name to value mapping as received from the caller
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRequest {
    fields: Map<String, Value>,
}

impl RawRequest {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.fields.get(column)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.fields.contains_key(column)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl From<Map<String, Value>> for RawRequest {
    fn from(fields: Map<String, Value>) -> Self {
        Self::new(fields)
    }
}
