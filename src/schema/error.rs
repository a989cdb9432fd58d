use thiserror::Error;

/// A value failed to match a declared schema. `path` names the offending
/// field from the root of the validated value.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct SchemaViolation {
    pub message: String,
    pub path: Vec<String>,
}

impl SchemaViolation {
    pub fn new(message: impl Into<String>, path: Vec<String>) -> Self {
        Self {
            message: message.into(),
            path,
        }
    }
}
