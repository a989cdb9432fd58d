use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::schema::Schema;

/// One part of a generation request. Media payloads (base64 data URIs) are
/// carried as a separate part rather than inlined into the prompt text.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PromptPart {
    Text { text: String },
    Media { url: String },
}

impl PromptPart {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn media(url: impl Into<String>) -> Self {
        Self::Media { url: url.into() }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub model: String,
    pub parts: Vec<PromptPart>,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Schema hint forwarded to backends that support structured output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<Schema>,
}

pub(crate) fn default_temperature() -> f32 {
    0.2
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GenerationResponse {
    pub content: String,
    #[serde(default)]
    pub metadata: Option<Value>,
}
