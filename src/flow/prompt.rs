use serde_json::Value;
use tracing::debug;

use super::template::PromptTemplate;
use crate::error::{MindflowError, Result};
use crate::llm::{DynGenerationClient, GenerationRequest, PromptPart};
use crate::schema::Schema;
use crate::utils::media;

/// A named prompt: template, model id, optional media binding and the output
/// schema the backend reply must parse against. One `run` performs exactly
/// one generation call.
#[derive(Clone)]
pub struct PromptSpec {
    name: String,
    model: String,
    template: PromptTemplate,
    output_schema: Schema,
    media_field: Option<String>,
    temperature: f32,
}

impl PromptSpec {
    pub fn new(
        name: impl Into<String>,
        model: impl Into<String>,
        template: &str,
        output_schema: Schema,
    ) -> Result<Self> {
        Ok(Self {
            name: name.into(),
            model: model.into(),
            template: PromptTemplate::parse(template)?,
            output_schema,
            media_field: None,
            temperature: crate::llm::types::default_temperature(),
        })
    }

    /// Name an input field holding a base64 data URI to attach as a media
    /// part instead of inlining it into the prompt text.
    pub fn with_media_field(mut self, field: impl Into<String>) -> Self {
        self.media_field = Some(field.into());
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn output_schema(&self) -> &Schema {
        &self.output_schema
    }

    /// Render the template against already-validated input, send it (plus any
    /// media part) to the backend and parse the reply as JSON. A reply that
    /// does not parse is a contract violation by the backend.
    pub async fn run(&self, client: &DynGenerationClient, input: &Value) -> Result<Value> {
        let text = self.template.render(input);
        let mut parts = vec![PromptPart::text(text)];

        if let Some(field) = &self.media_field {
            let uri = input
                .get(field)
                .and_then(Value::as_str)
                .ok_or_else(|| {
                    MindflowError::Media(format!("field `{}` holds no data URI", field))
                })?;
            media::parse_data_uri(uri)?;
            parts.push(PromptPart::media(uri));
        }

        debug!(prompt = %self.name, model = %self.model, "sending generation request");
        let request = GenerationRequest {
            model: self.model.clone(),
            parts,
            temperature: self.temperature,
            response_schema: Some(self.output_schema.clone()),
        };
        let response = client.generate(request).await?;

        let cleaned = clean_response(&response.content);
        serde_json::from_str(cleaned).map_err(|e| MindflowError::ContractViolation {
            flow: self.name.clone(),
            message: format!("backend reply is not valid JSON: {}", e),
            path: Vec::new(),
        })
    }
}

/// Extract the JSON payload from a reply that may be wrapped in a markdown
/// code fence.
fn clean_response(response: &str) -> &str {
    let trimmed = response.trim();
    for fence in ["```json", "```"] {
        if let Some(start) = trimmed.find(fence) {
            let body_start = start + fence.len();
            if let Some(end) = trimmed[body_start..].find("```") {
                return trimmed[body_start..body_start + end].trim();
            }
        }
    }
    trimmed
}
