use std::sync::Arc;

use futures::future::BoxFuture;
use serde_json::Value;
use tracing::{debug, warn};

use super::prompt::PromptSpec;
use crate::error::{MindflowError, Result};
use crate::llm::DynGenerationClient;
use crate::schema::Schema;

pub type FlowBody =
    Arc<dyn Fn(Value, DynGenerationClient) -> BoxFuture<'static, Result<Value>> + Send + Sync>;

/// A named, schema-typed unit of request/response logic wrapping one
/// generation call. Input is validated before the body runs; the body's
/// output is validated before it is returned. Neither check is ever
/// skipped or coerced.
#[derive(Clone)]
pub struct Flow {
    name: String,
    input_schema: Schema,
    output_schema: Schema,
    body: FlowBody,
}

impl Flow {
    pub fn new(
        name: impl Into<String>,
        input_schema: Schema,
        output_schema: Schema,
        body: FlowBody,
    ) -> Self {
        Self {
            name: name.into(),
            input_schema,
            output_schema,
            body,
        }
    }

    /// The common case: the flow body is a single prompt run. The prompt's
    /// output schema becomes the flow's output contract.
    pub fn from_prompt(input_schema: Schema, prompt: PromptSpec) -> Self {
        let name = prompt.name().to_string();
        let output_schema = prompt.output_schema().clone();
        let body: FlowBody = Arc::new(move |input, client| {
            let prompt = prompt.clone();
            Box::pin(async move { prompt.run(&client, &input).await })
        });
        Self::new(name, input_schema, output_schema, body)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn input_schema(&self) -> &Schema {
        &self.input_schema
    }

    pub fn output_schema(&self) -> &Schema {
        &self.output_schema
    }

    pub async fn invoke(&self, client: &DynGenerationClient, input: Value) -> Result<Value> {
        if let Err(violation) = self.input_schema.validate(&input) {
            warn!(flow = %self.name, error = %violation, "rejecting invalid input");
            return Err(MindflowError::Validation {
                flow: self.name.clone(),
                message: violation.message,
                path: violation.path,
            });
        }

        debug!(flow = %self.name, "invoking flow");
        let output = (self.body)(input, Arc::clone(client)).await?;

        if let Err(violation) = self.output_schema.validate(&output) {
            return Err(MindflowError::ContractViolation {
                flow: self.name.clone(),
                message: violation.message,
                path: violation.path,
            });
        }
        Ok(output)
    }
}
