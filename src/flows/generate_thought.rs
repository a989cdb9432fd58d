use serde::{Deserialize, Serialize};

use super::{decode_output, encode_input, models};
use crate::error::Result;
use crate::flow::{Flow, FlowRegistry, PromptSpec};
use crate::llm::DynGenerationClient;
use crate::schema::Schema;

pub const FLOW_NAME: &str = "generate_thought";

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateThoughtInput {
    pub topic: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_thoughts: Option<Vec<String>>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerateThoughtOutput {
    pub thought: String,
    pub is_helpful: bool,
}

const TEMPLATE: &str = r#"You are writing a single first-person thought for a cognitive-behavioural
"thought challenge" game about {{topic}}.
The thought must read naturally and be either clearly helpful or clearly
unhelpful thinking, so a player can tell which it is.
{{#if previousThoughts}}Do not repeat any of these thoughts:
{{#each previousThoughts}}- {{this}}
{{/each}}
{{/if}}
Respond with JSON only: {"thought": "<the thought>", "isHelpful": <true or false>}"#;

fn input_schema() -> Schema {
    Schema::object(
        [
            ("topic", Schema::string()),
            ("previousThoughts", Schema::array(Schema::string())),
        ],
        &["topic"],
    )
    .with_name("generateThoughtInput")
}

fn output_schema() -> Schema {
    Schema::object(
        [
            ("thought", Schema::string()),
            ("isHelpful", Schema::boolean()),
        ],
        &["thought", "isHelpful"],
    )
    .with_name("generateThoughtOutput")
}

pub(crate) fn flow() -> Result<Flow> {
    Ok(Flow::from_prompt(
        input_schema(),
        PromptSpec::new(FLOW_NAME, models::TEXT, TEMPLATE, output_schema())?
            .with_temperature(0.9),
    ))
}

/// Generate one helpful-or-unhelpful thought for the CBT game.
pub async fn generate_thought(
    registry: &FlowRegistry,
    client: &DynGenerationClient,
    input: GenerateThoughtInput,
) -> Result<GenerateThoughtOutput> {
    let payload = encode_input(FLOW_NAME, &input)?;
    let output = registry.invoke(FLOW_NAME, client, payload).await?;
    decode_output(FLOW_NAME, output)
}
