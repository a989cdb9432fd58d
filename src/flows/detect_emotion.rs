use serde::{Deserialize, Serialize};

use super::{decode_output, encode_input, models};
use crate::error::Result;
use crate::flow::{Flow, FlowRegistry, PromptSpec};
use crate::llm::DynGenerationClient;
use crate::schema::Schema;

pub const FLOW_NAME: &str = "detect_emotion";

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectEmotionInput {
    pub text: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DetectEmotionOutput {
    pub emotion: String,
    pub confidence: f64,
}

const TEMPLATE: &str = r#"You are an expert at reading the emotional tone of short journal entries.
Classify the dominant emotion of the text below and estimate your confidence.

Text:
{{text}}

Respond with JSON only: {"emotion": "<one word>", "confidence": <number between 0 and 1>}"#;

fn input_schema() -> Schema {
    Schema::object([("text", Schema::string())], &["text"]).with_name("detectEmotionInput")
}

fn output_schema() -> Schema {
    Schema::object(
        [
            ("emotion", Schema::string()),
            ("confidence", Schema::number_range(0.0, 1.0)),
        ],
        &["emotion", "confidence"],
    )
    .with_name("detectEmotionOutput")
}

pub(crate) fn flow() -> Result<Flow> {
    Ok(Flow::from_prompt(
        input_schema(),
        PromptSpec::new(FLOW_NAME, models::TEXT, TEMPLATE, output_schema())?,
    ))
}

/// Classify the dominant emotion of a piece of text.
pub async fn detect_emotion(
    registry: &FlowRegistry,
    client: &DynGenerationClient,
    input: DetectEmotionInput,
) -> Result<DetectEmotionOutput> {
    let payload = encode_input(FLOW_NAME, &input)?;
    let output = registry.invoke(FLOW_NAME, client, payload).await?;
    decode_output(FLOW_NAME, output)
}
