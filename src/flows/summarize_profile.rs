use serde::{Deserialize, Serialize};

use super::{decode_output, encode_input, models};
use crate::error::Result;
use crate::flow::{Flow, FlowRegistry, PromptSpec};
use crate::llm::DynGenerationClient;
use crate::schema::Schema;

pub const FLOW_NAME: &str = "summarize_profile";

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummarizeProfileInput {
    /// Session summaries, oldest first.
    pub all_session_summaries: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_user_profile: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SummarizeProfileOutput {
    pub user_profile: String,
}

const TEMPLATE: &str = r#"You maintain a rolling wellbeing profile for a single user.
{{#if previousUserProfile}}Existing profile to refine:
{{previousUserProfile}}

{{/if}}Session summaries, oldest first:
{{#each allSessionSummaries}}- {{this}}
{{/each}}
Merge these into one concise updated profile covering recurring themes,
mood trends and coping strategies that seem to work for this user.

Respond with JSON only: {"userProfile": "<updated profile>"}"#;

fn input_schema() -> Schema {
    Schema::object(
        [
            ("allSessionSummaries", Schema::array(Schema::string())),
            ("previousUserProfile", Schema::string()),
        ],
        &["allSessionSummaries"],
    )
    .with_name("summarizeProfileInput")
}

fn output_schema() -> Schema {
    Schema::object([("userProfile", Schema::string())], &["userProfile"])
        .with_name("summarizeProfileOutput")
}

pub(crate) fn flow() -> Result<Flow> {
    Ok(Flow::from_prompt(
        input_schema(),
        PromptSpec::new(FLOW_NAME, models::TEXT, TEMPLATE, output_schema())?,
    ))
}

/// Refine the rolling user profile from accumulated session summaries.
pub async fn summarize_profile(
    registry: &FlowRegistry,
    client: &DynGenerationClient,
    input: SummarizeProfileInput,
) -> Result<SummarizeProfileOutput> {
    let payload = encode_input(FLOW_NAME, &input)?;
    let output = registry.invoke(FLOW_NAME, client, payload).await?;
    decode_output(FLOW_NAME, output)
}
