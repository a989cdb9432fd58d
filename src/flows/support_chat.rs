use serde::{Deserialize, Serialize};

use super::{decode_output, encode_input, models};
use crate::error::Result;
use crate::flow::{Flow, FlowRegistry, PromptSpec};
use crate::llm::DynGenerationClient;
use crate::schema::Schema;

pub const FLOW_NAME: &str = "support_chat";

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Professional,
    Friendly,
    Empathetic,
    Humorous,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChatTurn {
    pub user: String,
    pub bot: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportChatInput {
    pub message: String,
    pub tone: Tone,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chat_history: Option<Vec<ChatTurn>>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SupportChatOutput {
    pub response: String,
}

const TEMPLATE: &str = r#"You are a caring mental-health support companion. Reply in a {{tone}} tone.
Keep the reply short, warm and non-judgemental, and never present yourself as
a substitute for professional care.

{{#if chatHistory}}Conversation so far:
{{#each chatHistory}}User: {{user}}
Bot: {{bot}}
{{/each}}
{{/if}}User message: {{message}}

Respond with JSON only: {"response": "<your reply>"}"#;

fn input_schema() -> Schema {
    Schema::object(
        [
            ("message", Schema::string()),
            (
                "tone",
                Schema::string_enum(["professional", "friendly", "empathetic", "humorous"]),
            ),
            (
                "chatHistory",
                Schema::array(Schema::object(
                    [("user", Schema::string()), ("bot", Schema::string())],
                    &["user", "bot"],
                )),
            ),
        ],
        &["message", "tone"],
    )
    .with_name("supportChatInput")
}

fn output_schema() -> Schema {
    Schema::object([("response", Schema::string())], &["response"]).with_name("supportChatOutput")
}

pub(crate) fn flow() -> Result<Flow> {
    Ok(Flow::from_prompt(
        input_schema(),
        PromptSpec::new(FLOW_NAME, models::TEXT, TEMPLATE, output_schema())?
            .with_temperature(0.7),
    ))
}

/// Generate one supportive chat reply, optionally continuing prior turns.
pub async fn support_chat(
    registry: &FlowRegistry,
    client: &DynGenerationClient,
    input: SupportChatInput,
) -> Result<SupportChatOutput> {
    let payload = encode_input(FLOW_NAME, &input)?;
    let output = registry.invoke(FLOW_NAME, client, payload).await?;
    decode_output(FLOW_NAME, output)
}
