use serde::{Deserialize, Serialize};

use super::{decode_output, encode_input, models};
use crate::error::Result;
use crate::flow::{Flow, FlowRegistry, PromptSpec};
use crate::llm::DynGenerationClient;
use crate::schema::Schema;

pub const FLOW_NAME: &str = "transcribe_audio";

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscribeAudioInput {
    /// Base64 data URI with MIME type, e.g. `data:audio/webm;base64,...`.
    pub audio_data_uri: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TranscribeAudioOutput {
    pub transcription: String,
}

const TEMPLATE: &str = r#"Transcribe the attached audio recording verbatim.
Do not add punctuation the speaker did not produce, and do not summarize.

Respond with JSON only: {"transcription": "<the transcription>"}"#;

fn input_schema() -> Schema {
    Schema::object([("audioDataUri", Schema::string())], &["audioDataUri"])
        .with_name("transcribeAudioInput")
}

fn output_schema() -> Schema {
    Schema::object([("transcription", Schema::string())], &["transcription"])
        .with_name("transcribeAudioOutput")
}

pub(crate) fn flow() -> Result<Flow> {
    Ok(Flow::from_prompt(
        input_schema(),
        PromptSpec::new(FLOW_NAME, models::MULTIMODAL, TEMPLATE, output_schema())?
            .with_media_field("audioDataUri"),
    ))
}

/// Transcribe a recorded audio clip.
pub async fn transcribe_audio(
    registry: &FlowRegistry,
    client: &DynGenerationClient,
    input: TranscribeAudioInput,
) -> Result<TranscribeAudioOutput> {
    let payload = encode_input(FLOW_NAME, &input)?;
    let output = registry.invoke(FLOW_NAME, client, payload).await?;
    decode_output(FLOW_NAME, output)
}
