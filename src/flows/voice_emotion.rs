use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::warn;

use super::{decode_output, encode_input, models};
use crate::error::{MindflowError, Result};
use crate::flow::{Flow, FlowBody, FlowRegistry, PromptSpec};
use crate::llm::DynGenerationClient;
use crate::schema::Schema;

pub const FLOW_NAME: &str = "analyze_voice_emotion";

/// User-facing message for the recoverable busy case; the UI renders a retry
/// affordance around it.
pub const BUSY_MESSAGE: &str =
    "The voice analysis service is busy right now. Please try again in a moment.";

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum VoiceEmotion {
    Normal,
    Stressed,
    Sad,
    Anxious,
    Happy,
    Joyful,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceEmotionInput {
    /// Base64 data URI with MIME type, e.g. `data:audio/webm;base64,...`.
    pub audio_data_uri: String,
}

/// Result of voice analysis. Serialized untagged, so on the wire the
/// discriminant is the presence of the `error` field; in Rust the match is
/// exhaustive.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum VoiceEmotionResult {
    Analysis {
        emotion: VoiceEmotion,
        confidence: f64,
        explanation: String,
    },
    Busy {
        error: String,
    },
}

const TEMPLATE: &str = r#"Listen to the attached voice recording and assess the speaker's emotional
state from their tone, pace and delivery, not just the words.
Pick exactly one emotion label from: normal, stressed, sad, anxious, happy, joyful.

Respond with JSON only:
{"emotion": "<label>", "confidence": <number between 0 and 1>, "explanation": "<one or two sentences>"}"#;

fn input_schema() -> Schema {
    Schema::object([("audioDataUri", Schema::string())], &["audioDataUri"])
        .with_name("voiceEmotionInput")
}

fn output_schema() -> Schema {
    Schema::union([
        Schema::object(
            [
                (
                    "emotion",
                    Schema::string_enum(["normal", "stressed", "sad", "anxious", "happy", "joyful"]),
                ),
                ("confidence", Schema::number_range(0.0, 1.0)),
                ("explanation", Schema::string()),
            ],
            &["emotion", "confidence", "explanation"],
        ),
        Schema::object([("error", Schema::string())], &["error"]),
    ])
    .with_name("voiceEmotionResult")
}

/// A transport fault whose text carries a 503 is treated as "service busy".
/// Only transport-class errors qualify; validation and contract errors are
/// never downgraded to data.
// TODO: replace the "503" substring check with a structured status code once
// GenerationClient surfaces one.
fn is_service_busy(error: &MindflowError) -> bool {
    match error {
        MindflowError::Other(inner) => format!("{:#}", inner).contains("503"),
        _ => false,
    }
}

pub(crate) fn flow() -> Result<Flow> {
    let prompt = PromptSpec::new(FLOW_NAME, models::MULTIMODAL, TEMPLATE, output_schema())?
        .with_media_field("audioDataUri");

    let body: FlowBody = Arc::new(move |input, client| {
        let prompt = prompt.clone();
        Box::pin(async move {
            match prompt.run(&client, &input).await {
                Ok(value) => Ok(value),
                Err(error) if is_service_busy(&error) => {
                    warn!(flow = FLOW_NAME, error = %error, "backend busy, returning recoverable result");
                    Ok(json!({ "error": BUSY_MESSAGE }))
                }
                Err(error) => Err(error),
            }
        })
    });

    Ok(Flow::new(FLOW_NAME, input_schema(), output_schema(), body))
}

/// Analyze the speaker's emotional state from a voice recording. A busy
/// backend resolves to [`VoiceEmotionResult::Busy`]; all other failures
/// propagate as errors.
pub async fn analyze_voice_emotion(
    registry: &FlowRegistry,
    client: &DynGenerationClient,
    input: VoiceEmotionInput,
) -> Result<VoiceEmotionResult> {
    let payload = encode_input(FLOW_NAME, &input)?;
    let output = registry.invoke(FLOW_NAME, client, payload).await?;
    decode_output(FLOW_NAME, output)
}
