//! The six concrete flows. Each module declares its serde IO types, the
//! input/output schemas, an embedded prompt template and one typed async
//! function, which together form the entire caller-facing API.

pub mod detect_emotion;
pub mod generate_thought;
pub mod summarize_profile;
pub mod support_chat;
pub mod transcribe_audio;
pub mod voice_emotion;

use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::{MindflowError, Result};
use crate::flow::FlowRegistry;
use anyhow::anyhow;

pub use detect_emotion::{detect_emotion, DetectEmotionInput, DetectEmotionOutput};
pub use generate_thought::{generate_thought, GenerateThoughtInput, GenerateThoughtOutput};
pub use summarize_profile::{summarize_profile, SummarizeProfileInput, SummarizeProfileOutput};
pub use support_chat::{support_chat, ChatTurn, SupportChatInput, SupportChatOutput, Tone};
pub use transcribe_audio::{transcribe_audio, TranscribeAudioInput, TranscribeAudioOutput};
pub use voice_emotion::{
    analyze_voice_emotion, VoiceEmotion, VoiceEmotionInput, VoiceEmotionResult,
};

/// Model ids forwarded to the generation backend.
pub mod models {
    pub const TEXT: &str = "googleai/gemini-2.0-flash";
    pub const MULTIMODAL: &str = "googleai/gemini-2.0-flash";
}

/// Build the registry holding all six flows.
pub fn build_registry() -> Result<FlowRegistry> {
    let mut registry = FlowRegistry::new();
    registry.register(detect_emotion::flow()?)?;
    registry.register(support_chat::flow()?)?;
    registry.register(transcribe_audio::flow()?)?;
    registry.register(generate_thought::flow()?)?;
    registry.register(summarize_profile::flow()?)?;
    registry.register(voice_emotion::flow()?)?;
    Ok(registry)
}

/// Process-wide registry for convenience callers. Library code and tests
/// should prefer taking `&FlowRegistry` so a fake table can be substituted.
pub fn default_registry() -> &'static FlowRegistry {
    static REGISTRY: Lazy<FlowRegistry> =
        Lazy::new(|| build_registry().expect("embedded flow declarations are valid"));
    &REGISTRY
}

pub(crate) fn encode_input<T: Serialize>(flow: &str, input: &T) -> Result<Value> {
    serde_json::to_value(input)
        .map_err(|e| MindflowError::Other(anyhow!("failed to encode `{}` input: {}", flow, e)))
}

pub(crate) fn decode_output<T: DeserializeOwned>(flow: &str, output: Value) -> Result<T> {
    serde_json::from_value(output).map_err(|e| MindflowError::ContractViolation {
        flow: flow.to_string(),
        message: format!("output did not fit the typed contract: {}", e),
        path: Vec::new(),
    })
}
