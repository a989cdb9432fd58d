pub mod error;
pub mod flow;
pub mod flows;
pub mod llm;
pub mod schema;
pub mod utils;

pub use error::{MindflowError, Result};
pub use flow::{Flow, FlowBody, FlowCatalogEntry, FlowRegistry, PromptSpec, PromptTemplate};
pub use flows::{
    analyze_voice_emotion, build_registry, default_registry, detect_emotion, generate_thought,
    summarize_profile, support_chat, transcribe_audio, ChatTurn, DetectEmotionInput,
    DetectEmotionOutput, GenerateThoughtInput, GenerateThoughtOutput, SummarizeProfileInput,
    SummarizeProfileOutput, SupportChatInput, SupportChatOutput, Tone, TranscribeAudioInput,
    TranscribeAudioOutput, VoiceEmotion, VoiceEmotionInput, VoiceEmotionResult,
};
#[cfg(feature = "http-client")]
pub use llm::GenericHttpClient;
pub use llm::{
    DynGenerationClient, GenerationClient, GenerationRequest, GenerationResponse, PromptPart,
};
pub use schema::{Schema, SchemaKind, SchemaViolation};
pub use utils::logging::LoggingConfig;
