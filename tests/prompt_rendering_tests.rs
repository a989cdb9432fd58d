use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use mindflow::{
    build_registry, DynGenerationClient, GenerationClient, GenerationRequest, GenerationResponse,
    PromptPart,
};
use serde_json::{json, Value};

/// Backend stub that records every request it receives.
struct RecordingClient {
    requests: Mutex<Vec<GenerationRequest>>,
    content: String,
}

impl RecordingClient {
    fn replying_json(value: Value) -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            content: value.to_string(),
        })
    }

    fn sent_text(&self) -> String {
        let requests = self.requests.lock().unwrap();
        let request = requests.last().expect("no request was sent");
        request
            .parts
            .iter()
            .filter_map(|part| match part {
                PromptPart::Text { text } => Some(text.clone()),
                PromptPart::Media { .. } => None,
            })
            .collect()
    }

    fn sent_media(&self) -> Vec<String> {
        let requests = self.requests.lock().unwrap();
        let request = requests.last().expect("no request was sent");
        request
            .parts
            .iter()
            .filter_map(|part| match part {
                PromptPart::Media { url } => Some(url.clone()),
                PromptPart::Text { .. } => None,
            })
            .collect()
    }
}

#[async_trait]
impl GenerationClient for RecordingClient {
    async fn generate(&self, request: GenerationRequest) -> mindflow::Result<GenerationResponse> {
        self.requests.lock().unwrap().push(request);
        Ok(GenerationResponse {
            content: self.content.clone(),
            metadata: None,
        })
    }
}

#[tokio::test]
async fn chat_history_renders_one_block_per_turn_in_order() {
    let registry = build_registry().unwrap();
    let mock = RecordingClient::replying_json(json!({"response": "ok"}));
    let client: DynGenerationClient = mock.clone();

    registry
        .invoke(
            "support_chat",
            &client,
            json!({
                "message": "anything",
                "tone": "friendly",
                "chatHistory": [
                    {"user": "hi", "bot": "hello"},
                    {"user": "bye", "bot": "goodbye"}
                ]
            }),
        )
        .await
        .unwrap();

    let text = mock.sent_text();
    assert_eq!(text.matches("User: ").count(), 2);
    assert_eq!(text.matches("Bot: ").count(), 2);
    let first = text.find("User: hi\nBot: hello").unwrap();
    let second = text.find("User: bye\nBot: goodbye").unwrap();
    assert!(first < second);
    assert!(text.contains("friendly tone"));
}

#[tokio::test]
async fn absent_or_empty_chat_history_renders_no_blocks() {
    let registry = build_registry().unwrap();

    for input in [
        json!({"message": "hello", "tone": "professional"}),
        json!({"message": "hello", "tone": "professional", "chatHistory": []}),
    ] {
        let mock = RecordingClient::replying_json(json!({"response": "ok"}));
        let client: DynGenerationClient = mock.clone();
        registry.invoke("support_chat", &client, input).await.unwrap();

        let text = mock.sent_text();
        assert_eq!(text.matches("User: ").count(), 0);
        assert_eq!(text.matches("Bot: ").count(), 0);
    }
}

#[tokio::test]
async fn previous_profile_block_appears_exactly_once_when_present() {
    let registry = build_registry().unwrap();
    let mock = RecordingClient::replying_json(json!({"userProfile": "updated"}));
    let client: DynGenerationClient = mock.clone();

    registry
        .invoke(
            "summarize_profile",
            &client,
            json!({
                "allSessionSummaries": ["slept badly"],
                "previousUserProfile": "PROFILE-MARKER"
            }),
        )
        .await
        .unwrap();

    let text = mock.sent_text();
    assert_eq!(text.matches("PROFILE-MARKER").count(), 1);
    assert_eq!(text.matches("Existing profile").count(), 1);
}

#[tokio::test]
async fn previous_profile_block_is_omitted_when_absent() {
    let registry = build_registry().unwrap();
    let mock = RecordingClient::replying_json(json!({"userProfile": "fresh"}));
    let client: DynGenerationClient = mock.clone();

    registry
        .invoke(
            "summarize_profile",
            &client,
            json!({"allSessionSummaries": ["felt calm", "walked outside"]}),
        )
        .await
        .unwrap();

    let text = mock.sent_text();
    assert!(!text.contains("Existing profile"));
    assert_eq!(text.matches("- ").count(), 2);
}

#[tokio::test]
async fn previous_thoughts_render_as_an_avoid_list() {
    let registry = build_registry().unwrap();
    let mock = RecordingClient::replying_json(json!({"thought": "t", "isHelpful": true}));
    let client: DynGenerationClient = mock.clone();

    registry
        .invoke(
            "generate_thought",
            &client,
            json!({
                "topic": "sleep",
                "previousThoughts": ["I will never sleep again.", "One bad night is survivable."]
            }),
        )
        .await
        .unwrap();

    let text = mock.sent_text();
    assert!(text.contains("sleep"));
    assert!(text.contains("- I will never sleep again."));
    assert!(text.contains("- One bad night is survivable."));
}

#[tokio::test]
async fn audio_uri_is_attached_as_a_media_part_not_inlined() {
    let registry = build_registry().unwrap();
    let uri = "data:audio/wav;base64,UklGRg==";
    let mock = RecordingClient::replying_json(json!({"transcription": "hi"}));
    let client: DynGenerationClient = mock.clone();

    registry
        .invoke("transcribe_audio", &client, json!({"audioDataUri": uri}))
        .await
        .unwrap();

    assert_eq!(mock.sent_media(), vec![uri.to_string()]);
    assert!(!mock.sent_text().contains("base64"));
}
