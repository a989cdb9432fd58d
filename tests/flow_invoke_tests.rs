use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use mindflow::{
    build_registry, DynGenerationClient, GenerationClient, GenerationRequest, GenerationResponse,
    MindflowError,
};
use serde_json::{json, Value};

/// Backend stub that counts calls and replies with a fixed body.
struct StaticClient {
    calls: AtomicUsize,
    content: String,
}

impl StaticClient {
    fn replying(content: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            content: content.into(),
        })
    }

    fn replying_json(value: Value) -> Arc<Self> {
        Self::replying(value.to_string())
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GenerationClient for StaticClient {
    async fn generate(&self, _request: GenerationRequest) -> mindflow::Result<GenerationResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(GenerationResponse {
            content: self.content.clone(),
            metadata: None,
        })
    }
}

const AUDIO_URI: &str = "data:audio/wav;base64,UklGRg==";

fn invalid_inputs() -> Vec<(&'static str, Value)> {
    vec![
        ("detect_emotion", json!({})),
        ("detect_emotion", json!({"text": 5})),
        ("support_chat", json!({"message": "hi"})),
        ("support_chat", json!({"message": "hi", "tone": "sarcastic"})),
        ("transcribe_audio", json!({})),
        ("generate_thought", json!({"topic": 1})),
        ("summarize_profile", json!({})),
        ("analyze_voice_emotion", json!({"audioDataUri": 7})),
    ]
}

fn valid_rounds() -> Vec<(&'static str, Value, Value)> {
    vec![
        (
            "detect_emotion",
            json!({"text": "I slept well and feel rested."}),
            json!({"emotion": "calm", "confidence": 0.82}),
        ),
        (
            "support_chat",
            json!({"message": "rough day", "tone": "empathetic"}),
            json!({"response": "That sounds hard. I'm here with you."}),
        ),
        (
            "transcribe_audio",
            json!({"audioDataUri": AUDIO_URI}),
            json!({"transcription": "hello there"}),
        ),
        (
            "generate_thought",
            json!({"topic": "public speaking"}),
            json!({"thought": "Everyone will laugh at me.", "isHelpful": false}),
        ),
        (
            "summarize_profile",
            json!({"allSessionSummaries": ["slept badly", "felt better after a walk"]}),
            json!({"userProfile": "Sleep is a recurring theme; walks help."}),
        ),
        (
            "analyze_voice_emotion",
            json!({"audioDataUri": AUDIO_URI}),
            json!({"emotion": "happy", "confidence": 1.0, "explanation": "Bright, quick delivery."}),
        ),
    ]
}

#[tokio::test]
async fn invalid_input_fails_validation_without_calling_the_backend() {
    let registry = build_registry().unwrap();
    let mock = StaticClient::replying_json(json!({"unused": true}));
    let client: DynGenerationClient = mock.clone();

    for (flow, input) in invalid_inputs() {
        let result = registry.invoke(flow, &client, input).await;
        match result {
            Err(MindflowError::Validation { flow: name, .. }) => assert_eq!(name, flow),
            other => panic!("{}: expected validation error, got {:?}", flow, other.err()),
        }
    }
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn conforming_backend_output_is_returned_unchanged() {
    let registry = build_registry().unwrap();

    for (flow, input, output) in valid_rounds() {
        let mock = StaticClient::replying_json(output.clone());
        let client: DynGenerationClient = mock.clone();

        let result = registry.invoke(flow, &client, input).await.unwrap();
        assert_eq!(result, output, "{}", flow);
        assert_eq!(mock.call_count(), 1, "{}", flow);
    }
}

#[tokio::test]
async fn fenced_json_reply_is_accepted() {
    let registry = build_registry().unwrap();
    let mock = StaticClient::replying(
        "```json\n{\"emotion\": \"calm\", \"confidence\": 0.5}\n```",
    );
    let client: DynGenerationClient = mock.clone();

    let result = registry
        .invoke("detect_emotion", &client, json!({"text": "ok"}))
        .await
        .unwrap();
    assert_eq!(result, json!({"emotion": "calm", "confidence": 0.5}));
}

#[tokio::test]
async fn malformed_backend_output_is_a_contract_violation() {
    let registry = build_registry().unwrap();
    let cases: Vec<(&str, Value, Value)> = vec![
        (
            "detect_emotion",
            json!({"text": "ok"}),
            json!({"emotion": "calm", "confidence": 1.5}),
        ),
        (
            "detect_emotion",
            json!({"text": "ok"}),
            json!({"confidence": 0.5}),
        ),
        (
            "transcribe_audio",
            json!({"audioDataUri": AUDIO_URI}),
            json!({"text": "wrong field"}),
        ),
        (
            "generate_thought",
            json!({"topic": "sleep"}),
            json!({"thought": "x", "isHelpful": "yes"}),
        ),
        (
            "analyze_voice_emotion",
            json!({"audioDataUri": AUDIO_URI}),
            json!({"emotion": "furious", "confidence": 0.9, "explanation": "x"}),
        ),
    ];

    for (flow, input, output) in cases {
        let mock = StaticClient::replying_json(output);
        let client: DynGenerationClient = mock.clone();

        let result = registry.invoke(flow, &client, input).await;
        assert!(
            matches!(result, Err(MindflowError::ContractViolation { .. })),
            "{}: expected contract violation, got {:?}",
            flow,
            result.err()
        );
    }
}

#[tokio::test]
async fn non_json_reply_is_a_contract_violation() {
    let registry = build_registry().unwrap();
    let mock = StaticClient::replying("I feel like the text is calm.");
    let client: DynGenerationClient = mock.clone();

    let result = registry
        .invoke("detect_emotion", &client, json!({"text": "ok"}))
        .await;
    assert!(matches!(
        result,
        Err(MindflowError::ContractViolation { .. })
    ));
}

#[tokio::test]
async fn malformed_data_uri_is_rejected_before_the_backend_call() {
    let registry = build_registry().unwrap();
    let mock = StaticClient::replying_json(json!({"transcription": "unused"}));
    let client: DynGenerationClient = mock.clone();

    let result = registry
        .invoke(
            "transcribe_audio",
            &client,
            json!({"audioDataUri": "https://example.com/a.wav"}),
        )
        .await;
    assert!(matches!(result, Err(MindflowError::Media(_))));
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn typed_wrappers_decode_outputs() {
    use mindflow::{
        detect_emotion, generate_thought, DetectEmotionInput, GenerateThoughtInput,
    };

    let registry = build_registry().unwrap();

    let mock = StaticClient::replying_json(json!({"emotion": "calm", "confidence": 0.0}));
    let client: DynGenerationClient = mock.clone();
    let output = detect_emotion(
        &registry,
        &client,
        DetectEmotionInput {
            text: "steady breathing".to_string(),
        },
    )
    .await
    .unwrap();
    assert_eq!(output.emotion, "calm");
    assert_eq!(output.confidence, 0.0);

    let mock = StaticClient::replying_json(json!({"thought": "I can prepare.", "isHelpful": true}));
    let client: DynGenerationClient = mock.clone();
    let output = generate_thought(
        &registry,
        &client,
        GenerateThoughtInput {
            topic: "exams".to_string(),
            previous_thoughts: None,
        },
    )
    .await
    .unwrap();
    assert!(output.is_helpful);
}

#[tokio::test]
async fn unknown_flow_name_is_reported() {
    let registry = build_registry().unwrap();
    let mock = StaticClient::replying_json(json!({}));
    let client: DynGenerationClient = mock.clone();

    let result = registry.invoke("summon_demons", &client, json!({})).await;
    assert!(matches!(result, Err(MindflowError::FlowNotRegistered(_))));
}

#[test]
fn registry_rejects_duplicate_names() {
    let mut registry = build_registry().unwrap();
    let duplicate = build_registry().unwrap();
    let flow = duplicate.get("detect_emotion").unwrap().clone();
    assert!(matches!(
        registry.register(flow),
        Err(MindflowError::DuplicateFlow(_))
    ));
}

#[test]
fn registry_lists_all_six_flows() {
    let registry = build_registry().unwrap();
    assert_eq!(
        registry.names(),
        vec![
            "analyze_voice_emotion",
            "detect_emotion",
            "generate_thought",
            "summarize_profile",
            "support_chat",
            "transcribe_audio",
        ]
    );
    assert_eq!(registry.catalog().len(), 6);
}
