use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::instrument;

use super::client::GenerationClient;
use super::types::{GenerationRequest, GenerationResponse, PromptPart};
use crate::error::{MindflowError, Result};
use anyhow::anyhow;

/// Generic OpenAI-compatible HTTP client.
///
/// Media parts are forwarded as data-URI url parts; the backend is expected
/// to accept them. Non-success responses keep the HTTP status in the error
/// text, which downstream transience checks rely on.
#[derive(Clone)]
pub struct GenericHttpClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl GenericHttpClient {
    /// Pooled client with connect/request timeouts so a stalled backend
    /// cannot hang an invocation indefinitely.
    fn create_optimized_client() -> reqwest::Client {
        reqwest::Client::builder()
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(std::time::Duration::from_secs(90))
            .connect_timeout(std::time::Duration::from_secs(10))
            .timeout(std::time::Duration::from_secs(300))
            .build()
            .expect("Failed to build HTTP client with custom config")
    }

    pub fn new<S1, S2>(endpoint: S1, api_key: S2) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
    {
        Self {
            client: Self::create_optimized_client(),
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        }
    }

    fn build_body(request: &GenerationRequest) -> Value {
        let content: Vec<Value> = request
            .parts
            .iter()
            .map(|part| match part {
                PromptPart::Text { text } => json!({
                    "type": "text",
                    "text": text
                }),
                PromptPart::Media { url } => json!({
                    "type": "media_url",
                    "media_url": {
                        "url": url
                    }
                }),
            })
            .collect();

        let mut body = json!({
            "model": request.model,
            "messages": [{
                "role": "user",
                "content": content
            }],
            "temperature": request.temperature,
        });
        if request.response_schema.is_some() {
            body["response_format"] = json!({ "type": "json_object" });
        }
        body
    }
}

#[async_trait]
impl GenerationClient for GenericHttpClient {
    #[instrument(skip(self, request), fields(model = %request.model))]
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse> {
        let body = Self::build_body(&request);

        let endpoint = if self.endpoint.contains("/chat/completions") {
            self.endpoint.clone()
        } else {
            format!("{}/chat/completions", self.endpoint.trim_end_matches('/'))
        };

        let response = self
            .client
            .post(&endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| MindflowError::Other(anyhow!("HTTP request error: {}", e)))?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(|e| MindflowError::Other(anyhow!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            let truncated = if response_text.len() > 500 {
                format!("{}... (truncated, {} bytes)", &response_text[..500], response_text.len())
            } else {
                response_text
            };
            return Err(MindflowError::Other(anyhow!(
                "Request failed with status {}: {}\nEndpoint: {}",
                status,
                truncated,
                endpoint
            )));
        }

        let payload: Value = serde_json::from_str(&response_text)
            .map_err(|e| MindflowError::Other(anyhow!("Response parse error: {}", e)))?;

        let content = payload["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| MindflowError::Other(anyhow!("Missing content in response")))?;

        Ok(GenerationResponse {
            content: content.to_string(),
            metadata: Some(payload),
        })
    }
}
