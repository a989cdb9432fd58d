use std::sync::Arc;

use async_trait::async_trait;

use super::types::{GenerationRequest, GenerationResponse};
use crate::error::Result;

/// The generation backend seam. One call per flow invocation; retry and
/// timeout policy belong to the caller or the concrete client, never here.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse>;
}

pub type DynGenerationClient = Arc<dyn GenerationClient>;
