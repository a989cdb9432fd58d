pub mod client;
#[cfg(feature = "http-client")]
pub mod http;
pub mod types;

pub use client::{DynGenerationClient, GenerationClient};
#[cfg(feature = "http-client")]
pub use http::GenericHttpClient;
pub use types::{GenerationRequest, GenerationResponse, PromptPart};
