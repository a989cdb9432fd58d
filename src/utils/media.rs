use base64::Engine;

use crate::error::{MindflowError, Result};

/// A parsed `data:<mime>;base64,<payload>` URI.
#[derive(Clone, Debug, PartialEq)]
pub struct DataUri {
    pub mime: String,
    pub data: Vec<u8>,
}

/// Parse and decode a base64 data URI. Malformed payloads are rejected here,
/// before any backend call.
pub fn parse_data_uri(uri: &str) -> Result<DataUri> {
    let rest = uri
        .strip_prefix("data:")
        .ok_or_else(|| MindflowError::Media("missing `data:` prefix".to_string()))?;

    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| MindflowError::Media("missing `,` separator".to_string()))?;

    let mime = header
        .strip_suffix(";base64")
        .ok_or_else(|| MindflowError::Media("only base64 data URIs are supported".to_string()))?;
    if mime.is_empty() {
        return Err(MindflowError::Media("missing MIME type".to_string()));
    }

    let data = base64::engine::general_purpose::STANDARD
        .decode(payload)
        .map_err(|e| MindflowError::Media(format!("invalid base64 payload: {}", e)))?;

    Ok(DataUri {
        mime: mime.to_string(),
        data,
    })
}
