//! OpenAI response parsing
//!
//! Public functions for parsing OpenAI JSON and SSE responses.

use crate::llm::adapters::AdapterError;
use serde_json::Value as JsonValue;

/// Parse OpenAI chat completion JSON response
///
/// Public function for testing.
pub fn parse_chat_completion(response: &str) -> Result<String, AdapterError> {
    let json: JsonValue = serde_json::from_str(response)?;

    let content = json["choices"]
        .get(0)
        .and_then(|c| c.get("message"))
        .and_then(|m| m.get("content"))
        .and_then(|c| c.as_str())
        .ok_or_else(|| {
            AdapterError::InvalidResponse("Missing choices[0].message.content".to_string())
        })?;

    Ok(content.to_string())
}

/// Parse SSE stream from response body
///
/// Public function for testing.
/// Returns concatenated content from all chunks.
pub fn parse_sse_stream<F>(body: &str, mut on_chunk: F) -> Result<String, AdapterError>
where
    F: FnMut(&str),
{
    let mut full_content = String::new();

    for line in body.lines() {
        let line = line.trim();
        if let Some(data) = line.strip_prefix("data: ") {
            if data == "[DONE]" {
                break;
            }
            if let Ok(json) = serde_json::from_str::<JsonValue>(data) {
                if let Some(delta) = json["choices"]
                    .get(0)
                    .and_then(|c| c.get("delta"))
                    .and_then(|d| d.get("content"))
                {
                    if let Some(text) = delta.as_str() {
                        on_chunk(text);
                        full_content.push_str(text);
                    }
                }
            }
        }
    }

    Ok(full_content)
}
