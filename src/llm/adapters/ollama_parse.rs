//! Ollama response parsing
//!
//! Public functions for parsing Ollama JSON and NDJSON responses.

use crate::llm::adapters::AdapterError;
use serde_json::Value as JsonValue;

/// Parse Ollama chat completion JSON response
///
/// Public function for testing.
pub fn parse_chat_completion(response: &str) -> Result<String, AdapterError> {
    let json: JsonValue = serde_json::from_str(response)?;

    let content = json
        .get("message")
        .and_then(|m| m.get("content"))
        .and_then(|c| c.as_str())
        .ok_or_else(|| AdapterError::InvalidResponse("Missing message.content".to_string()))?;

    Ok(content.to_string())
}

/// Parse NDJSON stream from response body
///
/// Public function for testing.
/// Returns concatenated content from all chunks.
pub fn parse_ndjson_stream<F>(body: &str, mut on_chunk: F) -> Result<String, AdapterError>
where
    F: FnMut(&str),
{
    let mut full_content = String::new();

    for line in body.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Ok(json) = serde_json::from_str::<JsonValue>(line) {
            // Extract content first (in case this line has done=true)
            if let Some(content) = json
                .get("message")
                .and_then(|m| m.get("content"))
                .and_then(|c| c.as_str())
            {
                on_chunk(content);
                full_content.push_str(content);
            }

            // Then check if done and stop processing
            if let Some(true) = json.get("done").and_then(|d| d.as_bool()) {
                break;
            }
        }
    }

    Ok(full_content)
}
