//! Adapter Factory (Phase 5)
//!
//! Creates LLM adapter instances from configuration.

use crate::llm::adapters::glm::GlmAdapter;
use crate::llm::adapters::ollama::OllamaAdapter;
use crate::llm::adapters::openai::OpenAiAdapter;
use crate::llm::adapters::stub::StubAdapter;
use crate::llm::adapters::{Adapter, AdapterError};
use std::path::Path;

/// Create adapter from config file path
pub fn create_adapter_from_config(db_root: &Path) -> Result<Adapter, AdapterError> {
    let config_path = db_root.join("config.toml");
    let content = std::fs::read_to_string(&config_path)
        .map_err(|e| AdapterError::Configuration(format!("Failed to read config: {}", e)))?;

    create_adapter_from_config_str(&content)
}

/// Create adapter from config string
///
/// Parses TOML-style config and returns appropriate adapter.
/// Uses simple string matching (no TOML dependency).
pub fn create_adapter_from_config_str(content: &str) -> Result<Adapter, AdapterError> {
    // Check for disabled mode first
    if content.contains("mode = \"disabled\"") {
        return Err(AdapterError::Configuration(
            "LLM mode is disabled".to_string(),
        ));
    }

    // Check for local backend (Ollama)
    if content.contains("backend = \"ollama\"") {
        let host = extract_config_value(content, "host").unwrap_or("127.0.0.1".to_string());
        let port = extract_config_value(content, "port").unwrap_or("11434".to_string());
        let model = extract_config_value(content, "model")
            .ok_or_else(|| AdapterError::Configuration("Missing 'model' in config".to_string()))?;

        return Ok(Adapter::Ollama(OllamaAdapter::new(host, port, model)));
    }

    // External providers (provider field)
    let provider = extract_config_value(content, "provider")
        .ok_or_else(|| AdapterError::Configuration("Missing 'provider' in config".to_string()))?;

    // Handle stub provider for testing
    if provider == "stub" {
        return Ok(Adapter::Stub(StubAdapter::new()));
    }

    let base_url = extract_config_value(content, "base_url")
        .ok_or_else(|| AdapterError::Configuration("Missing 'base_url' in config".to_string()))?;

    let model = extract_config_value(content, "model")
        .ok_or_else(|| AdapterError::Configuration("Missing 'model' in config".to_string()))?;

    let api_key = extract_config_value(content, "api_key")
        .ok_or_else(|| AdapterError::Configuration("Missing 'api_key' in config".to_string()))?;

    // Resolve env:... references
    let api_key = resolve_env_var(&api_key);

    match provider.as_str() {
        "openai" => Ok(Adapter::OpenAi(OpenAiAdapter::new(
            base_url, model, api_key,
        ))),
        "glm" => Ok(Adapter::Glm(GlmAdapter::new(base_url, model, api_key))),
        _ => Err(AdapterError::Configuration(format!(
            "Unknown provider: {}",
            provider
        ))),
    }
}

/// Extract config value from TOML-style string
///
/// Simple parser for "key = \"value\"" pattern.
fn extract_config_value(content: &str, key: &str) -> Option<String> {
    let pattern = format!("{} = \"", key);
    for line in content.lines() {
        let line = line.trim();
        if line.starts_with(&pattern) {
            let start = pattern.len();
            if let Some(end) = line[start..].find('"') {
                return Some(line[start..start + end].to_string());
            }
        }
    }
    None
}

/// Resolve environment variable reference
///
/// If value starts with "env:", read from environment.
/// Otherwise return value as-is.
fn resolve_env_var(value: &str) -> String {
    if let Some(rest) = value.strip_prefix("env:") {
        std::env::var(rest).unwrap_or_else(|_| format!("env:{}", rest))
    } else {
        value.to_string()
    }
}
