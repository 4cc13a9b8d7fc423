//! LLM Integration Module
//!
//! Provides integration with Large Language Models for code analysis and generation.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, info, warn};

/// LLM provider types
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum LLMProvider {
    OpenAI,
    Anthropic,
    Ollama,
    Local,
    Custom(String),
}

/// LLM configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LLMConfig {
    /// LLM provider
    pub provider: LLMProvider,
    /// Model name
    pub model: String,
    /// API key (if applicable)
    pub api_key: Option<String>,
    /// API endpoint (if applicable)
    pub api_endpoint: Option<String>,
    /// Maximum tokens
    pub max_tokens: u32,
    /// Temperature
    pub temperature: f32,
    /// Timeout in seconds
    pub timeout_secs: u64,
    /// Additional parameters
    pub parameters: HashMap<String, serde_json::Value>,
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            provider: LLMProvider::OpenAI,
            model: "gpt-3.5-turbo".to_string(),
            api_key: None,
            api_endpoint: None,
            max_tokens: 2048,
            temperature: 0.7,
            timeout_secs: 30,
            parameters: HashMap::new(),
        }
    }
}

/// LLM request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LLMRequest {
    /// Request ID
    pub request_id: String,
    /// Prompt or messages
    pub prompt: String,
    /// Context information
    pub context: Option<String>,
    /// Request type
    pub request_type: LLMRequestType,
    /// Additional options
    pub options: HashMap<String, serde_json::Value>,
}

/// LLM request types
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum LLMRequestType {
    /// Code completion
    CodeCompletion,
    /// Code analysis
    CodeAnalysis,
    /// Code generation
    CodeGeneration,
    /// Documentation generation
    DocumentationGeneration,
    /// Refactoring suggestions
    RefactoringSuggestions,
    /// Bug detection
    BugDetection,
    /// General chat
    Chat,
}

/// LLM response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LLMResponse {
    /// Request ID
    pub request_id: String,
    /// Response content
    pub content: String,
    /// Confidence score
    pub confidence: f64,
    /// Token usage
    pub token_usage: TokenUsage,
    /// Response time in milliseconds
    pub response_time_ms: u64,
    /// Whether the response was cached
    pub cached: bool,
    /// Additional metadata
    pub metadata: HashMap<String, serde_json::Value>,
}

/// Token usage information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Input tokens
    pub input_tokens: u32,
    /// Output tokens
    pub output_tokens: u32,
    /// Total tokens
    pub total_tokens: u32,
}

/// LLM integration manager
pub struct LLMIntegration {
    /// Configuration
    config: LLMConfig,
    /// Request cache
    cache: HashMap<String, LLMResponse>,
    /// Request statistics
    stats: LLMStats,
}

/// LLM statistics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LLMStats {
    /// Total requests
    pub total_requests: u64,
    /// Successful requests
    pub successful_requests: u64,
    /// Failed requests
    pub failed_requests: u64,
    /// Cached requests
    pub cached_requests: u64,
    /// Average response time in milliseconds
    pub avg_response_time_ms: f64,
    /// Total tokens used
    pub total_tokens_used: u64,
}

impl LLMIntegration {
    /// Create a new LLM integration
    pub fn new(config: LLMConfig) -> Self {
        Self {
            config,
            cache: HashMap::new(),
            stats: LLMStats::default(),
        }
    }

    /// Send a request to the LLM
    pub async fn send_request(&mut self, request: LLMRequest) -> Result<LLMResponse> {
        debug!("Sending LLM request: {}", request.request_id);

        let start_time = std::time::Instant::now();

        // Check cache first
        let cache_key = self.generate_cache_key(&request);
        if let Some(cached_response) = self.cache.get(&cache_key) {
            let mut response = cached_response.clone();
            response.cached = true;
            self.stats.cached_requests += 1;
            return Ok(response);
        }

        // Send request based on provider
        let response = match &self.config.provider {
            LLMProvider::OpenAI => self.send_openai_request(&request).await,
            LLMProvider::Anthropic => self.send_anthropic_request(&request).await,
            LLMProvider::Ollama => self.send_ollama_request(&request).await,
            LLMProvider::Local => self.send_local_request(&request).await,
            LLMProvider::Custom(_) => self.send_custom_request(&request).await,
        };

        let response_time = start_time.elapsed().as_millis() as u64;

        match response {
            Ok(mut resp) => {
                resp.response_time_ms = response_time;
                resp.cached = false;

                // Cache the response
                self.cache.insert(cache_key, resp.clone());

                // Update statistics
                self.stats.total_requests += 1;
                self.stats.successful_requests += 1;
                self.stats.total_tokens_used += resp.token_usage.total_tokens as u64;
                self.update_avg_response_time(response_time);

                info!("LLM request completed: {}", request.request_id);
                Ok(resp)
            }
            Err(e) => {
                self.stats.total_requests += 1;
                self.stats.failed_requests += 1;
                warn!("LLM request failed: {} - {}", request.request_id, e);
                Err(e)
            }
        }
    }

    /// Send request to OpenAI
    async fn send_openai_request(&self, request: &LLMRequest) -> Result<LLMResponse> {
        debug!("Sending OpenAI request");

        // This would implement actual OpenAI API call
        // For now, it's a placeholder
        anyhow::bail!("OpenAI integration not yet implemented");
    }

    /// Send request to Anthropic
    async fn send_anthropic_request(&self, request: &LLMRequest) -> Result<LLMResponse> {
        debug!("Sending Anthropic request");

        // This would implement actual Anthropic API call
        // For now, it's a placeholder
        anyhow::bail!("Anthropic integration not yet implemented");
    }

    /// Send request to Ollama
    async fn send_ollama_request(&self, request: &LLMRequest) -> Result<LLMResponse> {
        debug!("Sending Ollama request");

        // This would implement actual Ollama API call
        // For now, it's a placeholder
        anyhow::bail!("Ollama integration not yet implemented");
    }

    /// Send request to local model
    async fn send_local_request(&self, request: &LLMRequest) -> Result<LLMResponse> {
        debug!("Sending local model request");

        // This would implement actual local model inference
        // For now, it's a placeholder
        anyhow::bail!("Local model integration not yet implemented");
    }

    /// Send request to custom provider
    async fn send_custom_request(&self, request: &LLMRequest) -> Result<LLMResponse> {
        debug!("Sending custom provider request");

        // This would implement custom provider integration
        // For now, it's a placeholder
        anyhow::bail!("Custom provider integration not yet implemented");
    }

    /// Generate cache key for request
    fn generate_cache_key(&self, request: &LLMRequest) -> String {
        use std::hash::{Hash, Hasher};
        let mut hasher = std::collections::hash_map::DefaultHasher::new();

        request.prompt.hash(&mut hasher);
        request.context.hash(&mut hasher);
        format!("{:x}", hasher.finish())
    }

    /// Update average response time
    fn update_avg_response_time(&mut self, response_time: u64) {
        if self.stats.successful_requests == 1 {
            self.stats.avg_response_time_ms = response_time as f64;
        } else {
            let total_time =
                self.stats.avg_response_time_ms * (self.stats.successful_requests - 1) as f64;
            self.stats.avg_response_time_ms =
                (total_time + response_time as f64) / self.stats.successful_requests as f64;
        }
    }

    /// Get current statistics
    pub fn get_stats(&self) -> &LLMStats {
        &self.stats
    }

    /// Clear cache
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Get cache size
    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }

    /// Update configuration
    pub fn update_config(&mut self, config: LLMConfig) {
        self.config = config;
    }

    /// Get current configuration
    pub fn get_config(&self) -> &LLMConfig {
        &self.config
    }
}

impl Default for LLMIntegration {
    fn default() -> Self {
        Self::new(LLMConfig::default())
    }
}
