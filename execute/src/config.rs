//! Tunable thresholds for the execution loop.
//!
//! Grounded on `execution_engine::safety_config::SafetyConfig`: a plain
//! struct of thresholds with a `Default` impl, named alternate configs for
//! tests, and a `validate()` that rejects out-of-range values.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecuteConfig {
    /// Router confidence threshold below which the suggestion is downgraded.
    pub confidence_threshold: f64,

    /// Times a tool may execute in a session before the circuit breaker fires.
    pub circuit_breaker_tool_call_limit: usize,

    /// Jaccard similarity threshold for semantic-repetition / duplicate detection.
    pub semantic_similarity_threshold: f64,

    /// Number of most-recent same-tool queries considered for repetition checks.
    pub semantic_history_window: usize,

    /// Maximum number of grounding-validation retries before accepting with a footnote.
    pub max_grounding_retries: usize,

    /// Maximum number of tool-forcing / prohibited-pattern retries.
    pub max_tool_forcing_retries: usize,

    /// Latest step at which tool-forcing is still attempted.
    pub max_step_for_forcing: usize,

    /// Step-count multiple at which the loop proposes REFLECT.
    pub reflection_threshold: usize,

    /// Fuzzy symbol-search cancellable deadline, in milliseconds.
    pub fuzzy_search_deadline_ms: u64,

    /// Minimum router confidence required for hard-forcing a tool.
    pub hard_force_confidence_threshold: f64,
}

impl Default for ExecuteConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: 0.7,
            circuit_breaker_tool_call_limit: 5,
            semantic_similarity_threshold: 0.7,
            semantic_history_window: 5,
            max_grounding_retries: 2,
            max_tool_forcing_retries: 2,
            max_step_for_forcing: 6,
            reflection_threshold: 4,
            fuzzy_search_deadline_ms: 100,
            hard_force_confidence_threshold: 0.85,
        }
    }
}

impl ExecuteConfig {
    /// Loose thresholds, useful for tests that want to exercise many steps
    /// without tripping retry caps or the circuit breaker prematurely.
    pub fn permissive() -> Self {
        Self {
            confidence_threshold: 0.1,
            circuit_breaker_tool_call_limit: 1000,
            semantic_similarity_threshold: 0.99,
            semantic_history_window: 5,
            max_grounding_retries: 10,
            max_tool_forcing_retries: 10,
            max_step_for_forcing: 1000,
            reflection_threshold: 1000,
            fuzzy_search_deadline_ms: 5000,
            hard_force_confidence_threshold: 0.01,
        }
    }

    /// Tight thresholds for safety-sensitive deployments.
    pub fn restrictive() -> Self {
        Self {
            confidence_threshold: 0.9,
            circuit_breaker_tool_call_limit: 2,
            semantic_similarity_threshold: 0.5,
            semantic_history_window: 3,
            max_grounding_retries: 1,
            max_tool_forcing_retries: 1,
            max_step_for_forcing: 2,
            reflection_threshold: 2,
            fuzzy_search_deadline_ms: 50,
            hard_force_confidence_threshold: 0.95,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.confidence_threshold) {
            return Err(format!(
                "confidence_threshold ({}) must be in [0,1]",
                self.confidence_threshold
            ));
        }
        if !(0.0..=1.0).contains(&self.semantic_similarity_threshold) {
            return Err(format!(
                "semantic_similarity_threshold ({}) must be in [0,1]",
                self.semantic_similarity_threshold
            ));
        }
        if self.circuit_breaker_tool_call_limit == 0 {
            return Err("circuit_breaker_tool_call_limit must be > 0".to_string());
        }
        if self.reflection_threshold == 0 {
            return Err("reflection_threshold must be > 0".to_string());
        }
        Ok(())
    }
}
