//! Session errors
//!
//! Error types for LLM session operations.

use crate::execution_tools::Error;
use crate::llm::adapters::transport::AdapterError;
use crate::llm::planner::PlanError;

/// Session errors
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Plan error: {0}")]
    PlanError(#[from] PlanError),

    #[error("Execution DB error: {0}")]
    ExecutionDbError(#[from] Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Execution recording error: {0}")]
    ExecutionRecordingError(String),

    #[error("Adapter error: {0}")]
    AdapterError(#[from] AdapterError),

    #[error("LLM not configured")]
    LlmNotConfigured,
}
