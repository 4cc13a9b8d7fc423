//! Agent Executors
//!
//! This module contains executors for different types of agent tasks.

use crate::ltmc_integration::types::LearningResponse;
use anyhow::Result;
use odincode_core::{CodeSuggestion, Severity, SuggestionType};
use uuid::Uuid;

/// Agent Executors
pub struct AgentExecutors;

impl AgentExecutors {
    /// Create a new agent executors instance
    pub fn new() -> Self {
        Self
    }

    /// Execute a simple task (placeholder implementation)
    pub async fn execute_simple_task(&self, _task: &str) -> Result<Vec<CodeSuggestion>> {
        Ok(vec![])
    }

    /// Execute code generation agent with learning (placeholder)
    pub async fn execute_code_generation_agent_with_learning(
        _ltmc_integration: &crate::ltmc_integration::LTMCIntegration,
        _agent: &crate::models::Agent,
        _file: &odincode_core::CodeFile,
        _learning_response: &LearningResponse,
    ) -> Result<Vec<CodeSuggestion>> {
        Ok(vec![])
    }

    /// Execute refactoring agent with learning (placeholder)
    pub async fn execute_refactoring_agent_with_learning(
        _ltmc_integration: &crate::ltmc_integration::LTMCIntegration,
        _core_engine: &odincode_core::CodeEngine,
        _agent: &crate::models::Agent,
        _file: &odincode_core::CodeFile,
        _learning_response: &LearningResponse,
    ) -> Result<Vec<CodeSuggestion>> {
        Ok(vec![])
    }

    /// Execute bug detection agent with learning (placeholder)
    pub async fn execute_bug_detection_agent_with_learning(
        _ltmc_integration: &crate::ltmc_integration::LTMCIntegration,
        _core_engine: &odincode_core::CodeEngine,
        _agent: &crate::models::Agent,
        _file: &odincode_core::CodeFile,
        _learning_response: &LearningResponse,
    ) -> Result<Vec<CodeSuggestion>> {
        Ok(vec![])
    }

    /// Execute documentation agent with learning (placeholder)
    pub async fn execute_documentation_agent_with_learning(
        _ltmc_integration: &crate::ltmc_integration::LTMCIntegration,
        _agent: &crate::models::Agent,
        _file: &odincode_core::CodeFile,
        _learning_response: &LearningResponse,
    ) -> Result<Vec<CodeSuggestion>> {
        Ok(vec![])
    }

    /// Execute test generation agent with learning (placeholder)
    pub async fn execute_test_generation_agent_with_learning(
        _ltmc_integration: &crate::ltmc_integration::LTMCIntegration,
        _agent: &crate::models::Agent,
        _file: &odincode_core::CodeFile,
        _learning_response: &LearningResponse,
    ) -> Result<Vec<CodeSuggestion>> {
        Ok(vec![])
    }

    /// Execute code understanding agent with learning (placeholder)
    pub async fn execute_code_understanding_agent_with_learning(
        _ltmc_integration: &crate::ltmc_integration::LTMCIntegration,
        _agent: &crate::models::Agent,
        _file: &odincode_core::CodeFile,
        _learning_response: &LearningResponse,
    ) -> Result<Vec<CodeSuggestion>> {
        Ok(vec![])
    }
}
