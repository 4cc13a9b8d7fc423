//! External collaborators, consumed only (SPEC_FULL.md §6). These are the
//! supplied components named "out of scope" by spec.md §1: LLM transport,
//! the router RPC, the tool executor, the safety gate, event emission, and
//! the coordinator event surface. Only trait contracts live here, plus
//! deterministic stub implementations for tests, grounded on the teacher's
//! `llm::adapters::{stub, transport_fake}` fake-transport pattern.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::errors::ErrorCategory;
use crate::model::{Message, RouterSelection, ToolChoice, ToolInvocation, ToolResult};

// ---------------------------------------------------------------------
// LLMClient
// ---------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmRequest {
    pub messages: Vec<Message>,
    pub tools: Vec<ToolSpec>,
    pub max_tokens: u32,
    pub tool_choice: ToolChoice,
    pub system_prompt: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmToolCall {
    pub tool: String,
    pub params: HashMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmResponse {
    pub model: String,
    pub content: String,
    pub stop_reason: String,
    pub output_tokens: u64,
    pub duration_ms: u64,
    pub tool_calls: Vec<LlmToolCall>,
}

#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("empty response: {message_count} messages, {duration_ms}ms")]
    EmptyResponse { message_count: usize, duration_ms: u64 },
    #[error("llm transport error: {0}")]
    Transport(String),
}

#[async_trait]
pub trait LLMClient: Send + Sync {
    async fn complete(&self, request: LlmRequest) -> Result<LlmResponse, LlmError>;
}

// ---------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    pub best_for: String,
    pub use_when: String,
    pub avoid_when: String,
    pub instead_of: Vec<String>,
    pub param_names: Vec<String>,
    pub category: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CodeContextSummary {
    pub file_count: u64,
    pub symbol_count: u64,
    pub language: String,
    pub recent_tool_names: Vec<String>,
    pub tool_history_summaries: Vec<String>,
    pub step_number: usize,
    pub previous_errors: Vec<String>,
    pub progress_summary: String,
}

#[derive(Debug, thiserror::Error)]
pub enum RouterError {
    #[error("router rpc failed: {0}")]
    Rpc(String),
    #[error("router not configured")]
    NotConfigured,
}

#[async_trait]
pub trait Router: Send + Sync {
    async fn select_tool(
        &self,
        query: &str,
        tool_specs: &[ToolSpec],
        code_context: &CodeContextSummary,
    ) -> Result<RouterSelection, RouterError>;
}

// ---------------------------------------------------------------------
// ToolExecutor
// ---------------------------------------------------------------------

#[async_trait]
pub trait ToolExecutor: Send + Sync {
    async fn execute(&self, invocation: &ToolInvocation) -> Result<ToolResult, anyhow::Error>;
}

// ---------------------------------------------------------------------
// SafetyGate
// ---------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ProposedChange {
    FileWrite { path: String },
    FileDelete { path: String },
    ShellCommand { command: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SafetyCheckResult {
    pub blocked: bool,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SafetyConstraint {
    pub description: String,
}

#[async_trait]
pub trait SafetyGate: Send + Sync {
    async fn check(&self, changes: &[ProposedChange]) -> SafetyCheckResult;
    fn should_block(&self, result: &SafetyCheckResult) -> bool {
        result.blocked
    }
    fn extract_constraints(&self, result: &SafetyCheckResult, node_id: &str) -> Vec<SafetyConstraint> {
        match &result.reason {
            Some(reason) => vec![SafetyConstraint { description: format!("{node_id}: {reason}") }],
            None => Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------
// EventEmitter / Coordinator
// ---------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    LlmRequest,
    LlmResponse,
    ToolInvocation { tool: String },
    ToolResult { tool: String, success: bool },
    SafetyCheck { blocked: bool },
    StepComplete { step: usize },
    StateTransition { to: String },
    Error { message: String },
    ToolForcing { tool: String },
    ContextUpdate,
    ToolExecuted { tool: String },
    ToolFailed { tool: String, category: ErrorCategory },
    CircuitBreaker { reason: String },
    SemanticRepetition { tool: String, similarity: f64 },
    CycleDetected { length: u64 },
}

pub trait EventEmitter: Send + Sync {
    fn emit(&self, event: Event);
}

pub struct NoopEventEmitter;
impl EventEmitter for NoopEventEmitter {
    fn emit(&self, _event: Event) {}
}

#[derive(Default)]
pub struct RecordingEventEmitter {
    pub events: std::sync::Mutex<Vec<Event>>,
}

impl EventEmitter for RecordingEventEmitter {
    fn emit(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }
}

// ---------------------------------------------------------------------
// Stub collaborators for tests (grounded on llm::adapters::stub / transport_fake)
// ---------------------------------------------------------------------

pub struct StubLlmClient {
    responses: std::sync::Mutex<std::collections::VecDeque<LlmResponse>>,
}

impl StubLlmClient {
    pub fn new(responses: Vec<LlmResponse>) -> Self {
        Self { responses: std::sync::Mutex::new(responses.into()) }
    }
}

#[async_trait]
impl LLMClient for StubLlmClient {
    async fn complete(&self, _request: LlmRequest) -> Result<LlmResponse, LlmError> {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| LlmError::Transport("stub llm client exhausted".to_string()))
    }
}

pub struct StubRouter {
    selections: std::sync::Mutex<std::collections::VecDeque<Result<RouterSelection, String>>>,
}

impl StubRouter {
    pub fn new(selections: Vec<Result<RouterSelection, String>>) -> Self {
        Self { selections: std::sync::Mutex::new(selections.into()) }
    }
}

#[async_trait]
impl Router for StubRouter {
    async fn select_tool(
        &self,
        _query: &str,
        _tool_specs: &[ToolSpec],
        _code_context: &CodeContextSummary,
    ) -> Result<RouterSelection, RouterError> {
        match self.selections.lock().unwrap().pop_front() {
            Some(Ok(selection)) => Ok(selection),
            Some(Err(message)) => Err(RouterError::Rpc(message)),
            None => Err(RouterError::Rpc("stub router exhausted".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MetaAction, RouterTarget};

    #[tokio::test]
    async fn stub_llm_client_returns_queued_responses_in_order() {
        let client = StubLlmClient::new(vec![LlmResponse {
            model: "x".into(),
            content: "hello".into(),
            stop_reason: "stop".into(),
            output_tokens: 1,
            duration_ms: 1,
            tool_calls: vec![],
        }]);
        let req = LlmRequest {
            messages: vec![],
            tools: vec![],
            max_tokens: 10,
            tool_choice: ToolChoice::Auto,
            system_prompt: None,
        };
        let resp = client.complete(req).await.unwrap();
        assert_eq!(resp.content, "hello");
    }

    #[tokio::test]
    async fn stub_router_returns_error_when_scripted() {
        let router = StubRouter::new(vec![Err("boom".to_string())]);
        let ctx = CodeContextSummary::default();
        let result = router.select_tool("q", &[], &ctx).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn stub_router_returns_meta_action() {
        let router = StubRouter::new(vec![Ok(RouterSelection {
            target: RouterTarget::Meta(MetaAction::Answer),
            confidence: 0.8,
            reasoning: "done".into(),
            duration_ms: 1,
        })]);
        let ctx = CodeContextSummary::default();
        let sel = router.select_tool("q", &[], &ctx).await.unwrap();
        assert!(sel.is_meta());
    }
}
