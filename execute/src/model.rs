//! Data model: Session, AssembledContext, TraceStep, ToolInvocation/ToolResult,
//! RouterSelection. See SPEC_FULL.md §3.
//!
//! Plain-field structs with derive-based (de)serialization, grounded on
//! `llm::types::{Plan, Step, SessionContext}` in the teacher.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use crate::crs::Crs;

/// Monotone milliseconds-since-epoch timestamp. Opaque outside one session.
/// See SPEC_FULL.md §3 (resolves spec.md §9 Open Question c).
pub type Timestamp = u64;

pub fn now_ms() -> Timestamp {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    System,
    User,
    Assistant,
    Tool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self { role, content: content.into() }
    }
}

/// A single code-context snippet surfaced to the Responder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodeContextEntry {
    pub file_path: String,
    pub start_line: u32,
    pub end_line: u32,
    pub snippet: String,
}

/// A prior tool result as carried in the assembled context view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriorToolResult {
    pub invocation_id: String,
    pub output: String,
    pub success: bool,
    pub duration_ms: u64,
}

/// The prompt-building view owned by the session. Mutated only by the
/// context manager (an out-of-scope collaborator); this crate only reads
/// and appends to it via well-defined methods.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssembledContext {
    pub messages: Vec<MessageEntry>,
    pub code_context: Vec<CodeContextEntry>,
    pub prior_tool_results: Vec<PriorToolResult>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageEntry {
    pub role: Role,
    pub content: String,
}

impl AssembledContext {
    pub fn push_message(&mut self, role: Role, content: impl Into<String>) {
        self.messages.push(MessageEntry { role, content: content.into() });
    }

    pub fn push_tool_result(&mut self, result: &ToolResult) {
        self.prior_tool_results.push(PriorToolResult {
            invocation_id: result.invocation_id.clone(),
            output: result.output_text.clone(),
            success: result.success,
            duration_ms: result.duration_ms,
        });
    }

    pub fn has_tool_results(&self) -> bool {
        !self.prior_tool_results.is_empty()
    }
}

/// Audit-log action kind for a `TraceStep`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TraceAction {
    ToolCall,
    ToolCallForced,
    ToolRouting,
    LlmCall,
    ToolSelection,
    Complete,
    SemanticCorrection,
    RouterFallback,
    ForcedSynthesis,
    SynthesisFallback,
}

/// Append-only audit record. See SPEC_FULL.md §3 invariants: trace steps are
/// append-only and ordered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceStep {
    pub action: TraceAction,
    pub target: String,
    pub tool: Option<String>,
    pub duration_ms: u64,
    pub error: Option<String>,
    pub metadata: HashMap<String, String>,
    pub symbols_found: Vec<String>,
    pub timestamp: Timestamp,
}

impl TraceStep {
    pub fn new(action: TraceAction, target: impl Into<String>) -> Self {
        Self {
            action,
            target: target.into(),
            tool: None,
            duration_ms: 0,
            error: None,
            metadata: HashMap::new(),
            symbols_found: Vec::new(),
            timestamp: now_ms(),
        }
    }

    pub fn with_tool(mut self, tool: impl Into<String>) -> Self {
        self.tool = Some(tool.into());
        self
    }

    pub fn with_duration(mut self, ms: u64) -> Self {
        self.duration_ms = ms;
        self
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// Immutable tool invocation record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInvocation {
    pub id: String,
    pub tool: String,
    pub params: HashMap<String, String>,
    pub raw_params: serde_json::Value,
}

impl ToolInvocation {
    pub fn new(tool: impl Into<String>, params: HashMap<String, String>) -> Self {
        let raw_params = serde_json::to_value(&params).unwrap_or(serde_json::Value::Null);
        Self { id: uuid::Uuid::new_v4().to_string(), tool: tool.into(), params, raw_params }
    }
}

/// Result of executing a `ToolInvocation`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    pub invocation_id: String,
    pub success: bool,
    pub output: serde_json::Value,
    pub output_text: String,
    pub duration_ms: u64,
    pub tokens: u64,
    pub cached: bool,
    pub modified_files: Vec<String>,
    pub error: Option<String>,
}

/// Meta-actions the Router may return instead of a concrete tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MetaAction {
    Answer,
    Clarify,
}

/// What the Router selected for a step: either a real tool or a meta-action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RouterTarget {
    Tool(String),
    Meta(MetaAction),
}

/// Produced per step by the Router.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouterSelection {
    pub target: RouterTarget,
    pub confidence: f64,
    pub reasoning: String,
    pub duration_ms: u64,
}

impl RouterSelection {
    pub fn is_meta(&self) -> bool {
        matches!(self.target, RouterTarget::Meta(_))
    }

    pub fn tool_name(&self) -> Option<&str> {
        match &self.target {
            RouterTarget::Tool(name) => Some(name.as_str()),
            RouterTarget::Meta(_) => None,
        }
    }
}

/// Request tool-choice constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToolChoice {
    Auto,
    None,
    Any,
    Required(String),
}

/// Next state returned by the execution loop to the outer driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextState {
    Execute,
    Reflect,
    Complete,
    Error,
}

/// Process-wide per-query state, lifecycle `create -> many-step execute -> close`.
pub struct Session {
    pub id: String,
    pub history: std::sync::Mutex<Vec<Message>>,
    pub context: std::sync::Mutex<AssembledContext>,
    pub trace: std::sync::Mutex<Vec<TraceStep>>,
    pub crs: Arc<Crs>,
    pub circuit_breaker_active: AtomicBool,
    pub step_count: AtomicUsize,
    pub router_configured: AtomicBool,
    pub confidence_threshold_override: std::sync::Mutex<Option<f64>>,
    pub llm_call_count: AtomicU64,
    pub token_count: AtomicU64,
    /// In-memory cache of `(query, corrected-tool)` pairs already substituted
    /// by semantic correction, to dedupe across retries (SPEC §4.2).
    pub semantic_correction_cache: std::sync::Mutex<std::collections::HashSet<(String, String)>>,
}

impl Session {
    pub fn new(router_configured: bool) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            history: std::sync::Mutex::new(Vec::new()),
            context: std::sync::Mutex::new(AssembledContext::default()),
            trace: std::sync::Mutex::new(Vec::new()),
            crs: Arc::new(Crs::new()),
            circuit_breaker_active: AtomicBool::new(false),
            step_count: AtomicUsize::new(0),
            router_configured: AtomicBool::new(router_configured),
            confidence_threshold_override: std::sync::Mutex::new(None),
            llm_call_count: AtomicU64::new(0),
            token_count: AtomicU64::new(0),
            semantic_correction_cache: std::sync::Mutex::new(std::collections::HashSet::new()),
        }
    }

    /// Latch the circuit breaker. Idempotent; per the invariant this flag
    /// only ever transitions false -> true mid-query.
    pub fn activate_circuit_breaker(&self) {
        self.circuit_breaker_active.store(true, Ordering::SeqCst);
    }

    pub fn is_circuit_breaker_active(&self) -> bool {
        self.circuit_breaker_active.load(Ordering::SeqCst)
    }

    /// Reset all latched, per-query state. Called only at session close.
    pub fn close(&self) {
        self.circuit_breaker_active.store(false, Ordering::SeqCst);
    }

    pub fn push_trace(&self, step: TraceStep) {
        self.trace.lock().unwrap().push(step);
    }

    pub fn trace_snapshot(&self) -> Vec<TraceStep> {
        self.trace.lock().unwrap().clone()
    }

    pub fn push_message(&self, role: Role, content: impl Into<String>) {
        self.history.lock().unwrap().push(Message::new(role, content));
    }

    pub fn history_snapshot(&self) -> Vec<Message> {
        self.history.lock().unwrap().clone()
    }

    pub fn increment_step(&self) -> usize {
        self.step_count.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn current_step(&self) -> usize {
        self.step_count.load(Ordering::SeqCst)
    }

    pub fn tool_execution_count(&self, tool: &str) -> usize {
        self.trace
            .lock()
            .unwrap()
            .iter()
            .filter(|s| {
                matches!(s.action, TraceAction::ToolCall | TraceAction::ToolCallForced)
                    && s.tool.as_deref() == Some(tool)
            })
            .count()
    }

    pub fn record_semantic_correction(&self, query: &str, corrected_tool: &str) -> bool {
        let mut cache = self.semantic_correction_cache.lock().unwrap();
        cache.insert((query.to_string(), corrected_tool.to_string()))
    }

    pub fn already_corrected(&self, query: &str, corrected_tool: &str) -> bool {
        self.semantic_correction_cache
            .lock()
            .unwrap()
            .contains(&(query.to_string(), corrected_tool.to_string()))
            || self.trace.lock().unwrap().iter().any(|s| {
                s.action == TraceAction::SemanticCorrection
                    && s.tool.as_deref() == Some(corrected_tool)
                    && s.metadata.get("query").map(|q| q.as_str()) == Some(query)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_breaker_starts_inactive() {
        let s = Session::new(true);
        assert!(!s.is_circuit_breaker_active());
    }

    #[test]
    fn activate_circuit_breaker_latches() {
        let s = Session::new(true);
        s.activate_circuit_breaker();
        assert!(s.is_circuit_breaker_active());
        // Stays latched even if "activated" again.
        s.activate_circuit_breaker();
        assert!(s.is_circuit_breaker_active());
    }

    #[test]
    fn close_resets_breaker() {
        let s = Session::new(true);
        s.activate_circuit_breaker();
        s.close();
        assert!(!s.is_circuit_breaker_active());
    }

    #[test]
    fn trace_is_append_only_ordered() {
        let s = Session::new(true);
        s.push_trace(TraceStep::new(TraceAction::ToolRouting, "a"));
        s.push_trace(TraceStep::new(TraceAction::ToolCall, "b"));
        let snap = s.trace_snapshot();
        assert_eq!(snap.len(), 2);
        assert_eq!(snap[0].target, "a");
        assert_eq!(snap[1].target, "b");
    }

    #[test]
    fn tool_execution_count_counts_forced_and_normal() {
        let s = Session::new(true);
        s.push_trace(TraceStep::new(TraceAction::ToolCall, "t").with_tool("grep"));
        s.push_trace(TraceStep::new(TraceAction::ToolCallForced, "t").with_tool("grep"));
        s.push_trace(TraceStep::new(TraceAction::ToolCall, "t").with_tool("other"));
        assert_eq!(s.tool_execution_count("grep"), 2);
    }

    #[test]
    fn semantic_correction_cache_dedupes() {
        let s = Session::new(true);
        assert!(s.record_semantic_correction("q", "callers"));
        assert!(!s.record_semantic_correction("q", "callers"));
        assert!(s.already_corrected("q", "callers"));
    }
}
