//! The central per-step orchestrator (SPEC_FULL.md §4.1):
//! `execute_step(ctx, deps) -> (NextState, error)`. Wires together request
//! construction, hard-forcing, the Responder call, tool execution, and
//! completion handling. Grounded on
//! `execution_engine::executor::Executor::execute`'s overall dispatch shape
//! (validate authorization and plan id, then per step: notify progress,
//! check precondition, check confirmation, execute, record) generalized
//! from a whole-plan loop to a single step.

use std::collections::HashMap;
use std::sync::Arc;

use crate::completion::{self, CompletionOutcome, GroundingValidator};
use crate::config::ExecuteConfig;
use crate::errors::ExecuteError;
use crate::interfaces::{
    CodeContextSummary, Event, EventEmitter, LLMClient, LlmRequest, Router, ToolSpec,
};
use crate::metrics::MetricsSink;
use crate::model::{
    MetaAction, Message, NextState, Role, RouterSelection, RouterTarget, Session, ToolChoice,
    ToolInvocation, TraceAction, TraceStep,
};
use crate::param_extractor;
use crate::request;
use crate::semantic::contains_tool_call_pattern;
use crate::tool_exec::{self, DirtyFileTracker};

/// Tools whose results, if substantive, should short-circuit straight to a
/// synthesized answer rather than invite further exploratory tool calls.
const GRAPH_TOOLS: &[&str] = &["graph_overview", "find_callers", "find_callees", "explore_package"];

pub struct ExecutionInput<'a> {
    pub query: &'a str,
    pub tool_specs: &'a [ToolSpec],
    pub code_context: CodeContextSummary,
}

pub struct ExecutionDeps<'a> {
    pub llm: &'a dyn LLMClient,
    pub router: Option<&'a dyn Router>,
    pub tool_executor: Option<&'a dyn crate::interfaces::ToolExecutor>,
    pub safety: &'a dyn crate::interfaces::SafetyGate,
    pub dirty_files: &'a dyn DirtyFileTracker,
    pub grounding: &'a dyn GroundingValidator,
    pub emitter: &'a dyn EventEmitter,
    pub metrics: &'a dyn MetricsSink,
    pub ucb1: &'a crate::ucb1::Ucb1Selector,
    pub config: &'a ExecuteConfig,
}

fn validate_deps(session: &Session, deps: &ExecutionDeps) -> Result<(), ExecuteError> {
    if session.id.is_empty() {
        return Err(ExecuteError::InvalidDependencies("session has no id".to_string()));
    }
    if deps.tool_executor.is_none() {
        // Permitted: tool execution simply yields a typed error if attempted.
    }
    Ok(())
}

fn candidate_tool_names(tool_specs: &[ToolSpec]) -> Vec<String> {
    tool_specs.iter().map(|t| t.name.clone()).collect()
}

async fn obtain_selection(
    session: &Session,
    input: &ExecutionInput<'_>,
    candidates: &[String],
    deps: &ExecutionDeps<'_>,
) -> Result<(RouterSelection, bool, bool), ExecuteError> {
    if session.router_configured.load(std::sync::atomic::Ordering::SeqCst) {
        let router = deps.router.ok_or_else(|| {
            ExecuteError::InvalidDependencies("router configured but no router collaborator provided".to_string())
        })?;
        let decision = request::build_request(
            session,
            input.query,
            router,
            input.tool_specs,
            &input.code_context,
            candidates,
            deps.ucb1,
            deps.config,
            deps.metrics,
            deps.emitter,
        )
        .await
        .map_err(|e| ExecuteError::RouterFailed(e.0))?;
        Ok((decision.selection, decision.degraded, decision.breaker_fired))
    } else {
        // Classifier-based fallback: only permitted when the router is unconfigured.
        let is_analytical = crate::tool_forcing::is_analytical_query(input.query);
        let selection = RouterSelection {
            target: if is_analytical && !candidates.is_empty() {
                RouterTarget::Tool(candidates[0].clone())
            } else {
                RouterTarget::Meta(MetaAction::Answer)
            },
            confidence: 0.5,
            reasoning: "router not configured, classifier fallback".to_string(),
            duration_ms: 0,
        };
        Ok((selection, false, false))
    }
}

fn build_llm_request(
    session: &Session,
    input: &ExecutionInput<'_>,
    tool_choice: ToolChoice,
    extra_system_prompt: Option<&str>,
) -> LlmRequest {
    let mut messages = session.history_snapshot();
    if messages.is_empty() {
        messages.push(Message::new(Role::User, input.query));
    }
    let tools = if matches!(tool_choice, ToolChoice::None) { Vec::new() } else { input.tool_specs.to_vec() };
    LlmRequest {
        messages,
        tools,
        max_tokens: 4096,
        tool_choice,
        system_prompt: extra_system_prompt.map(|s| s.to_string()),
    }
}

async fn try_hard_force(
    session: &Session,
    input: &ExecutionInput<'_>,
    selection: &RouterSelection,
    deps: &ExecutionDeps<'_>,
) -> Option<NextState> {
    let tool = selection.tool_name()?;
    if selection.confidence < deps.config.hard_force_confidence_threshold {
        return None;
    }
    let is_semantic_duplicate = session
        .trace_snapshot()
        .iter()
        .rev()
        .filter(|s| s.tool.as_deref() == Some(tool))
        .filter_map(|s| s.metadata.get("query"))
        .take(deps.config.semantic_history_window)
        .any(|prior| crate::semantic::query_similarity(input.query, prior) >= deps.config.semantic_similarity_threshold);
    if is_semantic_duplicate {
        return None;
    }
    let executor = deps.tool_executor?;
    let params = param_extractor::extract_params(tool, input.query).ok()?;
    let invocation = ToolInvocation::new(tool, params);
    let result = tool_exec::execute_tool_call(
        session,
        invocation,
        executor,
        deps.safety,
        deps.dirty_files,
        deps.emitter,
        deps.metrics,
    )
    .await;
    session.push_trace(
        TraceStep::new(TraceAction::ToolCallForced, "hard-forced")
            .with_tool(tool)
            .with_metadata("query", input.query),
    );
    session.context.lock().unwrap().push_tool_result(&result);
    Some(NextState::Execute)
}

#[allow(clippy::too_many_arguments)]
async fn execute_requested_tools(
    session: &Session,
    tool_calls: &[crate::interfaces::LlmToolCall],
    deps: &ExecutionDeps<'_>,
) -> Result<Vec<crate::model::ToolResult>, ExecuteError> {
    let executor = deps.tool_executor.ok_or(ExecuteError::NoToolExecutor)?;
    let summary = tool_calls.iter().map(|c| c.tool.as_str()).collect::<Vec<_>>().join(", ");
    session.push_message(Role::Assistant, format!("I'll use: {summary}"));

    let invocations: Vec<ToolInvocation> = tool_calls
        .iter()
        .map(|c| ToolInvocation::new(c.tool.clone(), c.params.clone()))
        .collect();
    let results = tool_exec::execute_tool_calls_serially(
        session,
        invocations,
        executor,
        deps.safety,
        deps.dirty_files,
        deps.emitter,
        deps.metrics,
    )
    .await;
    let mut context = session.context.lock().unwrap();
    for result in &results {
        context.push_tool_result(result);
    }
    Ok(results)
}

fn forced_synthesis_from_graph_results(
    session: &Session,
    tool_calls: &[crate::interfaces::LlmToolCall],
    results: &[crate::model::ToolResult],
    step: usize,
) -> Option<String> {
    if step < 2 {
        return None;
    }
    let ran_graph_tool = tool_calls.iter().any(|c| GRAPH_TOOLS.contains(&c.tool.as_str()));
    if !ran_graph_tool {
        return None;
    }
    let substantive: Vec<&crate::model::ToolResult> = results.iter().filter(|r| r.success && !r.output_text.is_empty()).collect();
    if substantive.is_empty() {
        return None;
    }
    let mut summary = String::from("Summary of findings:\n");
    for result in substantive {
        summary.push_str(&format!("- {}\n", result.output_text));
    }
    session.push_trace(TraceStep::new(TraceAction::ForcedSynthesis, "post-graph-tool"));
    Some(summary)
}

pub async fn execute_step(
    session: &Arc<Session>,
    input: ExecutionInput<'_>,
    deps: ExecutionDeps<'_>,
) -> Result<NextState, ExecuteError> {
    validate_deps(session, &deps)?;
    let step = session.increment_step();
    let candidates = candidate_tool_names(input.tool_specs);

    let (selection, _degraded, breaker_fired) = obtain_selection(session, &input, &candidates, &deps).await?;

    if selection.is_meta() {
        let mut system_prompt = None;
        if breaker_fired {
            system_prompt = Some(completion::desperation_system_prompt());
        }
        let request = build_llm_request(session, &input, ToolChoice::None, system_prompt);
        let response = deps.llm.complete(request).await.map_err(|e| ExecuteError::LlmFailed(e.to_string()))?;
        return finish_with_responder_reply(session, &input, &response, &ToolChoice::None, None, step, &deps).await;
    }

    if let Some(next) = try_hard_force(session, &input, &selection, &deps).await {
        return Ok(next);
    }

    let has_prior_results = session.context.lock().unwrap().has_tool_results();
    let tool_choice = match selection.tool_name() {
        Some(tool) if !has_prior_results => ToolChoice::Required(tool.to_string()),
        Some(_) => ToolChoice::Auto,
        None => ToolChoice::Auto,
    };

    let request = build_llm_request(session, &input, tool_choice.clone(), None);
    let response = deps.llm.complete(request).await.map_err(|e| ExecuteError::LlmFailed(e.to_string()))?;

    if response.tool_calls.is_empty() {
        if matches!(tool_choice, ToolChoice::None) && contains_tool_call_pattern(&response.content, &candidates) {
            return run_desperation_retry(session, &input, &candidates, &deps).await;
        }
        return finish_with_responder_reply(session, &input, &response, &tool_choice, selection.tool_name(), step, &deps).await;
    }

    let results = execute_requested_tools(session, &response.tool_calls, &deps).await?;

    if let Some(summary) = forced_synthesis_from_graph_results(session, &response.tool_calls, &results, step) {
        session.push_message(Role::Assistant, summary);
        session.push_trace(TraceStep::new(TraceAction::Complete, "forced-synthesis"));
        return Ok(NextState::Complete);
    }

    if step % deps.config.reflection_threshold == 0 && step != 0 {
        return Ok(NextState::Reflect);
    }
    Ok(NextState::Execute)
}

async fn run_desperation_retry(
    session: &Session,
    input: &ExecutionInput<'_>,
    candidates: &[String],
    deps: &ExecutionDeps<'_>,
) -> Result<NextState, ExecuteError> {
    let request = build_llm_request(session, input, ToolChoice::None, Some(completion::desperation_system_prompt()));
    let response = deps.llm.complete(request).await.map_err(|e| ExecuteError::LlmFailed(e.to_string()))?;
    let outcome = completion::desperation_retry_outcome(&response.content, candidates);
    match outcome {
        CompletionOutcome::Complete { text } => {
            session.push_message(Role::Assistant, text);
            session.push_trace(TraceStep::new(TraceAction::Complete, "desperation-retry"));
            Ok(NextState::Complete)
        }
        CompletionOutcome::Retry { .. } => unreachable!("desperation retry never recurses"),
    }
}

async fn finish_with_responder_reply(
    session: &Session,
    input: &ExecutionInput<'_>,
    response: &crate::interfaces::LlmResponse,
    tool_choice_sent: &ToolChoice,
    suggested_tool: Option<&str>,
    step: usize,
    deps: &ExecutionDeps<'_>,
) -> Result<NextState, ExecuteError> {
    let candidates = candidate_tool_names(input.tool_specs);
    let outcome = completion::handle_completion(
        session,
        input.query,
        &response.content,
        tool_choice_sent,
        suggested_tool,
        &candidates,
        step,
        0,
        deps.config.max_tool_forcing_retries,
        deps.config.max_step_for_forcing,
        0,
        deps.config.max_grounding_retries,
        deps.grounding,
    );
    match outcome {
        CompletionOutcome::Complete { .. } => Ok(NextState::Complete),
        CompletionOutcome::Retry { .. } => Ok(NextState::Execute),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interfaces::{
        LlmResponse, LlmToolCall, NoopEventEmitter, ProposedChange, SafetyCheckResult, StubLlmClient, StubRouter,
    };
    use crate::metrics::NoopMetricsSink;
    use async_trait::async_trait;

    struct AllowGate;
    #[async_trait]
    impl crate::interfaces::SafetyGate for AllowGate {
        async fn check(&self, _changes: &[ProposedChange]) -> SafetyCheckResult {
            SafetyCheckResult { blocked: false, reason: None }
        }
    }

    struct EchoExecutor;
    #[async_trait]
    impl crate::interfaces::ToolExecutor for EchoExecutor {
        async fn execute(&self, invocation: &ToolInvocation) -> Result<crate::model::ToolResult, anyhow::Error> {
            Ok(crate::model::ToolResult {
                invocation_id: invocation.id.clone(),
                success: true,
                output: serde_json::Value::Null,
                output_text: format!("{} ran fine", invocation.tool),
                duration_ms: 1,
                tokens: 1,
                cached: false,
                modified_files: vec![],
                error: None,
            })
        }
    }

    fn tool_spec(name: &str) -> ToolSpec {
        ToolSpec {
            name: name.to_string(),
            description: "d".into(),
            best_for: "x".into(),
            use_when: "x".into(),
            avoid_when: "x".into(),
            instead_of: vec![],
            param_names: vec![],
            category: "c".into(),
        }
    }

    #[tokio::test]
    async fn router_rpc_error_is_fatal_to_the_step() {
        let session = Arc::new(Session::new(true));
        let router = StubRouter::new(vec![Err("rpc down".to_string())]);
        let llm = StubLlmClient::new(vec![]);
        let config = ExecuteConfig::permissive();
        let ucb1 = crate::ucb1::Ucb1Selector::new();
        let deps = ExecutionDeps {
            llm: &llm,
            router: Some(&router),
            tool_executor: Some(&EchoExecutor),
            safety: &AllowGate,
            dirty_files: &crate::tool_exec::NoopDirtyFileTracker,
            grounding: &crate::completion::PermissiveGroundingValidator,
            emitter: &NoopEventEmitter,
            metrics: &NoopMetricsSink,
            ucb1: &ucb1,
            config: &config,
        };
        let input = ExecutionInput { query: "find foo", tool_specs: &[], code_context: CodeContextSummary::default() };
        let result = execute_step(&session, input, deps).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn meta_action_answer_completes_without_tool_executor() {
        let session = Arc::new(Session::new(true));
        let router = StubRouter::new(vec![Ok(RouterSelection {
            target: RouterTarget::Meta(MetaAction::Answer),
            confidence: 0.9,
            reasoning: "enough context".into(),
            duration_ms: 1,
        })]);
        let llm = StubLlmClient::new(vec![LlmResponse {
            model: "m".into(),
            content: "Here is the answer, citing [src/lib.rs:10].".into(),
            stop_reason: "stop".into(),
            output_tokens: 10,
            duration_ms: 5,
            tool_calls: vec![],
        }]);
        let config = ExecuteConfig::permissive();
        let ucb1 = crate::ucb1::Ucb1Selector::new();
        let deps = ExecutionDeps {
            llm: &llm,
            router: Some(&router),
            tool_executor: None,
            safety: &AllowGate,
            dirty_files: &crate::tool_exec::NoopDirtyFileTracker,
            grounding: &crate::completion::PermissiveGroundingValidator,
            emitter: &NoopEventEmitter,
            metrics: &NoopMetricsSink,
            ucb1: &ucb1,
            config: &config,
        };
        let input = ExecutionInput { query: "wrap up", tool_specs: &[], code_context: CodeContextSummary::default() };
        let result = execute_step(&session, input, deps).await.unwrap();
        assert_eq!(result, NextState::Complete);
    }

    #[tokio::test]
    async fn tool_calls_are_executed_and_loop_continues() {
        let session = Arc::new(Session::new(true));
        let router = StubRouter::new(vec![Ok(RouterSelection {
            target: RouterTarget::Tool("list_packages".into()),
            confidence: 0.4,
            reasoning: "low confidence".into(),
            duration_ms: 1,
        })]);
        let llm = StubLlmClient::new(vec![LlmResponse {
            model: "m".into(),
            content: String::new(),
            stop_reason: "tool_use".into(),
            output_tokens: 5,
            duration_ms: 5,
            tool_calls: vec![LlmToolCall { tool: "list_packages".into(), params: HashMap::new() }],
        }]);
        let config = ExecuteConfig::permissive();
        let ucb1 = crate::ucb1::Ucb1Selector::new();
        let deps = ExecutionDeps {
            llm: &llm,
            router: Some(&router),
            tool_executor: Some(&EchoExecutor),
            safety: &AllowGate,
            dirty_files: &crate::tool_exec::NoopDirtyFileTracker,
            grounding: &crate::completion::PermissiveGroundingValidator,
            emitter: &NoopEventEmitter,
            metrics: &NoopMetricsSink,
            ucb1: &ucb1,
            config: &config,
        };
        let tools = vec![tool_spec("list_packages")];
        let input = ExecutionInput { query: "list all packages", tool_specs: &tools, code_context: CodeContextSummary::default() };
        let result = execute_step(&session, input, deps).await.unwrap();
        assert_eq!(result, NextState::Execute);
        assert!(session.context.lock().unwrap().has_tool_results());
    }

    #[tokio::test]
    async fn step_zero_never_reflects() {
        let session = Arc::new(Session::new(true));
        let router = StubRouter::new(vec![Ok(RouterSelection {
            target: RouterTarget::Meta(MetaAction::Answer),
            confidence: 0.9,
            reasoning: "r".into(),
            duration_ms: 1,
        })]);
        let llm = StubLlmClient::new(vec![LlmResponse {
            model: "m".into(),
            content: "done, see [a.rs:1]".into(),
            stop_reason: "stop".into(),
            output_tokens: 1,
            duration_ms: 1,
            tool_calls: vec![],
        }]);
        let mut config = ExecuteConfig::permissive();
        config.reflection_threshold = 1;
        let ucb1 = crate::ucb1::Ucb1Selector::new();
        let deps = ExecutionDeps {
            llm: &llm,
            router: Some(&router),
            tool_executor: None,
            safety: &AllowGate,
            dirty_files: &crate::tool_exec::NoopDirtyFileTracker,
            grounding: &crate::completion::PermissiveGroundingValidator,
            emitter: &NoopEventEmitter,
            metrics: &NoopMetricsSink,
            ucb1: &ucb1,
            config: &config,
        };
        let input = ExecutionInput { query: "q", tool_specs: &[], code_context: CodeContextSummary::default() };
        let result = execute_step(&session, input, deps).await.unwrap();
        assert_eq!(result, NextState::Complete);
        assert_eq!(session.current_step(), 1);
    }
}
