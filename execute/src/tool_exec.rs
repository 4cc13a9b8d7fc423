//! Tool-call execution (SPEC_FULL.md §4.4): the nine-step per-invocation
//! sequence, processed serially. Grounded on
//! `execution_engine::chat_tool_runner::ChatToolRunner::execute_auto_tool`
//! for the overall check-build-execute-record shape (is_auto_tool, then
//! build_step/extract_affected_path, then invoke the tool, then convert and
//! track the result) and on `crs` for clause learning.

use std::collections::HashMap;

use crate::crs::{ClauseSource, Variable};
use crate::errors::{classify, ErrorCategory};
use crate::interfaces::{
    Event, EventEmitter, ProposedChange, SafetyGate, ToolExecutor,
};
use crate::metrics::{names, MetricsSink};
use crate::model::{Session, ToolInvocation, ToolResult, TraceAction, TraceStep};

const MUTATING_TOOLS_WRITE: &[&str] = &["write_file", "edit_file", "create_file"];
const MUTATING_TOOLS_DELETE: &[&str] = &["delete_file", "remove_file"];
const MUTATING_TOOLS_SHELL: &[&str] = &["run_command", "exec_shell"];

/// Out-of-scope collaborator that reports which source files are stale.
pub trait DirtyFileTracker: Send + Sync {
    fn has_pending_refresh(&self) -> bool;
    fn refresh(&self) -> Result<(), String>;
    fn track_modified(&self, files: &[String]);
}

pub struct NoopDirtyFileTracker;
impl DirtyFileTracker for NoopDirtyFileTracker {
    fn has_pending_refresh(&self) -> bool {
        false
    }
    fn refresh(&self) -> Result<(), String> {
        Ok(())
    }
    fn track_modified(&self, _files: &[String]) {}
}

fn proposed_change_for(invocation: &ToolInvocation) -> Option<ProposedChange> {
    let path = invocation.params.get("path").cloned().unwrap_or_default();
    if MUTATING_TOOLS_WRITE.contains(&invocation.tool.as_str()) {
        Some(ProposedChange::FileWrite { path })
    } else if MUTATING_TOOLS_DELETE.contains(&invocation.tool.as_str()) {
        Some(ProposedChange::FileDelete { path })
    } else if MUTATING_TOOLS_SHELL.contains(&invocation.tool.as_str()) {
        let command = invocation.params.get("command").cloned().unwrap_or_default();
        Some(ProposedChange::ShellCommand { command })
    } else {
        None
    }
}

fn truncate_params(params: &HashMap<String, String>) -> HashMap<String, String> {
    params
        .iter()
        .map(|(k, v)| (k.clone(), v.chars().take(100).collect()))
        .collect()
}

#[allow(clippy::too_many_arguments)]
pub async fn execute_tool_call(
    session: &Session,
    invocation: ToolInvocation,
    executor: &dyn ToolExecutor,
    safety: &dyn SafetyGate,
    dirty_files: &dyn DirtyFileTracker,
    emitter: &dyn EventEmitter,
    metrics: &dyn MetricsSink,
) -> ToolResult {
    // 1. Incremental graph refresh; failures are non-fatal.
    if dirty_files.has_pending_refresh() {
        let _ = dirty_files.refresh();
    }

    // 2. Emit ToolInvocation.
    emitter.emit(Event::ToolInvocation { tool: invocation.tool.clone() });

    // 3. Safety check.
    if let Some(change) = proposed_change_for(&invocation) {
        let check = safety.check(std::slice::from_ref(&change)).await;
        if safety.should_block(&check) {
            let reason = check.reason.clone().unwrap_or_else(|| "blocked by safety gate".to_string());
            let result = ToolResult {
                invocation_id: invocation.id.clone(),
                success: false,
                output: serde_json::Value::Null,
                output_text: String::new(),
                duration_ms: 0,
                tokens: 0,
                cached: false,
                modified_files: Vec::new(),
                error: Some(reason.clone()),
            };
            session.push_trace(
                TraceStep::new(TraceAction::ToolCall, invocation.id.clone())
                    .with_tool(invocation.tool.clone())
                    .with_error(reason.clone())
                    .with_metadata("safety_violation", "true"),
            );
            session.crs.add_clause(
                vec![Variable::Tool(invocation.tool.clone())],
                ClauseSource::Safety,
                format!("safety blocked: {reason}"),
            );
            session.crs.propagate_disproof(&invocation.tool);
            emitter.emit(Event::SafetyCheck { blocked: true });
            return result;
        }
        emitter.emit(Event::SafetyCheck { blocked: false });
    }

    // 4. Execute.
    let start = std::time::Instant::now();
    let outcome = executor.execute(&invocation).await;
    let duration_ms = start.elapsed().as_millis() as u64;

    // 5. Record trace step + emit outcome event.
    let truncated = truncate_params(&invocation.params);
    let result = match outcome {
        Ok(mut result) => {
            result.duration_ms = duration_ms;
            session.push_trace(
                TraceStep::new(TraceAction::ToolCall, invocation.id.clone())
                    .with_tool(invocation.tool.clone())
                    .with_duration(duration_ms)
                    .with_metadata("params", format!("{truncated:?}")),
            );
            emitter.emit(Event::ToolExecuted { tool: invocation.tool.clone() });
            result
        }
        Err(err) => {
            let error_string = err.to_string();
            let category = classify(&error_string);
            session.push_trace(
                TraceStep::new(TraceAction::ToolCall, invocation.id.clone())
                    .with_tool(invocation.tool.clone())
                    .with_duration(duration_ms)
                    .with_error(error_string.clone())
                    .with_metadata("params", format!("{truncated:?}"))
                    .with_metadata("error_category", category.as_str()),
            );
            session.crs.add_clause(
                vec![Variable::Tool(invocation.tool.clone()), Variable::Error(category)],
                ClauseSource::Hard,
                format!("tool error: {error_string}"),
            );
            metrics.record_counter(names::CLAUSES_LEARNED, &[("reason", "tool_error")]);
            emitter.emit(Event::ToolFailed { tool: invocation.tool.clone(), category });
            ToolResult {
                invocation_id: invocation.id.clone(),
                success: false,
                output: serde_json::Value::Null,
                output_text: String::new(),
                duration_ms,
                tokens: 0,
                cached: false,
                modified_files: Vec::new(),
                error: Some(error_string),
            }
        }
    };

    // 6. Update proof number.
    session.crs.update_proof_number(&invocation.tool, result.success);

    // 7. Cycle detector.
    let signature = format!(
        "{}:{}",
        invocation.tool,
        serde_json::to_string(&invocation.params).unwrap_or_default()
    );
    if let Some(cycle) = session.crs.record_step_for_cycle_detection(&invocation.tool, signature) {
        session.crs.add_clause(
            vec![Variable::Tool(invocation.tool.clone())],
            ClauseSource::Hard,
            "cycle detected",
        );
        metrics.record_counter(names::BRENT_CYCLES, &[]);
        emitter.emit(Event::CycleDetected { length: cycle.length });
    }

    // 8. Track modified files.
    if !result.modified_files.is_empty() {
        dirty_files.track_modified(&result.modified_files);
    }

    // 9. Emit ToolResult.
    emitter.emit(Event::ToolResult { tool: invocation.tool.clone(), success: result.success });

    result
}

pub async fn execute_tool_calls_serially(
    session: &Session,
    invocations: Vec<ToolInvocation>,
    executor: &dyn ToolExecutor,
    safety: &dyn SafetyGate,
    dirty_files: &dyn DirtyFileTracker,
    emitter: &dyn EventEmitter,
    metrics: &dyn MetricsSink,
) -> Vec<ToolResult> {
    let mut results = Vec::with_capacity(invocations.len());
    for invocation in invocations {
        results.push(execute_tool_call(session, invocation, executor, safety, dirty_files, emitter, metrics).await);
    }
    results
}
