//! Request construction and router integration (SPEC_FULL.md §4.2):
//! semantic correction, confidence gating, circuit-breaker and
//! semantic-repetition checks, then UCB1 refinement of the router's pick.
//!
//! The teacher's `llm::router::ToolRouter` is a stateless classifier
//! (`classify_prompt_mode` only, no confidence score, no retry/degrade
//! machinery), so the overall call-validate-degrade shape here has no close
//! teacher analogue; `CALLER_PHRASES`/`CALLEE_PHRASES` reuse
//! `tool_forcing.rs`'s own `suggested_search_patterns` phrase-matching idiom
//! for detecting query intent rather than suggesting a retry hint.

use crate::circuit_breaker;
use crate::config::ExecuteConfig;
use crate::crs::{ClauseSource, Variable};
use crate::interfaces::{CodeContextSummary, Event, EventEmitter, Router, RouterError, ToolSpec};
use crate::model::{MetaAction, RouterSelection, RouterTarget, Session, TraceAction, TraceStep};
use crate::semantic::query_similarity;
use crate::ucb1::Ucb1Selector;

/// Phrasing that names the "who calls this" (callers) direction.
const CALLER_PHRASES: &[&str] = &["who calls", "callers of", "what calls", "called by"];
/// Phrasing that names the "what this calls" (callees) direction.
const CALLEE_PHRASES: &[&str] = &["callees of", "calls out to", "what does", "calls into"];

#[derive(Debug, Clone)]
pub struct RequestDecision {
    pub selection: RouterSelection,
    pub degraded: bool,
    pub breaker_fired: bool,
}

/// RPC failures from the router are fatal to the step; the router is the
/// authority and there is no silent fallback to a default tool.
#[derive(Debug, thiserror::Error)]
#[error("router rpc failed: {0}")]
pub struct RouterFatal(pub String);

#[allow(clippy::too_many_arguments)]
pub async fn build_request(
    session: &Session,
    query: &str,
    router: &dyn Router,
    tool_specs: &[ToolSpec],
    code_context: &CodeContextSummary,
    candidates: &[String],
    ucb1: &Ucb1Selector,
    config: &ExecuteConfig,
    metrics: &dyn crate::metrics::MetricsSink,
    emitter: &dyn EventEmitter,
) -> Result<RequestDecision, RouterFatal> {
    let mut selection = router
        .select_tool(query, tool_specs, code_context)
        .await
        .map_err(|e| match e {
            RouterError::Rpc(msg) => RouterFatal(msg),
            RouterError::NotConfigured => RouterFatal("router not configured".to_string()),
        })?;

    selection = apply_semantic_correction(session, query, selection);

    let mut degraded = false;
    if session.context.lock().unwrap().has_tool_results() && selection.confidence < config.confidence_threshold {
        degraded = true;
        metrics.record_counter(crate::metrics::names::ROUTER_FALLBACK, &[]);
        selection = RouterSelection {
            target: RouterTarget::Meta(MetaAction::Answer),
            confidence: selection.confidence,
            reasoning: format!(
                "confidence {:.2} below threshold {:.2} with prior tool results available",
                selection.confidence, config.confidence_threshold
            ),
            duration_ms: selection.duration_ms,
        };
        session.push_trace(
            TraceStep::new(TraceAction::RouterFallback, "degraded-to-answer")
                .with_metadata("reason", "low-confidence"),
        );
    }

    if let RouterTarget::Tool(tool) = &selection.target {
        let tool = tool.clone();

        let semantic_repetition = recent_same_tool_max_similarity(
            session,
            &tool,
            query,
            config.semantic_history_window,
        ) >= config.semantic_similarity_threshold;
        if semantic_repetition {
            emitter.emit(Event::SemanticRepetition {
                tool: tool.clone(),
                similarity: recent_same_tool_max_similarity(session, &tool, query, config.semantic_history_window),
            });
            session.crs.add_clause(
                vec![Variable::Tool(tool.clone())],
                ClauseSource::Hard,
                format!("semantic repetition on '{tool}'"),
            );
        }

        let zero_viable = session.crs.viable_tools(candidates, &Default::default()).is_empty();

        let breaker = circuit_breaker::check_and_fire(
            session,
            &tool,
            config.circuit_breaker_tool_call_limit,
            semantic_repetition,
            zero_viable,
            emitter,
        );
        if breaker.fired {
            return Ok(RequestDecision {
                selection: circuit_breaker::breaker_selection(breaker.reason.unwrap_or_default()),
                degraded,
                breaker_fired: true,
            });
        }

        let decision = ucb1.select(
            session,
            query,
            &selection,
            candidates,
            config.semantic_history_window,
            config.semantic_similarity_threshold,
            metrics,
        );
        selection = match decision.tool {
            Some(refined_tool) => RouterSelection {
                target: RouterTarget::Tool(refined_tool),
                confidence: decision.confidence,
                reasoning: selection.reasoning,
                duration_ms: selection.duration_ms,
            },
            None => RouterSelection {
                target: RouterTarget::Meta(MetaAction::Answer),
                confidence: decision.confidence,
                reasoning: "all candidate tools blocked by constraint store".to_string(),
                duration_ms: selection.duration_ms,
            },
        };
    }

    Ok(RequestDecision { selection, degraded, breaker_fired: false })
}

fn recent_same_tool_max_similarity(session: &Session, tool: &str, query: &str, window: usize) -> f64 {
    session
        .trace_snapshot()
        .iter()
        .rev()
        .filter(|s| s.tool.as_deref() == Some(tool))
        .filter_map(|s| s.metadata.get("query"))
        .take(window)
        .map(|prior| query_similarity(query, prior))
        .fold(0.0_f64, f64::max)
}

fn apply_semantic_correction(session: &Session, query: &str, selection: RouterSelection) -> RouterSelection {
    let tool = match selection.tool_name() {
        Some(t) => t.to_string(),
        None => return selection,
    };
    let lower = query.to_lowercase();
    let names_callers = CALLER_PHRASES.iter().any(|p| lower.contains(p));
    let names_callees = CALLEE_PHRASES.iter().any(|p| lower.contains(p));

    let corrected = if tool == "find_callees" && names_callers && !names_callees {
        Some("find_callers")
    } else if tool == "find_callers" && names_callees && !names_callers {
        Some("find_callees")
    } else {
        None
    };

    let Some(corrected) = corrected else { return selection };
    if session.already_corrected(query, corrected) {
        return selection;
    }
    session.record_semantic_correction(query, corrected);
    session.push_trace(
        TraceStep::new(TraceAction::SemanticCorrection, "direction-correction")
            .with_tool(corrected)
            .with_metadata("query", query)
            .with_metadata("original_tool", tool.as_str()),
    );
    RouterSelection {
        target: RouterTarget::Tool(corrected.to_string()),
        confidence: selection.confidence,
        reasoning: format!("{} (semantically corrected from '{tool}')", selection.reasoning),
        duration_ms: selection.duration_ms,
    }
}
