//! Session-latched circuit breaker (SPEC_FULL.md §4.3). Distinct from the
//! teacher's auto-recovering CLOSED/OPEN/HALF_OPEN breaker in
//! `execution_engine::circuit_breaker` (which this crate does not reuse for
//! its state machine, only for its struct-and-test-density style): this
//! breaker is a one-way latch, reset only at session close.

use crate::crs::{ClauseSource, Variable};
use crate::interfaces::{Event, EventEmitter};
use crate::model::{RouterSelection, RouterTarget, Session};

pub const REASONING_PREFIX: &str = "Circuit breaker:";

#[derive(Debug, Clone)]
pub struct BreakerCheck {
    pub fired: bool,
    pub reason: Option<String>,
}

/// Evaluate whether the breaker should fire for a proposed tool selection.
/// Firing conditions (any one suffices): the tool's proof node is Disproven;
/// the tool has run >= the session's execution-count limit; the
/// semantic-repetition test is positive; or unit propagation leaves zero
/// viable tools.
pub fn check_and_fire(
    session: &Session,
    proposed_tool: &str,
    execution_count_limit: usize,
    semantic_repetition_positive: bool,
    zero_viable_after_propagation: bool,
    emitter: &dyn EventEmitter,
) -> BreakerCheck {
    let disproven = session.crs.proof_status(proposed_tool) == crate::crs::ProofStatus::Disproven;
    let over_limit = session.tool_execution_count(proposed_tool) >= execution_count_limit;

    let (fired, reason) = if disproven {
        (true, format!("{REASONING_PREFIX} tool '{proposed_tool}' is disproven"))
    } else if over_limit {
        (true, format!("{REASONING_PREFIX} tool '{proposed_tool}' exceeded execution limit"))
    } else if semantic_repetition_positive {
        (true, format!("{REASONING_PREFIX} semantic repetition detected for '{proposed_tool}'"))
    } else if zero_viable_after_propagation {
        (true, format!("{REASONING_PREFIX} no viable tools remain after unit propagation"))
    } else {
        (false, String::new())
    };

    if fired {
        session.activate_circuit_breaker();
        session.crs.add_clause(
            vec![Variable::Tool(proposed_tool.to_string())],
            ClauseSource::Hard,
            reason.clone(),
        );
        emitter.emit(Event::CircuitBreaker { reason: reason.clone() });
        BreakerCheck { fired: true, reason: Some(reason) }
    } else {
        BreakerCheck { fired: false, reason: None }
    }
}

/// Build the `answer` meta-action selection returned when the breaker fires.
pub fn breaker_selection(reason: String) -> RouterSelection {
    RouterSelection {
        target: RouterTarget::Meta(crate::model::MetaAction::Answer),
        confidence: 0.8,
        reasoning: reason,
        duration_ms: 0,
    }
}
