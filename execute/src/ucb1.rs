//! UCB1 bandit tool selector (SPEC_FULL.md §4.8). Per-session state: scorer,
//! selection counts, a state-key builder, and a generation-keyed cache that
//! self-invalidates whenever the CRS generation advances.

use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::Mutex;

use crate::crs::{Assignment, Crs, Variable};
use crate::metrics::{names, MetricsSink};
use crate::model::{RouterSelection, RouterTarget, Session, TraceAction};
use crate::semantic::query_similarity;

#[derive(Debug, Clone)]
pub struct Ucb1Decision {
    /// `None` means the meta-action `answer` (everything blocked, or forced
    /// zero-viable per unit propagation).
    pub tool: Option<String>,
    pub confidence: f64,
    pub modified: bool,
}

#[derive(Clone)]
struct CachedDecision {
    generation: u64,
    decision: Ucb1DecisionRepr,
}

#[derive(Clone)]
struct Ucb1DecisionRepr {
    tool: Option<String>,
    confidence: f64,
}

#[derive(Default)]
struct Ucb1State {
    selection_counts: HashMap<String, u64>,
    total_selections: u64,
    cache: HashMap<u64, CachedDecision>,
}

pub struct Ucb1Selector {
    state: Mutex<Ucb1State>,
}

impl Default for Ucb1Selector {
    fn default() -> Self {
        Self::new()
    }
}

impl Ucb1Selector {
    pub fn new() -> Self {
        Self { state: Mutex::new(Ucb1State::default()) }
    }

    fn digest_key(session: &Session) -> u64 {
        let mut hasher = std::collections::hash_map::DefaultHasher::new();
        for step in session.trace_snapshot() {
            step.action.hash_discriminant().hash(&mut hasher);
            step.tool.hash(&mut hasher);
        }
        hasher.finish()
    }

    fn build_assignment(session: &Session) -> Assignment {
        let mut assignment = Assignment::default();
        if let Some(last) = session.trace_snapshot().last() {
            if last.error.is_some() {
                assignment.insert(Variable::OutcomeFailure);
            } else {
                assignment.insert(Variable::OutcomeSuccess);
            }
            if let Some(tool) = &last.tool {
                assignment.insert(Variable::PrevTool(tool.clone()));
            }
        }
        assignment
    }

    fn proof_penalty(crs: &Crs, tool: &str) -> f64 {
        crs.proof_number_for(tool) as f64 * 0.1
    }

    fn exploration_bonus(&self, tool: &str) -> f64 {
        let state = self.state.lock().unwrap();
        let count = *state.selection_counts.get(tool).unwrap_or(&0);
        let total = state.total_selections;
        (2.0 * ((total + 1) as f64).ln() / ((count + 1) as f64)).sqrt()
    }

    fn semantic_penalty(session: &Session, tool: &str, query: &str, window: usize, threshold: f64) -> f64 {
        let trace = session.trace_snapshot();
        let recent_queries: Vec<&String> = trace
            .iter()
            .rev()
            .filter(|s| s.tool.as_deref() == Some(tool))
            .filter_map(|s| s.metadata.get("query"))
            .take(window)
            .collect();
        let max_sim = recent_queries
            .iter()
            .map(|q| query_similarity(query, q))
            .fold(0.0_f64, f64::max);
        if max_sim >= threshold {
            max_sim
        } else {
            0.0
        }
    }

    fn record_selection(&self, tool: &str) {
        let mut state = self.state.lock().unwrap();
        *state.selection_counts.entry(tool.to_string()).or_insert(0) += 1;
        state.total_selections += 1;
    }

    #[allow(clippy::too_many_arguments)]
    pub fn select(
        &self,
        session: &Session,
        query: &str,
        router_selection: &RouterSelection,
        candidates: &[String],
        semantic_window: usize,
        semantic_threshold: f64,
        metrics: &dyn MetricsSink,
    ) -> Ucb1Decision {
        let generation = session.crs.generation();
        let key = Self::digest_key(session);

        {
            let state = self.state.lock().unwrap();
            if let Some(cached) = state.cache.get(&key) {
                if cached.generation == generation {
                    metrics.record_counter(names::UCB1_CACHE_HIT, &[]);
                    return Ucb1Decision {
                        tool: cached.decision.tool.clone(),
                        confidence: cached.decision.confidence,
                        modified: cached.decision.tool.as_deref() != router_selection.tool_name(),
                    };
                }
            }
        }
        metrics.record_counter(names::UCB1_CACHE_MISS, &[]);

        let assignment = Self::build_assignment(session);

        if let Some(forced) = session.crs.forced_move(candidates, &assignment) {
            metrics.record_counter(names::UCB1_FORCED_MOVE, &[]);
            self.cache_and_record(key, generation, Some(forced.clone()), 1.0);
            return Ucb1Decision {
                tool: Some(forced.clone()),
                confidence: 1.0,
                modified: Some(forced.as_str()) != router_selection.tool_name(),
            };
        }

        let viable = session.crs.viable_tools(candidates, &assignment);
        if viable.is_empty() {
            metrics.record_counter(names::UCB1_ALL_BLOCKED, &[]);
            self.cache_and_record(key, generation, None, 0.7);
            return Ucb1Decision { tool: None, confidence: 0.7, modified: true };
        }

        let mut best: Option<(String, f64)> = None;
        for tool in &viable {
            let blocked = session.crs.tool_is_blocked(tool, &assignment)
                || Self::semantic_penalty(session, tool, query, semantic_window, semantic_threshold) >= semantic_threshold;
            if blocked {
                metrics.record_counter(names::UCB1_BLOCKED_SELECTION, &[("tool", tool)]);
                continue;
            }
            let router_component = if router_selection.tool_name() == Some(tool.as_str()) {
                router_selection.confidence
            } else {
                0.0
            };
            let score = router_component - Self::proof_penalty(&session.crs, tool) + self.exploration_bonus(tool)
                - Self::semantic_penalty(session, tool, query, semantic_window, semantic_threshold);
            metrics.record_histogram(names::UCB1_SELECTION_SCORE, score, &[("tool", tool)]);
            if best.as_ref().map(|(_, s)| score > *s).unwrap_or(true) {
                best = Some((tool.clone(), score));
            }
        }

        match best {
            Some((tool, _)) => {
                self.record_selection(&tool);
                self.cache_and_record(key, generation, Some(tool.clone()), router_selection.confidence.max(0.5));
                let modified = Some(tool.as_str()) != router_selection.tool_name();
                Ucb1Decision { tool: Some(tool), confidence: router_selection.confidence.max(0.5), modified }
            }
            None => {
                metrics.record_counter(names::UCB1_ALL_BLOCKED, &[]);
                self.cache_and_record(key, generation, None, 0.7);
                Ucb1Decision { tool: None, confidence: 0.7, modified: true }
            }
        }
    }

    fn cache_and_record(&self, key: u64, generation: u64, tool: Option<String>, confidence: f64) {
        let mut state = self.state.lock().unwrap();
        state.cache.insert(key, CachedDecision { generation, decision: Ucb1DecisionRepr { tool, confidence } });
    }
}

trait TraceActionDiscriminant {
    fn hash_discriminant(&self) -> u8;
}

impl TraceActionDiscriminant for TraceAction {
    fn hash_discriminant(&self) -> u8 {
        *self as u8
    }
}

// RouterTarget re-export convenience used by callers building candidate lists.
pub fn router_suggested_tool(selection: &RouterSelection) -> Option<String> {
    match &selection.target {
        RouterTarget::Tool(name) => Some(name.clone()),
        RouterTarget::Meta(_) => None,
    }
}
