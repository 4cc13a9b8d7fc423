//! Metrics emission abstracted behind a small sink trait rather than a
//! concrete backend (spec.md §1 treats event emission as out of scope).
//! Grounded on the teacher's `ConfirmationCallback`/`ProgressCallback`
//! test-double pattern in `execution_engine/mod.rs`.

use std::collections::HashMap;

pub trait MetricsSink: Send + Sync {
    fn record_counter(&self, name: &str, labels: &[(&str, &str)]);
    fn record_histogram(&self, name: &str, value: f64, labels: &[(&str, &str)]);
}

pub struct NoopMetricsSink;
impl MetricsSink for NoopMetricsSink {
    fn record_counter(&self, _name: &str, _labels: &[(&str, &str)]) {}
    fn record_histogram(&self, _name: &str, _value: f64, _labels: &[(&str, &str)]) {}
}

#[derive(Debug, Clone)]
pub struct RecordedMetric {
    pub name: String,
    pub value: f64,
    pub labels: HashMap<String, String>,
}

#[derive(Default)]
pub struct RecordingMetricsSink {
    pub metrics: std::sync::Mutex<Vec<RecordedMetric>>,
}

impl MetricsSink for RecordingMetricsSink {
    fn record_counter(&self, name: &str, labels: &[(&str, &str)]) {
        self.push(name, 1.0, labels);
    }

    fn record_histogram(&self, name: &str, value: f64, labels: &[(&str, &str)]) {
        self.push(name, value, labels);
    }
}

impl RecordingMetricsSink {
    fn push(&self, name: &str, value: f64, labels: &[(&str, &str)]) {
        let labels = labels.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        self.metrics.lock().unwrap().push(RecordedMetric { name: name.to_string(), value, labels });
    }

    pub fn count_named(&self, name: &str) -> usize {
        self.metrics.lock().unwrap().iter().filter(|m| m.name == name).count()
    }
}

// Metric name constants, matching spec.md §6 exactly.
pub mod names {
    pub const ROUTER_FALLBACK: &str = "router_fallback";
    pub const ROUTER_HARD_FORCED: &str = "router_hard_forced";
    pub const SEMANTIC_REPETITION: &str = "semantic_repetition";
    pub const UCB1_SCORING_LATENCY: &str = "ucb1_scoring_latency";
    pub const UCB1_CACHE_HIT: &str = "ucb1_cache_hit";
    pub const UCB1_CACHE_MISS: &str = "ucb1_cache_miss";
    pub const UCB1_FORCED_MOVE: &str = "ucb1_forced_move";
    pub const UCB1_ALL_BLOCKED: &str = "ucb1_all_blocked";
    pub const UCB1_BLOCKED_SELECTION: &str = "ucb1_blocked_selection";
    pub const UCB1_SELECTION_SCORE: &str = "ucb1_selection_score";
    pub const CLAUSES_LEARNED: &str = "clauses_learned";
    pub const DECISION_BLOCKED: &str = "decision_blocked";
    pub const ROUTING_DECISION: &str = "routing_decision";
    pub const FALLBACK_BLOCKED: &str = "fallback_blocked";
    pub const BRENT_CYCLES: &str = "brent_cycles";
    pub const SYMBOL_RESOLUTION_DURATION: &str = "symbol_resolution_duration";
    pub const SYMBOL_RESOLUTION_ATTEMPTS: &str = "symbol_resolution_attempts";
    pub const SYMBOL_RESOLUTION_CACHE: &str = "symbol_resolution_cache";
    pub const SYMBOL_RESOLUTION_CONFIDENCE: &str = "symbol_resolution_confidence";
}
