//! Constraint-Recording Subsystem: proof index + clause store + cycle
//! detector, single-writer per session behind a mutex, with a
//! generation-tagged read-only snapshot for the UCB1 selector.

pub mod clause_store;
pub mod cycle_detector;
pub mod proof_index;

pub use clause_store::{Assignment, Clause, ClauseSource, ClauseStore, Variable};
pub use cycle_detector::{CycleDetector, CycleInfo};
pub use proof_index::{ProofIndex, ProofStatus};

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

struct CrsInner {
    proof_index: ProofIndex,
    clause_store: ClauseStore,
    cycle_detector: CycleDetector,
}

/// A read-only, generation-tagged view used by the UCB1 cache to detect
/// staleness without explicit eviction (SPEC_FULL.md §9).
#[derive(Clone)]
pub struct CrsSnapshot {
    pub generation: u64,
}

pub struct Crs {
    inner: Mutex<CrsInner>,
    generation: AtomicU64,
}

impl Crs {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(CrsInner {
                proof_index: ProofIndex::new(),
                clause_store: ClauseStore::new(),
                cycle_detector: CycleDetector::new(),
            }),
            generation: AtomicU64::new(0),
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    fn bump_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn snapshot(&self) -> CrsSnapshot {
        CrsSnapshot { generation: self.generation() }
    }

    pub fn update_proof_number(&self, tool: &str, success: bool) {
        let gen = self.bump_generation();
        self.inner.lock().unwrap().proof_index.update(tool, success, gen);
    }

    pub fn propagate_disproof(&self, tool: &str) {
        let gen = self.bump_generation();
        self.inner.lock().unwrap().proof_index.disprove(tool, gen);
    }

    pub fn proof_status(&self, tool: &str) -> ProofStatus {
        self.inner.lock().unwrap().proof_index.status(tool)
    }

    pub fn proof_number_for(&self, tool: &str) -> u64 {
        self.inner.lock().unwrap().proof_index.proof_number(tool)
    }

    pub fn add_parent(&self, tool: &str, parent_tool: &str) {
        self.inner.lock().unwrap().proof_index.add_parent(tool, parent_tool);
    }

    pub fn add_clause(&self, forbidden: Vec<Variable>, source: ClauseSource, label: impl Into<String>) {
        self.bump_generation();
        self.inner.lock().unwrap().clause_store.add_clause(forbidden, source, label);
    }

    pub fn viable_tools(&self, candidates: &[String], base: &Assignment) -> Vec<String> {
        self.inner.lock().unwrap().clause_store.viable_tools(candidates, base)
    }

    pub fn forced_move(&self, candidates: &[String], base: &Assignment) -> Option<String> {
        self.inner.lock().unwrap().clause_store.forced_move(candidates, base)
    }

    pub fn tool_is_blocked(&self, tool: &str, base: &Assignment) -> bool {
        self.inner.lock().unwrap().clause_store.tool_is_blocked(tool, base)
    }

    /// Feed one step's signature into the cycle detector. Returns the
    /// detected cycle, if any, and disproves the offending tool so the
    /// *next* selection sees the circuit breaker fire (current step still
    /// commits, per SPEC_FULL.md §9).
    pub fn record_step_for_cycle_detection(&self, tool: &str, signature: impl Into<String>) -> Option<CycleInfo> {
        let found = self.inner.lock().unwrap().cycle_detector.record_step(signature);
        if found.is_some() {
            self.propagate_disproof(tool);
        }
        found
    }

    pub fn clause_count(&self) -> usize {
        self.inner.lock().unwrap().clause_store.clauses().len()
    }
}

impl Default for Crs {
    fn default() -> Self {
        Self::new()
    }
}
