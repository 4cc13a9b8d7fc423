//! Chat compaction (Phase 8.6)
//!
//! Compacts old chat messages into summaries for context folding.
//! Original messages are NEVER deleted — compaction is additive only.

mod graph;
mod logic;

// Re-export all public types and functions
pub use graph::{create_compacted_edge, load_compacted_chat};
pub use logic::{compact_session, mark_messages_compacted, should_compact_session};

use crate::execution_tools::ExecutionDb;

/// Compaction trigger conditions
#[derive(Debug, Clone)]
pub struct CompactionTrigger {
    /// Minimum message count to trigger compaction
    pub min_messages: usize,
    /// Minimum total token count (estimate)
    pub min_tokens: usize,
}

impl Default for CompactionTrigger {
    fn default() -> Self {
        Self {
            min_messages: 50,
            min_tokens: 4000,
        }
    }
}

/// Compaction result
#[derive(Debug, Clone)]
pub struct CompactionResult {
    /// Messages that were compacted
    pub compacted_message_ids: Vec<i64>,
    /// Summary message ID
    pub summary_id: i64,
    /// Session ID
    pub session_id: String,
}

// ExecutionDb impl blocks to preserve original API
impl ExecutionDb {
    /// Check if session should be compacted
    pub fn should_compact_session(
        &self,
        session_id: &str,
        trigger: &CompactionTrigger,
    ) -> anyhow::Result<bool> {
        should_compact_session(self, session_id, trigger)
    }

    /// Compact chat session (placeholder for LLM summarization)
    pub fn compact_session(
        &self,
        session_id: &str,
        num_messages: usize,
    ) -> anyhow::Result<CompactionResult> {
        compact_session(self, session_id, num_messages)
    }

    /// Mark a range of messages as compacted to a summary
    pub fn mark_messages_compacted(
        &self,
        session_id: &str,
        message_ids: &[i64],
        summary_id: i64,
    ) -> anyhow::Result<()> {
        mark_messages_compacted(self, session_id, message_ids, summary_id)
    }

    /// Load compacted view of chat
    pub fn load_compacted_chat(
        &self,
        session_id: &str,
        recent_count: usize,
    ) -> anyhow::Result<Vec<String>> {
        load_compacted_chat(self, session_id, recent_count)
    }
}
