//! Chat persistence (Phase 8.6)
//!
//! Persists chat sessions and messages to SQLite + SQLiteGraph.
//! All persistence happens on main thread, NOT in chat thread.

mod graph;
mod message;
mod schema;
mod session;

// Re-export all public types
pub use graph::{create_chat_message_graph_entity, create_chat_session_graph_entity};
pub use message::{load_chat_session, persist_assistant_message, persist_user_message};
pub use schema::init_chat_schema;
pub use session::{complete_chat_session, create_chat_session, load_chat_sessions};

use crate::execution_tools::ExecutionDb;

/// Chat message role for persistence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Assistant,
}

/// Chat session record
#[derive(Debug, Clone)]
pub struct ChatSession {
    pub session_id: String,
    pub start_time: i64,
    pub end_time: Option<i64>,
    pub message_count: i32,
    pub compacted: bool,
}

/// Chat message record
#[derive(Debug, Clone)]
pub struct ChatMessageRecord {
    pub id: i64,
    pub session_id: String,
    pub role: ChatRole,
    pub content: String,
    pub timestamp: i64,
}

// ExecutionDb impl blocks to preserve original API
impl ExecutionDb {
    /// Initialize chat persistence schema
    pub fn init_chat_schema(&self) -> anyhow::Result<()> {
        init_chat_schema(self)
    }

    /// Create a new chat session
    pub fn create_chat_session(&self, session_id: &str) -> anyhow::Result<()> {
        create_chat_session(self, session_id)
    }

    /// Mark chat session as complete
    pub fn complete_chat_session(&self, session_id: &str) -> anyhow::Result<()> {
        complete_chat_session(self, session_id)
    }

    /// Load all chat sessions
    pub fn load_chat_sessions(&self) -> anyhow::Result<Vec<ChatSession>> {
        load_chat_sessions(self)
    }

    /// Persist user message to SQLite
    pub fn persist_user_message(&self, session_id: &str, content: &str) -> anyhow::Result<i64> {
        persist_user_message(self, session_id, content)
    }

    /// Persist assistant message to SQLite
    pub fn persist_assistant_message(
        &self,
        session_id: &str,
        content: &str,
    ) -> anyhow::Result<i64> {
        persist_assistant_message(self, session_id, content)
    }

    /// Load all chat messages for a session
    pub fn load_chat_session(&self, session_id: &str) -> anyhow::Result<Vec<ChatMessageRecord>> {
        load_chat_session(self, session_id)
    }
}
