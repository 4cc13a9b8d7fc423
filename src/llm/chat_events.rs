//! Chat thread events (Phase 8.6 + Phase 9.0)
//!
//! Events sent from background chat thread to main thread via mpsc::channel.
//! Main thread receives events in event loop, updates UI, persists to DB.
//! Phase 9.0: Added loop events for multi-step tool execution.

use crate::llm::chat::ChatError;
use std::sync::mpsc;

/// Channel sender for chat events
pub type ChatSender = mpsc::Sender<ChatEvent>;
/// Channel receiver for chat events
pub type ChatReceiver = mpsc::Receiver<ChatEvent>;

/// Event sent from chat thread to main thread
#[derive(Debug, Clone)]
pub enum ChatEvent {
    /// Streaming chunk received from LLM
    Chunk { session_id: String, content: String },
    /// LLM response complete (full response available)
    Complete {
        session_id: String,
        full_response: String,
    },
    /// Chat request failed
    Error {
        session_id: String,
        error: ChatError,
    },
    /// Thread spawned (user message sent)
    Started {
        session_id: String,
        user_message: String,
    },
    // Phase 9.0: Multi-step loop events
    /// Loop step started (AUTO tool executing)
    LoopStepStarted {
        session_id: String,
        step: usize,
        tool: String,
    },
    /// Tool call detected in LLM response
    ToolCallDetected {
        session_id: String,
        tool: String,
        category: String,
    },
    /// Tool execution completed (Phase 9.0)
    /// Phase 9.1: Added path for UI synchronization
    ToolResult {
        session_id: String,
        tool: String,
        success: bool,
        preview: String,
        path: Option<String>,
    },
    /// GATED tool requires user approval (Phase 9.0 stub for 9.1)
    /// Phase 9.2: Added affected_path for UI display
    ApprovalRequired {
        session_id: String,
        tool: String,
        args: String,
        affected_path: Option<String>,
    },
    /// Multi-step loop completed (normal termination or max steps)
    LoopComplete {
        session_id: String,
        steps_taken: usize,
        reason: String,
    },
}

impl ChatEvent {
    /// Get session ID for this event
    pub fn session_id(&self) -> &str {
        match self {
            ChatEvent::Chunk { session_id, .. } => session_id,
            ChatEvent::Complete { session_id, .. } => session_id,
            ChatEvent::Error { session_id, .. } => session_id,
            ChatEvent::Started { session_id, .. } => session_id,
            ChatEvent::LoopStepStarted { session_id, .. } => session_id,
            ChatEvent::ToolCallDetected { session_id, .. } => session_id,
            ChatEvent::ToolResult { session_id, .. } => session_id,
            ChatEvent::ApprovalRequired { session_id, .. } => session_id,
            ChatEvent::LoopComplete { session_id, .. } => session_id,
        }
    }

    /// Check if this is a terminal event (ends the thread)
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ChatEvent::Complete { .. } | ChatEvent::Error { .. } | ChatEvent::LoopComplete { .. }
        )
    }

    /// Check if this is a loop event (Phase 9.0)
    pub fn is_loop_event(&self) -> bool {
        matches!(
            self,
            ChatEvent::LoopStepStarted { .. }
                | ChatEvent::ToolCallDetected { .. }
                | ChatEvent::ToolResult { .. }
                | ChatEvent::ApprovalRequired { .. }
                | ChatEvent::LoopComplete { .. }
        )
    }
}
