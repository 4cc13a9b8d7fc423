//! Loop state mode-related methods
//!
//! # Mode Enforcement (Phase 9.9)
//!
//! Extension trait for LoopState providing prompt mode classification
//! and tool permission checking.

use crate::llm::router::ToolRouter;
use crate::llm::types::PromptMode;

use super::loop_state_types::LoopState;

/// Extension trait for mode-related LoopState methods
pub trait LoopStateModeExt {
    /// Phase 9.9: Check if tool is allowed in current prompt mode
    fn tool_allowed_in_mode(&self, tool: &str) -> bool;

    /// Phase 9.9: Check if mode has exceeded max tool calls
    fn has_exceeded_max_calls(&self) -> bool;

    /// Phase 9.9: Get current prompt mode
    fn prompt_mode(&self) -> PromptMode;

    /// Phase 9.9: Switch to Presentation mode (after tools complete)
    fn switch_to_presentation_mode(&mut self);
}

impl LoopStateModeExt for LoopState {
    /// Phase 9.9: Check if tool is allowed in current prompt mode
    fn tool_allowed_in_mode(&self, tool: &str) -> bool {
        ToolRouter::tool_allowed_in_mode(tool, self.current_prompt_mode)
    }

    /// Phase 9.9: Check if mode has exceeded max tool calls
    fn has_exceeded_max_calls(&self) -> bool {
        self.tool_calls_in_mode >= self.current_prompt_mode.max_tool_calls()
    }

    /// Phase 9.9: Get current prompt mode
    fn prompt_mode(&self) -> PromptMode {
        self.current_prompt_mode
    }

    /// Phase 9.9: Switch to Presentation mode (after tools complete)
    fn switch_to_presentation_mode(&mut self) {
        self.current_prompt_mode = PromptMode::Presentation;
        self.tool_calls_in_mode = 0;
    }
}
