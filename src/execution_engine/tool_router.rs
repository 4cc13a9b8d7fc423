//! UI routing rules for tool outputs
//!
//! Defines how tool execution results should be routed based on:
//! - Output kind (text, JSON, structured data)
//! - Tool classification (auto, gated, forbidden)
//! - User intent (read, modify, analyze)
//! - Result size (truncate large outputs)

use std::collections::HashSet;
use serde::{Deserialize, Serialize};

use super::tool_registry::{ToolClassification, ToolRegistry};
use super::output_kind::ToolOutputKind;

/// Routing destination for tool output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoutingDestination {
    /// Inject into chat context (visible to user)
    Chat,
    /// Log to diagnostics only (hidden from user)
    Diagnostics,
    /// Both chat and diagnostics
    Both,
    /// Suppress output (internal use only)
    None,
}

/// User intent for tool invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserIntent {
    /// Reading information
    Read,
    /// Modifying project state
    Modify,
    /// Analyzing codebase
    Analyze,
    /// Debugging/diagnostics
    Debug,
}

/// Routing rule for tool output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingRule {
    /// Tool name pattern (empty = applies to all)
    pub tool_pattern: String,
    /// Output kind to match
    pub output_kind: ToolOutputKind,
    /// Required user intent (None = any intent)
    pub required_intent: Option<UserIntent>,
    /// Minimum result size to trigger truncation (None = no truncation)
    pub truncate_threshold: Option<usize>,
    /// Where to route the output
    pub destination: RoutingDestination,
}

impl RoutingRule {
    /// Create new routing rule
    pub fn new(tool_pattern: impl Into<String>, output_kind: ToolOutputKind) -> Self {
        Self {
            tool_pattern: tool_pattern.into(),
            output_kind,
            required_intent: None,
            truncate_threshold: None,
            destination: RoutingDestination::Chat,
        }
    }

    /// Set required user intent
    pub fn with_intent(mut self, intent: UserIntent) -> Self {
        self.required_intent = Some(intent);
        self
    }

    /// Set truncation threshold
    pub fn with_truncation(mut self, threshold: usize) -> Self {
        self.truncate_threshold = Some(threshold);
        self
    }

    /// Set routing destination
    pub fn with_destination(mut self, dest: RoutingDestination) -> Self {
        self.destination = dest;
        self
    }

    /// Check if rule matches given parameters
    pub fn matches(&self, tool: &str, output_kind: &ToolOutputKind, intent: UserIntent) -> bool {
        // Check tool pattern
        if !self.tool_pattern.is_empty() && !self.tool_matches(tool) {
            return false;
        }

        // Check output kind
        if self.output_kind != *output_kind {
            return false;
        }

        // Check intent
        if let Some(required) = self.required_intent {
            if required != intent {
                return false;
            }
        }

        true
    }

    /// Check if tool name matches pattern
    fn tool_matches(&self, tool: &str) -> bool {
        if self.tool_pattern.is_empty() {
            return true;
        }
        // Simple prefix matching for now
        if self.tool_pattern.ends_with('*') {
            let prefix = &self.tool_pattern[..self.tool_pattern.len() - 1];
            tool.starts_with(prefix)
        } else {
            tool == self.tool_pattern
        }
    }
}

/// Routing configuration
#[derive(Debug, Clone)]
pub struct RoutingConfig {
    /// Maximum output size before truncation
    pub max_output_size: usize,
    /// Whether to show tool names in output
    pub show_tool_names: bool,
    /// Whether to show execution time
    pub show_timing: bool,
    /// Default destination for unmatched tools
    pub default_destination: RoutingDestination,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            max_output_size: 10_000,
            show_tool_names: true,
            show_timing: false,
            default_destination: RoutingDestination::Chat,
        }
    }
}

/// Tool output router
///
/// Determines where and how tool outputs should be presented.
pub struct ToolRouter {
    /// Registry for tool metadata
    registry: ToolRegistry,
    /// Custom routing rules
    rules: Vec<RoutingRule>,
    /// Configuration
    config: RoutingConfig,
}

impl ToolRouter {
    /// Create new router with default rules
    pub fn new() -> Self {
        Self {
            registry: ToolRegistry::new(),
            rules: Self::default_rules(),
            config: RoutingConfig::default(),
        }
    }

    /// Create router with custom registry (for testing)
    #[cfg(test)]
    pub fn with_registry(registry: ToolRegistry) -> Self {
        Self {
            registry,
            rules: Self::default_rules(),
            config: RoutingConfig::default(),
        }
    }

    /// Create empty router (for testing)
    #[cfg(test)]
    pub fn empty() -> Self {
        Self {
            registry: ToolRegistry::empty(),
            rules: Vec::new(),
            config: RoutingConfig::default(),
        }
    }

    /// Build default routing rules
    fn default_rules() -> Vec<RoutingRule> {
        vec![
            // File operations -> Chat (user needs to see files)
            RoutingRule::new("file_*", ToolOutputKind::Textual)
                .with_destination(RoutingDestination::Chat),
            RoutingRule::new("file_*", ToolOutputKind::FileContent)
                .with_destination(RoutingDestination::Chat),
            RoutingRule::new("file_*", ToolOutputKind::Void)
                .with_destination(RoutingDestination::Diagnostics),

            // Search results -> Chat (structured data)
            RoutingRule::new("file_search", ToolOutputKind::Structural)
                .with_destination(RoutingDestination::Chat),
            RoutingRule::new("file_glob", ToolOutputKind::Structural)
                .with_destination(RoutingDestination::Chat),

            // Splice operations -> Chat + Diagnostics
            RoutingRule::new("splice_*", ToolOutputKind::Textual)
                .with_destination(RoutingDestination::Both)
                .with_truncation(5_000),

            // Magellan queries -> Chat (code navigation)
            RoutingRule::new("magellan_*", ToolOutputKind::Structural)
                .with_destination(RoutingDestination::Chat),

            // Compiler diagnostics -> Both
            RoutingRule::new("cargo_check", ToolOutputKind::Error)
                .with_destination(RoutingDestination::Both),

            // Git operations -> Chat (version control visibility)
            RoutingRule::new("git_*", ToolOutputKind::Textual)
                .with_destination(RoutingDestination::Chat),
            RoutingRule::new("git_*", ToolOutputKind::Structural)
                .with_destination(RoutingDestination::Chat),
        ]
    }

    /// Add custom routing rule
    pub fn add_rule(&mut self, rule: RoutingRule) {
        self.rules.push(rule);
    }

    /// Set routing configuration
    pub fn set_config(&mut self, config: RoutingConfig) {
        self.config = config;
    }

    /// Get routing destination for a tool output
    pub fn route(
        &self,
        tool: &str,
        output_kind: &ToolOutputKind,
        intent: UserIntent,
    ) -> RoutingDestination {
        // Check custom rules first
        for rule in &self.rules {
            if rule.matches(tool, output_kind, intent) {
                return rule.destination;
            }
        }

        // Default behavior based on tool classification
        if let Some(meta) = self.registry.get(tool) {
            match meta.classification {
                ToolClassification::Auto => RoutingDestination::Chat,
                ToolClassification::Gated => RoutingDestination::Both,
                ToolClassification::Forbidden => RoutingDestination::None,
            }
        } else {
            self.config.default_destination
        }
    }

    /// Check if output should be truncated
    pub fn should_truncate(&self, tool: &str, output_size: usize) -> bool {
        // Check custom rules
        for rule in &self.rules {
            if rule.tool_matches(tool) {
                if let Some(threshold) = rule.truncate_threshold {
                    return output_size > threshold;
                }
            }
        }

        // Use default config
        output_size > self.config.max_output_size
    }

    /// Truncate output if needed
    pub fn truncate_output(&self, tool: &str, output: &str) -> String {
        if !self.should_truncate(tool, output.len()) {
            return output.to_string();
        }

        let threshold = self.truncation_threshold(tool);
        let truncated = &output[..threshold.min(output.len())];

        format!(
            "{}... [truncated, {} chars total]",
            truncated,
            output.len()
        )
    }

    /// Get truncation threshold for a tool
    fn truncation_threshold(&self, tool: &str) -> usize {
        for rule in &self.rules {
            if rule.tool_matches(tool) {
                if let Some(threshold) = rule.truncate_threshold {
                    return threshold;
                }
            }
        }
        self.config.max_output_size
    }

    /// Check if output should be visible to user
    pub fn is_visible(&self, tool: &str, output_kind: &ToolOutputKind, intent: UserIntent) -> bool {
        matches!(
            self.route(tool, output_kind, intent),
            RoutingDestination::Chat | RoutingDestination::Both
        )
    }

    /// Check if output should go to diagnostics
    pub fn should_log(&self, tool: &str, output_kind: &ToolOutputKind, intent: UserIntent) -> bool {
        matches!(
            self.route(tool, output_kind, intent),
            RoutingDestination::Diagnostics | RoutingDestination::Both
        )
    }

    /// Get all tools that route to chat
    pub fn chat_routed_tools(&self) -> HashSet<String> {
        let mut result = HashSet::new();
        for tool in self.registry.available_tool_names() {
            if self.is_visible(&tool, &ToolOutputKind::Textual, UserIntent::Read) {
                result.insert(tool);
            }
        }
        result
    }

    /// Get all tools that route to diagnostics only
    pub fn diagnostic_only_tools(&self) -> HashSet<String> {
        let mut result = HashSet::new();
        for tool in self.registry.available_tool_names() {
            let dest = self.route(&tool, &ToolOutputKind::Textual, UserIntent::Read);
            if dest == RoutingDestination::Diagnostics {
                result.insert(tool);
            }
        }
        result
    }

    /// Get configuration
    pub fn config(&self) -> &RoutingConfig {
        &self.config
    }
}

impl Default for ToolRouter {
    fn default() -> Self {
        Self::new()
    }
}
