//! Stall detector for tool execution loops
//!
//! Detects when the LLM is stuck in a loop with no meaningful progress:
//! - No state change across N steps (same checksums)
//! - Repeating tool call sequences
//! - Identical tool invocations
//!
//! This prevents infinite loops where the LLM keeps calling the same
//! tools without making progress.

use std::collections::{HashMap, HashSet, VecDeque};
use std::path::PathBuf;
use std::fmt;

use super::safety_config::SafetyConfig;

/// Reason for stall detection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StallReason {
    /// No state change detected across multiple steps
    NoStateChange,
    /// Same tools being called in same order (tool loop)
    ToolLoop,
    /// Identical tool calls (same tool + args)
    IdenticalCalls,
}

impl fmt::Display for StallReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StallReason::NoStateChange => write!(f, "No state change across multiple steps"),
            StallReason::ToolLoop => write!(f, "Repeated tool call sequence detected"),
            StallReason::IdenticalCalls => write!(f, "Identical tool calls detected"),
        }
    }
}

/// Snapshot of execution state at a single step
#[derive(Debug, Clone)]
struct StateSnapshot {
    step_number: usize,
    tools_invoked: Vec<String>,
    files_modified: HashSet<PathBuf>,
    checksum: String,
}

impl StateSnapshot {
    fn new(step_number: usize, tools_invoked: Vec<String>, files_modified: HashSet<PathBuf>) -> Self {
        let checksum = Self::compute_checksum_inner(&tools_invoked, &files_modified);

        Self {
            step_number,
            tools_invoked,
            files_modified,
            checksum,
        }
    }

    /// Compute checksum from relevant state
    fn compute_checksum(&self) -> String {
        Self::compute_checksum_inner(&self.tools_invoked, &self.files_modified)
    }

    fn compute_checksum_inner(tools_invoked: &[String], files_modified: &HashSet<PathBuf>) -> String {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();

        // Hash tools in order
        for tool in tools_invoked {
            tool.hash(&mut hasher);
        }

        // Hash modified files (sorted for determinism)
        let mut files: Vec<_> = files_modified.iter().collect();
        files.sort();
        for path in files {
            path.hash(&mut hasher);
        }

        format!("{:x}", hasher.finish())
    }
}

/// Stall detector for execution loops
///
/// Tracks recent state snapshots and detects patterns indicating a stall.
pub struct StallDetector {
    snapshots: VecDeque<StateSnapshot>,
    config: SafetyConfig,
    step_number: usize,
    /// Track identical call signatures: (tool, args_hash) -> count
    call_tracker: HashMap<(String, u64), usize>,
}

impl StallDetector {
    /// Create new stall detector with default configuration
    pub fn new() -> Self {
        Self::with_config(SafetyConfig::default())
    }

    /// Create new stall detector with custom configuration
    pub fn with_config(config: SafetyConfig) -> Self {
        Self {
            snapshots: VecDeque::with_capacity(config.stall_threshold + 1),
            config,
            step_number: 0,
            call_tracker: HashMap::new(),
        }
    }

    /// Record a tool execution step
    ///
    /// Returns `Err(StallReason)` if a stall is detected.
    pub fn record_step(
        &mut self,
        tool: &str,
        args: &HashMap<String, String>,
        files_modified: &[PathBuf],
    ) -> Result<(), StallReason> {
        self.step_number += 1;

        // Check for identical calls
        if let Err(reason) = self.check_identical_call(tool, args) {
            return Err(reason);
        }

        // Build snapshot
        let tools_invoked = vec![tool.to_string()];
        let files_modified_set: HashSet<PathBuf> = files_modified.iter().cloned().collect();
        let snapshot = StateSnapshot::new(self.step_number, tools_invoked, files_modified_set);

        // Add to history
        self.snapshots.push_back(snapshot);

        // Trim to threshold + 1
        while self.snapshots.len() > self.config.stall_threshold + 1 {
            self.snapshots.pop_front();
        }

        // Check for stalls (only if we have enough history)
        if self.snapshots.len() >= self.config.stall_threshold {
            if let Some(reason) = self.detect_stall() {
                return Err(reason);
            }
        }

        Ok(())
    }

    /// Check for identical tool calls
    fn check_identical_call(
        &mut self,
        tool: &str,
        args: &HashMap<String, String>,
    ) -> Result<(), StallReason> {
        // Hash arguments for comparison
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        let mut sorted_args: Vec<_> = args.iter().collect();
        sorted_args.sort_by_key(|(k, _)| *k);
        for (key, value) in sorted_args {
            key.hash(&mut hasher);
            value.hash(&mut hasher);
        }
        let args_hash = hasher.finish();

        let key = (tool.to_string(), args_hash);
        let count = self.call_tracker.entry(key).or_insert(0);
        *count += 1;

        if *count > self.config.max_identical_calls {
            return Err(StallReason::IdenticalCalls);
        }

        Ok(())
    }

    /// Detect stall patterns
    fn detect_stall(&self) -> Option<StallReason> {
        // Check for no state change
        if self.detect_no_state_change() {
            return Some(StallReason::NoStateChange);
        }

        // Check for tool loop
        if self.detect_tool_loop() {
            return Some(StallReason::ToolLoop);
        }

        None
    }

    /// Detect no state change across recent steps
    fn detect_no_state_change(&self) -> bool {
        if self.snapshots.len() < self.config.stall_threshold {
            return false;
        }

        // Get the most recent checksum
        let recent_checksum = &self.snapshots.back().unwrap().checksum;

        // Check if all recent snapshots have the same checksum
        self.snapshots
            .iter()
            .rev()
            .take(self.config.stall_threshold)
            .all(|s| s.checksum == *recent_checksum)
    }

    /// Detect repeating tool call sequence
    ///
    /// Triggers when the same tools are called in the same order across multiple steps.
    /// For example: file_read, file_search, file_read, file_search, file_read, file_search
    fn detect_tool_loop(&self) -> bool {
        if self.snapshots.len() < self.config.stall_threshold {
            return false;
        }

        // Collect the sequence of tools called in each step
        let tool_sequence: Vec<&str> = self
            .snapshots
            .iter()
            .rev()
            .take(self.config.stall_threshold)
            .map(|s| s.tools_invoked.get(0).map(|s| s.as_str()).unwrap_or(""))
            .collect();

        if tool_sequence.is_empty() {
            return false;
        }

        // For a sequence to be a "loop", we need at least 2 distinct tools
        let unique_tools: std::collections::HashSet<_> = tool_sequence.iter().collect();
        if unique_tools.len() < 2 {
            return false;
        }

        // Detect alternating patterns (A, B, A, B, ...)
        // For odd-length sequences ending with A, check if we have A, B, A, B, A
        if tool_sequence.len() >= 3 {
            // Check for 2-cycle: A, B, A, B, A (alternating between 2 tools)
            let first = tool_sequence[0];
            let second = tool_sequence[1];

            if first != second {
                // Check if the sequence alternates between first and second
                let mut alternates = true;
                for (i, &tool) in tool_sequence.iter().enumerate() {
                    let expected = if i % 2 == 0 { first } else { second };
                    if tool != expected {
                        alternates = false;
                        break;
                    }
                }
                if alternates {
                    return true;
                }
            }
        }

        // Detect longer repeating patterns
        for pattern_len in 2..tool_sequence.len() / 2 {
            if tool_sequence.len() % pattern_len != 0 {
                continue;
            }

            let pattern = &tool_sequence[..pattern_len];
            let mut all_match = true;

            for chunk in tool_sequence.chunks(pattern_len) {
                if chunk != pattern {
                    all_match = false;
                    break;
                }
            }

            if all_match {
                return true;
            }
        }

        false
    }

    /// Reset detector state
    ///
    /// Call this when starting a new execution phase or after
    /// user intervention.
    pub fn reset(&mut self) {
        self.snapshots.clear();
        self.step_number = 0;
        self.call_tracker.clear();
    }

    /// Get current step number
    pub fn step_number(&self) -> usize {
        self.step_number
    }

    /// Get number of snapshots in history
    pub fn history_size(&self) -> usize {
        self.snapshots.len()
    }

    /// Check if detector has enough history to detect stalls
    pub fn can_detect(&self) -> bool {
        self.snapshots.len() >= self.config.stall_threshold
    }
}

impl Default for StallDetector {
    fn default() -> Self {
        Self::new()
    }
}
