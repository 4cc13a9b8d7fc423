//! TOOL_CALL parser (Phase 9.0)
//!
//! Extracts and parses TOOL_CALL blocks from LLM responses.
//! Deterministic line-based parser, no YAML dependencies.

use std::collections::HashMap;

/// Maximum length for tool output in preview
pub const MAX_TOOL_OUTPUT_PREVIEW: usize = 200;

/// Tool call extracted from LLM response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCall {
    /// Tool name (e.g., "file_read", "file_search")
    pub tool: String,
    /// Tool arguments (key-value pairs)
    pub args: HashMap<String, String>,
}

/// Tool call parsing errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolCallError {
    /// Missing tool name
    MissingToolName,

    /// Invalid TOOL_CALL format
    InvalidFormat,

    /// Empty tool name
    EmptyToolName,

    /// Missing required argument
    MissingArgument { arg: String },

    /// Tool call is incomplete
    IncompleteToolCall,
}

/// Extract the first TOOL_CALL block from a response
///
/// Returns:
/// - Some(ToolCall, remaining_text) if TOOL_CALL found
/// - None if no TOOL_CALL found (prose response)
///
/// # Format
/// ```text
/// TOOL_CALL:
///   tool: <tool_name>
///   args:
///     <key>: <value>
/// ```
///
/// # Example
/// ```no_run
/// use odincode::llm::tool_call::extract_tool_call;
/// let response = "I'll search for that.\n\nTOOL_CALL:\n  tool: file_search\n  args:\n    pattern: main\n    root: .\n\nDone.";
/// let result = extract_tool_call(response);
/// assert!(result.is_some());
/// ```
pub fn extract_tool_call(response: &str) -> Option<(ToolCall, String)> {
    // Find TOOL_CALL: marker
    let marker = "TOOL_CALL:";
    let marker_pos = response.find(marker)?;

    // Split into tool_call section and remaining text
    let tool_section = &response[marker_pos + marker.len()..];
    let remaining_before = &response[..marker_pos];

    // Find the end of the tool call block
    // Tool call ends at:
    // - End of string
    // - Next TOOL_CALL: (multiple tool calls - only take first)
    // - A blank line followed by non-indented text (prose continuation)
    let tool_call_end = find_tool_call_end(tool_section);

    let tool_call_text = &tool_section[..tool_call_end];
    let remaining_after = &tool_section[tool_call_end..];

    // Parse the tool call
    let tool_call = parse_tool_call_block(tool_call_text).ok()?;

    // Combine remaining text (before + after)
    let remaining_prose = format!("{}{}", remaining_before.trim(), remaining_after.trim());

    Some((tool_call, remaining_prose))
}

/// Find the end of a tool call block
///
/// Returns the byte position where the tool call ends.
fn find_tool_call_end(section: &str) -> usize {
    let mut pos = 0;
    let mut has_blank_line = false;

    for line in section.lines() {
        let line = line.trim_end();
        let line_start = pos;

        // Advance position including newline
        pos += line.len()
            + if pos < section.len() && section.as_bytes()[pos] == b'\n' {
                1
            } else {
                0
            };

        // Check for next TOOL_CALL:
        if line.trim() == "TOOL_CALL:" {
            // Found another tool call, end here
            return line_start;
        }

        // Track blank lines
        if line.is_empty() {
            has_blank_line = true;
            continue;
        }

        // If we have a blank line and now non-indented content, end tool call
        if has_blank_line && !line.starts_with("  ") && !line.is_empty() {
            return line_start;
        }

        // Reset flag if we see indented content
        if line.starts_with("  ") {
            has_blank_line = false;
        }
    }

    // End of string
    pos
}

/// Parse a TOOL_CALL block text
///
/// # Format
/// ```text
///   tool: <tool_name>
///   args:
///     <key>: <value>
/// ```
fn parse_tool_call_block(block: &str) -> Result<ToolCall, ToolCallError> {
    let mut tool_name: Option<String> = None;
    let mut args: HashMap<String, String> = HashMap::new();
    let mut current_key: Option<String> = None;

    for line in block.lines() {
        let line = line.trim();

        // Skip empty lines
        if line.is_empty() {
            continue;
        }

        // Check for tool: line
        if let Some(rest) = line.strip_prefix("tool:") {
            let tool = rest.trim().to_string();
            if tool.is_empty() {
                return Err(ToolCallError::EmptyToolName);
            }
            tool_name = Some(tool);
            continue;
        }

        // Check for args: line (just skip, args follow)
        if line == "args:" {
            continue;
        }

        // Parse argument (key: value)
        if let Some(colon_pos) = line.find(':') {
            let key = line[..colon_pos].trim().to_string();
            let value = line[colon_pos + 1..].trim().to_string();
            current_key = Some(key.clone());
            args.insert(key, value);
        } else if let Some(key) = &current_key {
            // Continuation of multi-line value
            let existing = args.get(key).cloned().unwrap_or_default();
            args.insert(key.clone(), format!("{} {}", existing, line));
        }
    }

    // Validate we got a tool name
    let tool = tool_name.ok_or(ToolCallError::MissingToolName)?;

    // Validate tool is not empty
    if tool.is_empty() {
        return Err(ToolCallError::EmptyToolName);
    }

    Ok(ToolCall { tool, args })
}

/// Check if response contains a TOOL_CALL block
///
/// Returns true if "TOOL_CALL:" marker is present.
pub fn has_tool_call(response: &str) -> bool {
    response.contains("TOOL_CALL:")
}

/// Get tool output preview (truncated)
///
/// Truncates output to MAX_TOOL_OUTPUT_PREVIEW characters.
pub fn truncate_output(output: &str) -> String {
    if output.len() <= MAX_TOOL_OUTPUT_PREVIEW {
        output.to_string()
    } else {
        format!(
            "{}... (truncated, {} total chars)",
            &output[..MAX_TOOL_OUTPUT_PREVIEW],
            output.len()
        )
    }
}

/// Format tool result for context injection
///
/// Returns a formatted string like:
/// ```text
/// [SYSTEM TOOL RESULT]
/// Tool: file_search
/// Status: success
/// Output: Found 3 matches...
/// ```
pub fn format_tool_result(tool: &str, success: bool, output: &str) -> String {
    let status = if success { "success" } else { "error" };
    let truncated = truncate_output(output);
    format!(
        "[SYSTEM TOOL RESULT]\nTool: {}\nStatus: {}\nOutput: {}\n",
        tool, status, truncated
    )
}
