//! Error taxonomy and the top-level execution-loop error type.

use thiserror::Error;

/// Coarse error category used both for user-visible reporting and for
/// building CDCL `error:CATEGORY` literals (see `crs::clause_store`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorCategory {
    ToolNotFound,
    InvalidParams,
    Timeout,
    RateLimited,
    Permission,
    Network,
    Internal,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::ToolNotFound => "ToolNotFound",
            ErrorCategory::InvalidParams => "InvalidParams",
            ErrorCategory::Timeout => "Timeout",
            ErrorCategory::RateLimited => "RateLimited",
            ErrorCategory::Permission => "Permission",
            ErrorCategory::Network => "Network",
            ErrorCategory::Internal => "Internal",
        }
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify an error message into a category via substring matching.
///
/// Priority order matches the spec exactly: ToolNotFound, InvalidParams,
/// Timeout, RateLimited, Permission, Network, then Internal as the default.
pub fn classify(message: &str) -> ErrorCategory {
    let m = message.to_lowercase();

    const NOT_FOUND: &[&str] = &["not found", "no such file", "does not exist", "enoent"];
    const INVALID: &[&str] = &["invalid param", "invalid argument", "missing required", "einval"];
    const TIMEOUT: &[&str] = &["timeout", "timed out", "deadline", "i/o timeout", "context deadline"];
    const RATE_LIMITED: &[&str] = &["rate limit", "too many requests", "429"];
    const PERMISSION: &[&str] = &["permission", "access denied", "forbidden", "eperm", "eacces"];
    const NETWORK: &[&str] = &["network", "connection", "eof", "broken pipe", "reset by peer"];

    if NOT_FOUND.iter().any(|p| m.contains(p)) {
        return ErrorCategory::ToolNotFound;
    }
    if INVALID.iter().any(|p| m.contains(p)) {
        return ErrorCategory::InvalidParams;
    }
    if TIMEOUT.iter().any(|p| m.contains(p)) {
        return ErrorCategory::Timeout;
    }
    if RATE_LIMITED.iter().any(|p| m.contains(p)) {
        return ErrorCategory::RateLimited;
    }
    if PERMISSION.iter().any(|p| m.contains(p)) {
        return ErrorCategory::Permission;
    }
    if NETWORK.iter().any(|p| m.contains(p)) {
        return ErrorCategory::Network;
    }
    ErrorCategory::Internal
}

/// Top-level error type returned by the execution loop.
#[derive(Debug, Error)]
pub enum ExecuteError {
    #[error("invalid execution dependencies: {0}")]
    InvalidDependencies(String),

    #[error("router error: {0}")]
    RouterFailed(String),

    #[error("llm client error: {0}")]
    LlmFailed(String),

    #[error("tool executor not configured but a tool call was required")]
    NoToolExecutor,

    #[error("tool execution error: tool={tool} error={error}")]
    ToolFailed { tool: String, error: String },

    #[error("symbol not found: {0}")]
    SymbolNotFound(String),

    #[error("cancelled")]
    Cancelled,

    #[error("internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_tool_not_found() {
        assert_eq!(classify("Error: file not found"), ErrorCategory::ToolNotFound);
        assert_eq!(classify("ENOENT: no such file or directory"), ErrorCategory::ToolNotFound);
    }

    #[test]
    fn classifies_timeout_before_network() {
        // "connection" appears nowhere, but ensure timeout-specific strings win.
        assert_eq!(classify("operation timed out"), ErrorCategory::Timeout);
        assert_eq!(classify("context deadline exceeded"), ErrorCategory::Timeout);
    }

    #[test]
    fn classifies_rate_limited() {
        assert_eq!(classify("429 too many requests"), ErrorCategory::RateLimited);
    }

    #[test]
    fn classifies_permission() {
        assert_eq!(classify("permission denied"), ErrorCategory::Permission);
        assert_eq!(classify("EACCES"), ErrorCategory::Permission);
    }

    #[test]
    fn classifies_network() {
        assert_eq!(classify("connection reset by peer"), ErrorCategory::Network);
    }

    #[test]
    fn defaults_to_internal() {
        assert_eq!(classify("something unexpected happened"), ErrorCategory::Internal);
    }

    #[test]
    fn priority_order_not_found_before_invalid() {
        // Contains both "not found" and nothing invalid-specific; should be ToolNotFound.
        assert_eq!(classify("argument file not found"), ErrorCategory::ToolNotFound);
    }
}
