//! Tool-forcing policy (SPEC_FULL.md §4.7): decide whether to push the
//! Responder back toward using a tool, and build the injected hint.
//!
//! The "analytical query" classifier is grounded on
//! `llm::router::ToolRouter::classify_prompt_mode`'s keyword-priority idiom
//! (lowercase, check ordered keyword lists, default to a catch-all mode).

/// Keywords that mark a query as wanting a grounded, evidence-backed answer
/// rather than a conversational one.
const ANALYTICAL_KEYWORDS: &[&str] = &[
    "where is", "find", "locate", "which file", "show me", "list", "search for",
    "look for", "symbol", "reference", "defined in", "used in", "called from",
    "imports", "exports", "who calls", "what calls", "callers of", "callees of",
    "how many", "count", "explain", "why does", "what does",
];

pub fn is_analytical_query(query: &str) -> bool {
    let lower = query.to_lowercase();
    ANALYTICAL_KEYWORDS.iter().any(|k| lower.contains(k))
}

#[allow(clippy::too_many_arguments)]
pub fn should_force(
    query: &str,
    step: usize,
    retry_count: usize,
    max_retries: usize,
    max_step_for_forcing: usize,
    available_tools: &[String],
) -> bool {
    is_analytical_query(query)
        && step <= max_step_for_forcing
        && retry_count < max_retries
        && !available_tools.is_empty()
}

/// Patterns the classifier suggests searching for, derived from the matched
/// analytical keyword itself (a targeted hint beats a generic one).
fn suggested_search_patterns(query: &str) -> Vec<String> {
    let lower = query.to_lowercase();
    let mut patterns = Vec::new();
    for keyword in ["who calls", "what calls", "callers of"] {
        if lower.contains(keyword) {
            patterns.push("find_callers".to_string());
        }
    }
    for keyword in ["callees of", "what does", "calls out to"] {
        if lower.contains(keyword) {
            patterns.push("find_callees".to_string());
        }
    }
    if lower.contains("defined in") || lower.contains("where is") {
        patterns.push("find_symbol".to_string());
    }
    patterns
}

pub fn build_hint(query: &str, available_tools: &[String]) -> String {
    let patterns = suggested_search_patterns(query);
    let relevant: Vec<&String> = patterns.iter().filter(|p| available_tools.contains(p)).collect();
    if relevant.is_empty() {
        "This query needs grounded evidence. Use one of the available tools before answering."
            .to_string()
    } else {
        format!(
            "This looks like a {} question. Consider using: {}.",
            if relevant.len() == 1 { "targeted" } else { "multi-part" },
            relevant.iter().map(|s| s.as_str()).collect::<Vec<_>>().join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analytical_queries_detected() {
        assert!(is_analytical_query("Where is parseConfig defined?"));
        assert!(is_analytical_query("who calls validateInput"));
        assert!(!is_analytical_query("thanks, that's all I needed"));
    }

    #[test]
    fn should_force_respects_step_and_retry_caps() {
        let tools = vec!["find_symbol".to_string()];
        assert!(should_force("find parseConfig", 1, 0, 2, 6, &tools));
        assert!(!should_force("find parseConfig", 10, 0, 2, 6, &tools));
        assert!(!should_force("find parseConfig", 1, 2, 2, 6, &tools));
        assert!(!should_force("find parseConfig", 1, 0, 2, 6, &[]));
    }

    #[test]
    fn non_analytical_query_never_forced() {
        assert!(!should_force("ok thanks", 0, 0, 5, 10, &["find_symbol".to_string()]));
    }

    #[test]
    fn build_hint_targets_callers_query() {
        let tools = vec!["find_callers".to_string()];
        let hint = build_hint("who calls parseConfig", &tools);
        assert!(hint.contains("find_callers"));
    }

    #[test]
    fn build_hint_falls_back_to_generic() {
        let hint = build_hint("who calls parseConfig", &[]);
        assert!(hint.contains("Use one of the available tools"));
    }
}
