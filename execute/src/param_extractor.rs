//! Deterministic per-tool parameter extraction (SPEC_FULL.md §4.9), used by
//! the hard-forcing path so the Responder can be bypassed entirely.
//!
//! Grounded on `execution_engine::chat_tool_runner::{build_step,
//! extract_affected_path}`: small, tool-specific, fallible extraction from a
//! query/args map with no LLM involvement.

use std::collections::HashMap;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error("no extractable parameters for tool '{0}'")]
    NotImplementable(String),
    #[error("could not find a package token in query")]
    MissingPackageToken,
}

pub fn extract_params(tool: &str, query: &str) -> Result<HashMap<String, String>, ExtractError> {
    match tool {
        "list_packages" => Ok(HashMap::new()),
        "graph_overview" => {
            let mut params = HashMap::new();
            params.insert("depth".to_string(), "2".to_string());
            params.insert("include_dependencies".to_string(), "true".to_string());
            params.insert("include_metrics".to_string(), "true".to_string());
            Ok(params)
        }
        "explore_package" => {
            let package = find_package_token(query).ok_or(ExtractError::MissingPackageToken)?;
            let mut params = HashMap::new();
            params.insert("package".to_string(), package);
            Ok(params)
        }
        "find_entry_points" => Ok(HashMap::new()),
        other => Err(ExtractError::NotImplementable(other.to_string())),
    }
}

fn find_package_token(query: &str) -> Option<String> {
    let words: Vec<&str> = query.split_whitespace().collect();
    for (i, word) in words.iter().enumerate() {
        if word.eq_ignore_ascii_case("package") {
            if let Some(next) = words.get(i + 1) {
                return Some(trim_punctuation(next));
            }
        }
    }
    words
        .iter()
        .find(|w| w.contains('/'))
        .map(|w| trim_punctuation(w))
}

fn trim_punctuation(word: &str) -> String {
    word.trim_matches(|c: char| !c.is_alphanumeric() && c != '/' && c != '_' && c != '-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_packages_has_no_params() {
        assert_eq!(extract_params("list_packages", "list all packages").unwrap(), HashMap::new());
    }

    #[test]
    fn graph_overview_has_fixed_defaults() {
        let params = extract_params("graph_overview", "show me the graph").unwrap();
        assert_eq!(params.get("depth"), Some(&"2".to_string()));
        assert_eq!(params.get("include_dependencies"), Some(&"true".to_string()));
        assert_eq!(params.get("include_metrics"), Some(&"true".to_string()));
    }

    #[test]
    fn explore_package_finds_word_after_package_keyword() {
        let params = extract_params("explore_package", "explore package odincode-core please").unwrap();
        assert_eq!(params.get("package"), Some(&"odincode-core".to_string()));
    }

    #[test]
    fn explore_package_falls_back_to_slash_token() {
        let params = extract_params("explore_package", "look at crates/odincode-core now").unwrap();
        assert_eq!(params.get("package"), Some(&"crates/odincode-core".to_string()));
    }

    #[test]
    fn explore_package_errors_without_token() {
        let result = extract_params("explore_package", "explore something vague");
        assert_eq!(result, Err(ExtractError::MissingPackageToken));
    }

    #[test]
    fn find_entry_points_has_defaults() {
        assert_eq!(extract_params("find_entry_points", "entry points?").unwrap(), HashMap::new());
    }

    #[test]
    fn unknown_tool_not_implementable() {
        let result = extract_params("grep_codebase", "find X");
        assert_eq!(result, Err(ExtractError::NotImplementable("grep_codebase".to_string())));
    }
}
