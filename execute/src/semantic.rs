//! Query normalization, Jaccard similarity, and tool-call-looking text
//! detection/stripping. "Term/semantics utilities" in the component budget
//! table (SPEC_FULL.md §2).

use std::collections::HashSet;

/// Normalize a query into a token set: lowercase, split on `_`, `-`, `.`,
/// `/`, and camelCase boundaries; drop tokens shorter than 2 characters.
/// Idempotent: normalizing the joined-and-renormalized tokens yields the
/// same set (SPEC_FULL.md §8).
pub fn normalize_query(query: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    for raw_word in query.split_whitespace() {
        for piece in split_on_delimiters(raw_word) {
            for sub in split_camel_case(&piece) {
                let lower = sub.to_lowercase();
                if lower.chars().filter(|c| c.is_alphanumeric()).count() >= 2 {
                    tokens.push(lower);
                }
            }
        }
    }
    tokens
}

fn split_on_delimiters(word: &str) -> Vec<String> {
    word.split(|c| c == '_' || c == '-' || c == '.' || c == '/')
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

fn split_camel_case(word: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let chars: Vec<char> = word.chars().collect();
    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() && !current.is_empty() {
            let prev_lower = chars[i - 1].is_lowercase();
            let next_lower = chars.get(i + 1).map(|n| n.is_lowercase()).unwrap_or(false);
            if prev_lower || next_lower {
                parts.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }
    if !current.is_empty() {
        parts.push(current);
    }
    parts
}

/// Jaccard similarity between two token sets. `Jaccard(A,A)=1`,
/// `Jaccard(empty,*)=0` (SPEC_FULL.md §8).
pub fn jaccard(a: &[String], b: &[String]) -> f64 {
    let set_a: HashSet<&String> = a.iter().collect();
    let set_b: HashSet<&String> = b.iter().collect();
    if set_a.is_empty() || set_b.is_empty() {
        return 0.0;
    }
    let intersection = set_a.intersection(&set_b).count();
    let union = set_a.union(&set_b).count();
    if union == 0 {
        0.0
    } else {
        intersection as f64 / union as f64
    }
}

pub fn query_similarity(a: &str, b: &str) -> f64 {
    jaccard(&normalize_query(a), &normalize_query(b))
}

/// Known text patterns indicating tool-call-looking output when tools were
/// supposed to be disabled (SPEC_FULL.md §6, case-insensitive).
fn static_patterns() -> &'static [&'static str] {
    &["[tool call(s):", "[tool call:", "calling tool:", "<tool>", "</tool>", "<tool_call>", "</tool_call>", "<function>", "</function>"]
}

pub fn contains_tool_call_pattern(text: &str, known_tools: &[String]) -> bool {
    let lower = text.to_lowercase();
    if static_patterns().iter().any(|p| lower.contains(p)) {
        return true;
    }
    known_tools.iter().any(|tool| {
        let needle = format!("{}(", tool.to_lowercase());
        lower.contains(&needle)
    })
}

/// Regex-strip tool-call-looking patterns, replacing each with a neutral
/// placeholder. Identity on content containing no patterns (SPEC_FULL.md §8).
pub fn strip_tool_call_patterns(text: &str, known_tools: &[String]) -> String {
    let mut result = text.to_string();

    for tool in known_tools {
        let re = regex::Regex::new(&format!(r"(?i)\b{}\([^)]*\)", regex::escape(tool))).unwrap();
        result = re.replace_all(&result, "[Tool call blocked by circuit breaker]").to_string();
    }

    let tag_re = regex::Regex::new(r"(?i)</?tool(_call)?>|</?function>").unwrap();
    result = tag_re.replace_all(&result, "[Tool call blocked by circuit breaker]").to_string();

    let prose_re = regex::Regex::new(r"(?i)\[tool call\(?s?\)?:[^\]]*\]|calling tool:\s*\S+").unwrap();
    result = prose_re.replace_all(&result, "[Tool call blocked by circuit breaker]").to_string();

    result
}
