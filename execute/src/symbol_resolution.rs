//! Symbol resolution (SPEC_FULL.md §4.11): bare name -> qualified id, via
//! exact id, unique-name, disambiguated-name, then a time-bounded fuzzy
//! search. Out-of-scope collaborator (the symbol index) is a trait; this
//! module owns only the strategy cascade and the per-session cache.

use async_trait::async_trait;
use dashmap::DashMap;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionStrategy {
    ExactId,
    UniqueName,
    DisambiguatedName,
    Fuzzy,
}

#[derive(Debug, Clone)]
pub struct ResolvedSymbol {
    pub id: String,
    pub confidence: f64,
    pub strategy: ResolutionStrategy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolCandidate {
    pub id: String,
    pub name: String,
    pub kind: String,
}

#[derive(Debug, thiserror::Error)]
#[error("symbol not found: {0}")]
pub struct SymbolNotFound(pub String);

/// The underlying code-graph symbol index, an out-of-scope collaborator.
#[async_trait]
pub trait SymbolIndex: Send + Sync {
    async fn lookup_by_id(&self, id: &str) -> Option<SymbolCandidate>;
    async fn lookup_by_name(&self, name: &str) -> Vec<SymbolCandidate>;
    async fn fuzzy_search(&self, name: &str) -> Vec<SymbolCandidate>;
}

pub struct SymbolResolver<I: SymbolIndex> {
    index: I,
    cache: DashMap<String, ResolvedSymbol>,
    fuzzy_deadline: Duration,
}

impl<I: SymbolIndex> SymbolResolver<I> {
    pub fn new(index: I, fuzzy_deadline_ms: u64) -> Self {
        Self { index, cache: DashMap::new(), fuzzy_deadline: Duration::from_millis(fuzzy_deadline_ms) }
    }

    pub async fn resolve(&self, session_id: &str, name: &str) -> Result<ResolvedSymbol, SymbolNotFound> {
        let cache_key = format!("{session_id}:{name}");
        if let Some(hit) = self.cache.get(&cache_key) {
            return Ok(hit.clone());
        }

        if let Some(candidate) = self.index.lookup_by_id(name).await {
            let resolved = ResolvedSymbol { id: candidate.id, confidence: 1.0, strategy: ResolutionStrategy::ExactId };
            self.cache.insert(cache_key, resolved.clone());
            return Ok(resolved);
        }

        let by_name = self.index.lookup_by_name(name).await;
        if by_name.len() == 1 {
            let resolved = ResolvedSymbol {
                id: by_name[0].id.clone(),
                confidence: 0.95,
                strategy: ResolutionStrategy::UniqueName,
            };
            self.cache.insert(cache_key, resolved.clone());
            return Ok(resolved);
        }
        if by_name.len() > 1 {
            if let Some(preferred) = prefer_function_or_method(&by_name) {
                let resolved = ResolvedSymbol {
                    id: preferred.id.clone(),
                    confidence: 0.75,
                    strategy: ResolutionStrategy::DisambiguatedName,
                };
                self.cache.insert(cache_key, resolved.clone());
                return Ok(resolved);
            }
        }

        let fuzzy = tokio::time::timeout(self.fuzzy_deadline, self.index.fuzzy_search(name)).await;
        if let Ok(candidates) = fuzzy {
            if let Some(best) = candidates.first() {
                let resolved = ResolvedSymbol {
                    id: best.id.clone(),
                    confidence: 0.5,
                    strategy: ResolutionStrategy::Fuzzy,
                };
                self.cache.insert(cache_key, resolved.clone());
                return Ok(resolved);
            }
        }

        Err(SymbolNotFound(name.to_string()))
    }
}

fn prefer_function_or_method(candidates: &[SymbolCandidate]) -> Option<&SymbolCandidate> {
    candidates
        .iter()
        .find(|c| c.kind == "function" || c.kind == "method")
        .or_else(|| candidates.first())
}
