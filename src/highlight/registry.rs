//! Fragment-language registry
//!
//! Maps a language id to its ordered rule list. One process-wide registry is
//! shared by default; hosts that want isolation construct their own and pass
//! it through `CartaOptions::registry`.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use super::rules::HighlightRule;

#[derive(Debug, Default)]
pub struct LanguageRegistry {
    languages: RwLock<HashMap<String, Arc<[HighlightRule]>>>,
}

static GLOBAL: OnceLock<Arc<LanguageRegistry>> = OnceLock::new();

impl LanguageRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry
    pub fn global() -> Arc<LanguageRegistry> {
        Arc::clone(GLOBAL.get_or_init(|| Arc::new(LanguageRegistry::new())))
    }

    /// Register (or replace) a fragment language
    pub fn load_custom_language(&self, id: &str, rules: Vec<HighlightRule>) {
        let mut languages = self.languages.write().unwrap_or_else(PoisonError::into_inner);
        languages.insert(id.to_string(), rules.into());
        tracing::debug!("Registered highlight language '{}'", id);
    }

    /// Put `fragments` in front of the rules registered under `id`
    ///
    /// When `id` is not registered yet it is seeded from `base` first. The
    /// read and the write happen under one lock, so concurrent merges never
    /// lose fragments; their relative order is whatever order the merges
    /// acquire the lock in.
    pub fn prepend_fragments(
        &self,
        id: &str,
        fragments: &[HighlightRule],
        base: impl FnOnce() -> Vec<HighlightRule>,
    ) {
        let mut languages = self.languages.write().unwrap_or_else(PoisonError::into_inner);
        let merged: Vec<HighlightRule> = match languages.get(id) {
            Some(existing) => fragments.iter().chain(existing.iter()).cloned().collect(),
            None => fragments.iter().cloned().chain(base()).collect(),
        };
        tracing::debug!(
            "Merged {} fragments into '{}' ({} rules)",
            fragments.len(),
            id,
            merged.len()
        );
        languages.insert(id.to_string(), merged.into());
    }

    pub fn get(&self, id: &str) -> Option<Arc<[HighlightRule]>> {
        let languages = self.languages.read().unwrap_or_else(PoisonError::into_inner);
        languages.get(id).cloned()
    }

    pub fn contains(&self, id: &str) -> bool {
        let languages = self.languages.read().unwrap_or_else(PoisonError::into_inner);
        languages.contains_key(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::rules::rules_from;

    fn kinds(registry: &LanguageRegistry, id: &str) -> Vec<String> {
        registry
            .get(id)
            .map(|rules| rules.iter().map(|r| r.kind.clone()).collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_prepend_seeds_from_base() {
        let registry = LanguageRegistry::new();
        registry.prepend_fragments("md", &rules_from(&[("a", "first")]), || {
            rules_from(&[("b", "base")])
        });
        assert_eq!(kinds(&registry, "md"), vec!["first", "base"]);
    }

    #[test]
    fn test_prepend_ignores_base_once_registered() {
        let registry = LanguageRegistry::new();
        registry.load_custom_language("md", rules_from(&[("b", "existing")]));
        registry.prepend_fragments("md", &rules_from(&[("a", "new")]), || {
            rules_from(&[("c", "unused")])
        });
        assert_eq!(kinds(&registry, "md"), vec!["new", "existing"]);
    }

    #[test]
    fn test_load_custom_language_replaces() {
        let registry = LanguageRegistry::new();
        registry.load_custom_language("x", rules_from(&[("a", "one")]));
        registry.load_custom_language("x", rules_from(&[("a", "two")]));
        assert_eq!(kinds(&registry, "x"), vec!["two"]);
        assert!(registry.contains("x"));
        assert!(!registry.contains("y"));
    }

    #[test]
    fn test_concurrent_prepends_keep_every_fragment() {
        let registry = Arc::new(LanguageRegistry::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || {
                    let kind = format!("k{}", i);
                    let rules = rules_from(&[("z", kind.as_str())]);
                    registry.prepend_fragments("shared", &rules, Vec::new);
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        let mut all = kinds(&registry, "shared");
        all.sort();
        let expected: Vec<String> = (0..8).map(|i| format!("k{}", i)).collect();
        assert_eq!(all, expected);
    }
}
