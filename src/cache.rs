use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::Arc;

use crate::clippings::{Clippings, parse_clippings};

/// SHA-256 of the export text, hex encoded.
pub fn content_hash(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}

#[derive(Debug, Clone)]
pub struct CachedParse {
    pub clippings: Arc<Clippings>,
    pub parsed_at: DateTime<Utc>,
}

/// Parse results keyed by content hash. Owned by the caller; the parser never sees it.
#[derive(Debug, Default)]
pub struct ParseCache {
    entries: HashMap<String, CachedParse>,
}

impl ParseCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_parse(&mut self, content: &str) -> Arc<Clippings> {
        let key = content_hash(content);

        if let Some(cached) = self.entries.get(&key) {
            tracing::debug!(key = %key, "parse cache hit");
            return cached.clippings.clone();
        }

        tracing::debug!(key = %key, "parse cache miss");
        let clippings = Arc::new(parse_clippings(content));
        self.entries.insert(
            key,
            CachedParse {
                clippings: clippings.clone(),
                parsed_at: Utc::now(),
            },
        );
        clippings
    }

    pub fn get(&self, key: &str) -> Option<&CachedParse> {
        self.entries.get(key)
    }

    pub fn invalidate(&mut self, key: &str) -> bool {
        let removed = self.entries.remove(key).is_some();
        if removed {
            tracing::debug!(key = %key, "parse cache entry invalidated");
        }
        removed
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPORT: &str = "Book A\n- Your Highlight on Location 1\n\ntext\n==========\n";

    #[test]
    fn test_content_hash_is_stable() {
        assert_eq!(content_hash(EXPORT), content_hash(EXPORT));
        assert_ne!(content_hash(EXPORT), content_hash("other"));
        assert_eq!(content_hash("").len(), 64);
    }

    #[test]
    fn test_same_content_is_parsed_once() {
        let mut cache = ParseCache::new();

        let first = cache.get_or_parse(EXPORT);
        let second = cache.get_or_parse(EXPORT);

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_invalidate_forces_reparse() {
        let mut cache = ParseCache::new();
        let first = cache.get_or_parse(EXPORT);
        let key = content_hash(EXPORT);

        assert!(cache.get(&key).is_some());
        assert!(cache.invalidate(&key));
        assert!(!cache.invalidate(&key));

        let second = cache.get_or_parse(EXPORT);
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(*first, *second);
    }

    #[test]
    fn test_clear() {
        let mut cache = ParseCache::new();
        cache.get_or_parse(EXPORT);
        cache.get_or_parse("");
        assert_eq!(cache.len(), 2);

        cache.clear();
        assert!(cache.is_empty());
    }
}
