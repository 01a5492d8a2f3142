//! Per-persona caches.
//!
//! Session handles and transcript snapshots are both keyed by persona id
//! and live for the lifetime of the process; entries are overwritten but
//! never invalidated.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory cache keyed by persona id.
pub struct PersonaCache<T: Clone + Send + Sync> {
    entries: Arc<RwLock<HashMap<String, T>>>,
}

impl<T: Clone + Send + Sync> PersonaCache<T> {
    /// Creates a new empty cache.
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Gets the cached value for a persona, if any.
    pub async fn get(&self, persona_id: &str) -> Option<T> {
        let entries = self.entries.read().await;
        entries.get(persona_id).cloned()
    }

    /// Inserts or replaces the cached value for a persona.
    pub async fn insert(&self, persona_id: String, value: T) {
        let mut entries = self.entries.write().await;
        entries.insert(persona_id, value);
    }

    /// Returns whether a persona has a cached value.
    pub async fn contains(&self, persona_id: &str) -> bool {
        let entries = self.entries.read().await;
        entries.contains_key(persona_id)
    }
}

impl<T: Clone + Send + Sync> Default for PersonaCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let cache: PersonaCache<String> = PersonaCache::new();
        assert!(cache.get("p1").await.is_none());
        assert!(!cache.contains("p1").await);
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let cache = PersonaCache::new();
        cache.insert("p1".to_string(), "session-1".to_string()).await;
        assert_eq!(cache.get("p1").await.as_deref(), Some("session-1"));
        assert!(cache.contains("p1").await);
    }

    #[tokio::test]
    async fn test_insert_overwrites() {
        let cache = PersonaCache::new();
        cache.insert("p1".to_string(), vec![1]).await;
        cache.insert("p1".to_string(), vec![1, 2]).await;
        assert_eq!(cache.get("p1").await, Some(vec![1, 2]));
    }
}
