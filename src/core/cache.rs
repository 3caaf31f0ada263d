//! In-process response cache shared by the API providers.
//!
//! One cache instance per upstream API, created at startup and handed to the
//! provider; entries live for the process lifetime, which is all the session
//! needs.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Clone)]
pub struct Cache<K, V>
where
    K: Eq + Hash + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    entries: Arc<RwLock<HashMap<K, V>>>,
}

impl<K, V> Cache<K, V>
where
    K: Eq + Hash + Send + Sync,
    V: Clone + Send + Sync,
{
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn get(&self, key: &K) -> Option<V> {
        let entries = self.entries.read().await;
        match entries.get(key) {
            Some(value) => {
                debug!("Cache hit");
                Some(value.clone())
            }
            None => {
                debug!("Cache miss");
                None
            }
        }
    }

    pub async fn put(&self, key: K, value: V) {
        let mut entries = self.entries.write().await;
        entries.insert(key, value);
    }
}

impl<K, V> Default for Cache<K, V>
where
    K: Eq + Hash + Send + Sync,
    V: Clone + Send + Sync,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_cache_round_trip() {
        let cache = Cache::<String, u64>::new();

        assert!(cache.get(&"iphone 15".to_string()).await.is_none());
        cache.put("iphone 15".to_string(), 48_000).await;
        assert_eq!(cache.get(&"iphone 15".to_string()).await, Some(48_000));
    }

    #[tokio::test]
    async fn test_cache_overwrites_existing_key() {
        let cache = Cache::<String, u64>::new();
        cache.put("q".to_string(), 1).await;
        cache.put("q".to_string(), 2).await;
        assert_eq!(cache.get(&"q".to_string()).await, Some(2));
    }
}
