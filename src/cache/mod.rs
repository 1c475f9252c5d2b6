pub mod keys;

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::{Arc, Mutex};

use serde_json::Value;

use crate::client::ClientError;

/// Composite identity of a cached read: resource name plus the identifiers
/// that scope it, e.g. `QueryKey::new("content-plan", [plan_id])`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    resource: String,
    parts: Vec<String>,
}

impl QueryKey {
    pub fn new<I, S>(resource: &str, parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        Self {
            resource: resource.to_string(),
            parts: parts.into_iter().map(|p| p.to_string()).collect(),
        }
    }

    /// Key with no scoping identifiers, e.g. the organization list.
    pub fn bare(resource: &str) -> Self {
        Self::new(resource, Vec::<String>::new())
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.resource)?;
        for part in &self.parts {
            write!(f, ":{}", part)?;
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
struct CacheSlot {
    // Serializes fetchers for one key: the first requester runs its fetcher
    // under this lock, later requesters find the value on re-check.
    fetch_lock: tokio::sync::Mutex<()>,
    value: Mutex<Option<Value>>,
}

/// Read-through cache keyed by [`QueryKey`].
///
/// Concurrent requesters of one key share a single underlying fetch; a failed
/// fetch caches nothing, so the next read retries. Invalidation drops the
/// entry without triggering a refetch (the accepted staleness window between
/// a mutation's success and the next read).
#[derive(Debug, Default)]
pub struct QueryCache {
    slots: Mutex<HashMap<QueryKey, Arc<CacheSlot>>>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn fetch<F, Fut>(&self, key: QueryKey, fetcher: F) -> Result<Value, ClientError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Value, ClientError>>,
    {
        let slot = {
            let mut slots = self.slots.lock().expect("query cache lock poisoned");
            Arc::clone(slots.entry(key.clone()).or_default())
        };

        if let Some(value) = slot.value.lock().expect("cache slot lock poisoned").clone() {
            return Ok(value);
        }

        let _guard = slot.fetch_lock.lock().await;
        // Another requester may have completed the fetch while we waited.
        if let Some(value) = slot.value.lock().expect("cache slot lock poisoned").clone() {
            return Ok(value);
        }

        tracing::debug!("cache miss, fetching {}", key);
        let value = fetcher().await?;
        *slot.value.lock().expect("cache slot lock poisoned") = Some(value.clone());
        Ok(value)
    }

    /// Drop one entry. The next read of this key issues a fresh fetch.
    pub fn invalidate(&self, key: &QueryKey) {
        let mut slots = self.slots.lock().expect("query cache lock poisoned");
        if slots.remove(key).is_some() {
            tracing::debug!("invalidated {}", key);
        }
    }

    pub fn invalidate_all<'a, I>(&self, keys: I)
    where
        I: IntoIterator<Item = &'a QueryKey>,
    {
        for key in keys {
            self.invalidate(key);
        }
    }

    /// True when a resolved value is cached for this key.
    pub fn contains(&self, key: &QueryKey) -> bool {
        let slots = self.slots.lock().expect("query cache lock poisoned");
        slots
            .get(key)
            .map(|slot| slot.value.lock().expect("cache slot lock poisoned").is_some())
            .unwrap_or(false)
    }
}

/// Serialize a typed payload for caching.
pub fn encode<T: serde::Serialize>(value: &T) -> Result<Value, ClientError> {
    serde_json::to_value(value).map_err(|e| ClientError::Decode(e.to_string()))
}

/// Deserialize a cached payload back to its typed form.
pub fn decode<T: serde::de::DeserializeOwned>(value: Value) -> Result<T, ClientError> {
    serde_json::from_value(value).map_err(|e| ClientError::Decode(e.to_string()))
}

/// Command object for a write: the keys it invalidates are declared up front,
/// in code, so the invalidation graph is statically inspectable instead of
/// scattered across call sites.
#[derive(Debug)]
pub struct Mutation {
    description: String,
    keys: Vec<QueryKey>,
}

impl Mutation {
    pub fn new(description: &str) -> Self {
        Self {
            description: description.to_string(),
            keys: Vec::new(),
        }
    }

    pub fn invalidates(mut self, key: QueryKey) -> Self {
        self.keys.push(key);
        self
    }

    /// The declared invalidation set.
    pub fn keys(&self) -> &[QueryKey] {
        &self.keys
    }

    /// Run the mutation future. On success the declared keys are invalidated,
    /// fire-and-forget; on failure the cache is left untouched.
    pub async fn run<T, Fut>(self, cache: &QueryCache, fut: Fut) -> Result<T, ClientError>
    where
        Fut: Future<Output = Result<T, ClientError>>,
    {
        let result = fut.await?;
        tracing::debug!("mutation '{}' succeeded, invalidating {} keys", self.description, self.keys.len());
        cache.invalidate_all(&self.keys);
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn concurrent_requesters_share_one_fetch() {
        let cache = Arc::new(QueryCache::new());
        let calls = Arc::new(AtomicU32::new(0));
        let key = QueryKey::new("content-plan", ["plan-1"]);

        let fetch = |cache: Arc<QueryCache>, calls: Arc<AtomicU32>, key: QueryKey| async move {
            cache
                .fetch(key, || async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    // Hold the slot long enough for the second requester to pile up.
                    tokio::time::sleep(std::time::Duration::from_millis(25)).await;
                    Ok(json!({"id": "plan-1", "status": "draft"}))
                })
                .await
        };

        let a = tokio::spawn(fetch(Arc::clone(&cache), Arc::clone(&calls), key.clone()));
        let b = tokio::spawn(fetch(Arc::clone(&cache), Arc::clone(&calls), key.clone()));

        let (a, b) = (a.await.unwrap().unwrap(), b.await.unwrap().unwrap());
        assert_eq!(a, b);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn invalidation_forces_a_fresh_fetch() {
        let cache = QueryCache::new();
        let calls = AtomicU32::new(0);
        let key = QueryKey::new("content-plan", ["plan-2"]);

        for _ in 0..2 {
            cache
                .fetch(key.clone(), || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(json!({"status": "review"}))
                })
                .await
                .unwrap();
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1, "second read served from cache");

        cache.invalidate(&key);
        cache
            .fetch(key.clone(), || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(json!({"status": "complete"}))
            })
            .await
            .unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2, "invalidated key refetches");
    }

    #[tokio::test]
    async fn failed_fetch_is_not_cached() {
        let cache = QueryCache::new();
        let calls = AtomicU32::new(0);
        let key = QueryKey::bare("organizations");

        let err = cache
            .fetch(key.clone(), || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(ClientError::Status {
                    status: 503,
                    message: "backend unavailable".to_string(),
                })
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Status { status: 503, .. }));
        assert!(!cache.contains(&key));

        let value = cache
            .fetch(key.clone(), || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(json!([]))
            })
            .await
            .unwrap();
        assert_eq!(value, json!([]));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn mutation_invalidates_only_declared_keys() {
        let cache = QueryCache::new();
        let plan_key = QueryKey::new("content-plan", ["plan-3"]);
        let topics_key = QueryKey::new("suggested-topics", ["plan-3"]);
        let other_key = QueryKey::new("content-plan", ["plan-4"]);

        for key in [&plan_key, &topics_key, &other_key] {
            cache
                .fetch(key.clone(), || async { Ok(json!({"cached": true})) })
                .await
                .unwrap();
        }

        let mutation = Mutation::new("approve topic")
            .invalidates(plan_key.clone())
            .invalidates(topics_key.clone());
        assert_eq!(mutation.keys().len(), 2);

        mutation.run(&cache, async { Ok(()) }).await.unwrap();

        assert!(!cache.contains(&plan_key));
        assert!(!cache.contains(&topics_key));
        assert!(cache.contains(&other_key), "undeclared keys stay cached");
    }

    #[tokio::test]
    async fn failed_mutation_leaves_cache_untouched() {
        let cache = QueryCache::new();
        let key = QueryKey::new("content-plan", ["plan-5"]);
        cache
            .fetch(key.clone(), || async { Ok(json!({"status": "draft"})) })
            .await
            .unwrap();

        let result: Result<(), _> = Mutation::new("update plan")
            .invalidates(key.clone())
            .run(&cache, async {
                Err(ClientError::Status {
                    status: 422,
                    message: "quota exceeded".to_string(),
                })
            })
            .await;

        assert!(result.is_err());
        assert!(cache.contains(&key));
    }
}
