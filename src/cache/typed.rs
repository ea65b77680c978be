//! Generic per-kind cache over the shared key-value backend.

use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;

use futures::future::join_all;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::cache::{CacheConnection, CacheError, CacheOp};

/// Cache for one entity kind, keyed `"{kind}:{id}"`.
///
/// Values are stored as JSON with the connection's TTL. No operation ever
/// returns an error: backend and payload problems go to the connection's
/// observer and degrade to a miss or a no-op.
pub struct TypedCache<T> {
    kind: Arc<str>,
    conn: CacheConnection,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for TypedCache<T> {
    fn clone(&self) -> Self {
        Self {
            kind: Arc::clone(&self.kind),
            conn: self.conn.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T> TypedCache<T> {
    /// `kind` is used verbatim as the key prefix.
    pub fn new(kind: impl Into<Arc<str>>, conn: CacheConnection) -> Self {
        Self {
            kind: kind.into(),
            conn,
            _marker: PhantomData,
        }
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn key(&self, id: impl Into<i64>) -> String {
        format!("{}:{}", self.kind, id.into())
    }

    pub fn is_enabled(&self) -> bool {
        self.conn.is_enabled()
    }

    /// Flushes the entire backend keyspace, every kind included.
    pub async fn clear_cache(&self) {
        let Some(store) = self.conn.store() else {
            self.conn.observer().on_disabled(&self.kind, CacheOp::Clear);
            return;
        };

        if let Err(e) = store.flush_all().await {
            self.conn
                .observer()
                .on_failure(&self.kind, CacheOp::Clear, None, &e);
        }
    }

    pub async fn invalidate_cache(&self, id: impl Into<i64>) {
        let id = id.into();
        let Some(store) = self.conn.store() else {
            self.conn
                .observer()
                .on_disabled(&self.kind, CacheOp::Invalidate);
            return;
        };

        if let Err(e) = store.delete(&self.key(id)).await {
            self.conn
                .observer()
                .on_failure(&self.kind, CacheOp::Invalidate, Some(id), &e);
        }
    }
}

impl<T> TypedCache<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Stores `value`, overwriting any entry and resetting its TTL.
    pub async fn set_cache(&self, id: impl Into<i64>, value: &T) {
        let id = id.into();
        let observer = self.conn.observer();
        let Some(store) = self.conn.store() else {
            observer.on_disabled(&self.kind, CacheOp::Set);
            return;
        };

        let payload = match serde_json::to_string(value) {
            Ok(payload) => payload,
            Err(e) => {
                let err = CacheError::Serialization(e.to_string());
                observer.on_failure(&self.kind, CacheOp::Set, Some(id), &err);
                return;
            }
        };

        if let Err(e) = store
            .set(&self.key(id), payload, self.conn.ttl_seconds())
            .await
        {
            observer.on_failure(&self.kind, CacheOp::Set, Some(id), &e);
        }
    }

    /// `None` on absence, when disabled, and on any backend or parse failure.
    pub async fn get_cache(&self, id: impl Into<i64>) -> Option<T> {
        let id = id.into();
        let observer = self.conn.observer();
        let Some(store) = self.conn.store() else {
            observer.on_disabled(&self.kind, CacheOp::Get);
            return None;
        };

        let raw = match store.get(&self.key(id)).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                observer.on_miss(&self.kind, id);
                return None;
            }
            Err(e) => {
                observer.on_failure(&self.kind, CacheOp::Get, Some(id), &e);
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => {
                observer.on_hit(&self.kind, id);
                Some(value)
            }
            Err(e) => {
                let err = CacheError::Deserialization(e.to_string());
                observer.on_failure(&self.kind, CacheOp::Get, Some(id), &err);
                None
            }
        }
    }

    /// Best-effort concurrent `set_cache` for rows returned by a list query.
    pub async fn populate<'a, K, I>(&self, items: I)
    where
        T: 'a,
        K: Into<i64>,
        I: IntoIterator<Item = (K, &'a T)>,
    {
        if !self.is_enabled() {
            self.conn.observer().on_disabled(&self.kind, CacheOp::Set);
            return;
        }

        join_all(
            items
                .into_iter()
                .map(|(id, value)| self.set_cache(id, value)),
        )
        .await;
    }

    /// Cached value if present, otherwise `loader`'s result, written through
    /// when it is `Some`. Loader errors propagate; cache errors never do.
    ///
    /// The load and the write-back are not atomic with writers. An
    /// invalidation that lands while `loader` runs is overwritten by the
    /// value the loader read, and that value stays until the TTL expires or
    /// the key is invalidated again (last write wins).
    pub async fn read_through<F, Fut, E>(&self, id: impl Into<i64>, loader: F) -> Result<Option<T>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Option<T>, E>>,
    {
        let id = id.into();
        if let Some(hit) = self.get_cache(id).await {
            return Ok(Some(hit));
        }

        let loaded = loader().await?;
        if let Some(value) = &loaded {
            self.set_cache(id, value).await;
        }
        Ok(loaded)
    }
}


#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use proptest::prelude::*;
    use serde::Deserialize;

    use super::test_support::{FailingStore, RecordingObserver};
    use super::*;
    use crate::cache::{KeyValueStore, MemoryStore};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Dish {
        id: i32,
        name: String,
    }

    fn dish(id: i32, name: &str) -> Dish {
        Dish {
            id,
            name: name.to_string(),
        }
    }

    fn memory_cache(kind: &str) -> (TypedCache<Dish>, Arc<MemoryStore>, Arc<RecordingObserver>) {
        let store = Arc::new(MemoryStore::new(100, 3600));
        let observer = Arc::new(RecordingObserver::default());
        let conn = CacheConnection::new(Some(store.clone()), observer.clone(), 3600);
        (TypedCache::new(kind, conn), store, observer)
    }

    fn disabled_cache() -> (TypedCache<Dish>, Arc<RecordingObserver>) {
        let observer = Arc::new(RecordingObserver::default());
        let conn = CacheConnection::new(None, observer.clone(), 3600);
        (TypedCache::new("recipe", conn), observer)
    }

    fn failing_cache() -> (TypedCache<Dish>, Arc<RecordingObserver>) {
        let observer = Arc::new(RecordingObserver::default());
        let conn = CacheConnection::new(Some(Arc::new(FailingStore)), observer.clone(), 3600);
        (TypedCache::new("recipe", conn), observer)
    }

    #[test]
    fn test_key_format() {
        let (cache, _, _) = memory_cache("recipe");
        assert_eq!(cache.key(42), "recipe:42");
        assert_eq!(cache.key(-7), "recipe:-7");
        assert_eq!(cache.key(i64::MAX), format!("recipe:{}", i64::MAX));

        let (images, _, _) = memory_cache("RecipeImage");
        assert_eq!(images.key(3), "RecipeImage:3");
    }

    proptest! {
        #[test]
        fn prop_key_is_injective(a in any::<i64>(), b in any::<i64>()) {
            let cache: TypedCache<Dish> = TypedCache::new("recipeDetail", CacheConnection::disabled());
            prop_assert_eq!(cache.key(a) == cache.key(b), a == b);
        }

        #[test]
        fn prop_key_round_trips_id(id in any::<i64>()) {
            let cache: TypedCache<Dish> = TypedCache::new("region", CacheConnection::disabled());
            let key = cache.key(id);
            let suffix = key.strip_prefix("region:").expect("prefix");
            prop_assert_eq!(suffix.parse::<i64>().unwrap(), id);
        }
    }

    #[tokio::test]
    async fn test_set_then_get_round_trip() {
        let (cache, store, _) = memory_cache("recipe");
        let value = dish(42, "Pad Thai");

        cache.set_cache(42, &value).await;

        assert_eq!(cache.get_cache(42).await, Some(value));
        let raw = store.get("recipe:42").await.unwrap().unwrap();
        assert_eq!(raw, r#"{"id":42,"name":"Pad Thai"}"#);
    }

    #[tokio::test]
    async fn test_get_absent_is_miss() {
        let (cache, _, observer) = memory_cache("recipe");
        assert_eq!(cache.get_cache(1).await, None);
        assert_eq!(observer.failure_count(), 0);
    }

    #[tokio::test]
    async fn test_set_overwrites_previous_value() {
        let (cache, _, _) = memory_cache("recipe");
        cache.set_cache(1, &dish(1, "old")).await;
        cache.set_cache(1, &dish(1, "new")).await;
        assert_eq!(cache.get_cache(1).await, Some(dish(1, "new")));
    }

    #[tokio::test]
    async fn test_invalidate_removes_only_that_key() {
        let (cache, _, _) = memory_cache("recipe");
        cache.set_cache(1, &dish(1, "a")).await;
        cache.set_cache(2, &dish(2, "b")).await;

        cache.invalidate_cache(1).await;

        assert_eq!(cache.get_cache(1).await, None);
        assert_eq!(cache.get_cache(2).await, Some(dish(2, "b")));
    }

    #[tokio::test]
    async fn test_kinds_are_isolated_by_prefix() {
        let store = Arc::new(MemoryStore::new(100, 3600));
        let conn = CacheConnection::new(
            Some(store),
            Arc::new(RecordingObserver::default()),
            3600,
        );
        let recipes: TypedCache<Dish> = TypedCache::new("recipe", conn.clone());
        let details: TypedCache<Dish> = TypedCache::new("recipeDetail", conn);

        recipes.set_cache(7, &dish(7, "flat")).await;
        assert_eq!(details.get_cache(7).await, None);

        details.set_cache(7, &dish(7, "detail")).await;
        recipes.invalidate_cache(7).await;
        assert_eq!(details.get_cache(7).await, Some(dish(7, "detail")));
    }

    #[tokio::test]
    async fn test_clear_flushes_all_kinds() {
        let store = Arc::new(MemoryStore::new(100, 3600));
        let conn = CacheConnection::new(
            Some(store),
            Arc::new(RecordingObserver::default()),
            3600,
        );
        let recipes: TypedCache<Dish> = TypedCache::new("recipe", conn.clone());
        let regions: TypedCache<Dish> = TypedCache::new("region", conn);

        recipes.set_cache(1, &dish(1, "a")).await;
        regions.set_cache(1, &dish(1, "b")).await;

        recipes.clear_cache().await;

        assert_eq!(recipes.get_cache(1).await, None);
        assert_eq!(regions.get_cache(1).await, None);
    }

    #[tokio::test]
    async fn test_disabled_cache_is_inert() {
        let (cache, observer) = disabled_cache();

        cache.set_cache(1, &dish(1, "a")).await;
        assert_eq!(cache.get_cache(1).await, None);
        cache.invalidate_cache(1).await;
        cache.clear_cache().await;

        assert_eq!(observer.failure_count(), 0);
        let disabled = observer.disabled.lock().unwrap().clone();
        assert_eq!(
            disabled.iter().map(|(_, op)| *op).collect::<Vec<_>>(),
            vec![CacheOp::Set, CacheOp::Get, CacheOp::Invalidate, CacheOp::Clear]
        );
    }

    #[tokio::test]
    async fn test_backend_failures_are_reported_and_swallowed() {
        let (cache, observer) = failing_cache();

        cache.set_cache(9, &dish(9, "a")).await;
        assert_eq!(cache.get_cache(9).await, None);
        cache.invalidate_cache(9).await;
        cache.clear_cache().await;

        let failures = observer.failures.lock().unwrap().clone();
        assert_eq!(failures.len(), 4);
        assert_eq!(failures[0].0, "recipe");
        assert_eq!(failures[0].1, CacheOp::Set);
        assert_eq!(failures[0].2, Some(9));
        assert_eq!(failures[3].1, CacheOp::Clear);
        assert_eq!(failures[3].2, None);
        assert_eq!(observer.disabled_count(), 0);
    }

    #[tokio::test]
    async fn test_corrupt_payload_is_a_reported_miss() {
        let (cache, store, observer) = memory_cache("recipe");
        store
            .set("recipe:5", "{not json".to_string(), 3600)
            .await
            .unwrap();

        assert_eq!(cache.get_cache(5).await, None);

        let failures = observer.failures.lock().unwrap().clone();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].1, CacheOp::Get);
        assert!(failures[0].3.contains("could not be parsed"));
    }

    #[tokio::test]
    async fn test_wrong_shape_payload_is_a_reported_miss() {
        let (cache, store, observer) = memory_cache("recipe");
        store
            .set("recipe:5", r#"{"id":"five"}"#.to_string(), 3600)
            .await
            .unwrap();

        assert_eq!(cache.get_cache(5).await, None);
        assert_eq!(observer.failure_count(), 1);
    }

    #[tokio::test]
    async fn test_populate_sets_every_row() {
        let (cache, _, _) = memory_cache("ingredient");
        let rows = vec![dish(1, "salt"), dish(2, "pepper"), dish(3, "basil")];

        cache.populate(rows.iter().map(|d| (d.id, d))).await;

        for row in &rows {
            assert_eq!(cache.get_cache(row.id).await.as_ref(), Some(row));
        }
    }

    #[tokio::test]
    async fn test_populate_when_disabled_reports_once() {
        let (cache, observer) = disabled_cache();
        let rows = vec![dish(1, "salt"), dish(2, "pepper")];

        cache.populate(rows.iter().map(|d| (d.id, d))).await;

        assert_eq!(observer.disabled_count(), 1);
    }

    #[tokio::test]
    async fn test_read_through_loads_once_then_hits() {
        let (cache, _, _) = memory_cache("recipe");
        let calls = AtomicUsize::new(0);

        for _ in 0..3 {
            let value = cache
                .read_through(42, || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, String>(Some(dish(42, "Pad Thai")))
                })
                .await
                .unwrap();
            assert_eq!(value, Some(dish(42, "Pad Thai")));
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_read_through_does_not_cache_absence() {
        let (cache, _, _) = memory_cache("recipe");
        let calls = AtomicUsize::new(0);

        for _ in 0..2 {
            let value = cache
                .read_through(404, || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok::<Option<Dish>, String>(None)
                })
                .await
                .unwrap();
            assert_eq!(value, None);
        }

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_invalidation_during_load_is_overwritten() {
        let (cache, _, _) = memory_cache("recipe");

        let loaded = cache
            .read_through(7, || async {
                // a writer commits and invalidates after the row was read
                cache.invalidate_cache(7).await;
                Ok::<_, String>(Some(dish(7, "old")))
            })
            .await
            .unwrap();

        assert_eq!(loaded, Some(dish(7, "old")));
        assert_eq!(cache.get_cache(7).await, Some(dish(7, "old")));
    }

    #[tokio::test]
    async fn test_read_through_propagates_loader_error() {
        let (cache, _, _) = memory_cache("recipe");
        let result = cache
            .read_through(1, || async { Err::<Option<Dish>, _>("db down".to_string()) })
            .await;
        assert_eq!(result, Err("db down".to_string()));
    }

    #[tokio::test]
    async fn test_read_through_survives_failing_backend() {
        let (cache, observer) = failing_cache();
        let value = cache
            .read_through(1, || async { Ok::<_, String>(Some(dish(1, "a"))) })
            .await
            .unwrap();

        assert_eq!(value, Some(dish(1, "a")));
        assert_eq!(observer.failure_count(), 2);
    }

    #[tokio::test]
    async fn test_recipe_42_scenario() {
        let (cache, _, _) = memory_cache("recipe");
        let recipe = dish(42, "Pad Thai");

        assert_eq!(cache.key(42), "recipe:42");
        assert_eq!(cache.get_cache(42).await, None);

        cache.set_cache(42, &recipe).await;
        assert_eq!(cache.get_cache(42).await, Some(recipe));

        cache.invalidate_cache(42).await;
        assert_eq!(cache.get_cache(42).await, None);
    }

    #[test]
    fn test_distinct_keys_for_many_ids() {
        let cache: TypedCache<Dish> = TypedCache::new("nation", CacheConnection::disabled());
        let keys: HashSet<String> = (-500..500).map(|id| cache.key(id)).collect();
        assert_eq!(keys.len(), 1000);
    }
}
