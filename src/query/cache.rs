use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};

/// LRU cache of `query_string -> ranked results`, invalidated wholesale on
/// index reload (the loaded structures are immutable per-load, so there is
/// no finer-grained invalidation to do).
pub struct QueryCache {
    cache: Mutex<LruCache<String, Arc<Vec<(crate::core::types::DocId, String)>>>>,
}

impl QueryCache {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::new(1).unwrap());
        QueryCache {
            cache: Mutex::new(LruCache::new(capacity)),
        }
    }

    pub fn get(&self, query: &str) -> Option<Arc<Vec<(crate::core::types::DocId, String)>>> {
        self.cache.lock().unwrap().get(query).cloned()
    }

    pub fn put(&self, query: String, results: Arc<Vec<(crate::core::types::DocId, String)>>) {
        self.cache.lock().unwrap().put(query, results);
    }

    pub fn clear(&self) {
        self.cache.lock().unwrap().clear();
    }

    pub fn len(&self) -> usize {
        self.cache.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
