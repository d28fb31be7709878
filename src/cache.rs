//! In-memory memoizing cache with no expiry.
//!
//! Entries live until they are invalidated or the process exits. Only
//! successful computations are stored, so a failed fetch is retried on the
//! next call.

use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;

use tokio::sync::Mutex;

pub struct MemoCache<K, V> {
    entries: Mutex<HashMap<K, V>>,
}

impl<K, V> Default for MemoCache<K, V> {
    fn default() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }
}

impl<K, V> MemoCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached value for `key`, or await `compute` and store its result.
    ///
    /// The lock is not held while `compute` runs. If another caller stored a
    /// value for the same key in the meantime, that value is kept and returned.
    ///
    /// # Errors
    ///
    /// Returns whatever error `compute` produced; nothing is cached in that case.
    pub async fn get_or_compute<F, Fut, E>(&self, key: K, compute: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(value) = self.get(&key).await {
            return Ok(value);
        }

        let value = compute().await?;
        let mut entries = self.entries.lock().await;
        Ok(entries.entry(key).or_insert(value).clone())
    }

    pub async fn get(&self, key: &K) -> Option<V> {
        self.entries.lock().await.get(key).cloned()
    }

    // Drop one entry, returning whether it existed
    pub async fn invalidate(&self, key: &K) -> bool {
        self.entries.lock().await.remove(key).is_some()
    }

    pub async fn clear(&self) {
        self.entries.lock().await.clear();
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}
