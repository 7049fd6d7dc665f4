use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    captured_at: DateTime<Utc>,
}

/// In-memory key/value store whose entries expire a fixed time after capture.
///
/// Expired entries are never returned; they are evicted when read or when
/// [`TtlCache::purge_expired`] runs. A bounded cache also evicts its oldest
/// entry when a new key would exceed the capacity. The lock is only held for
/// the duration of a single map operation, never across an `.await`.
#[derive(Debug)]
pub struct TtlCache<K, V> {
    entries: Mutex<HashMap<K, CacheEntry<V>>>,
    ttl: Duration,
    capacity: Option<usize>,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
            capacity: None,
        }
    }

    /// Cache holding at most `capacity` entries
    pub fn bounded(ttl: Duration, capacity: usize) -> Self {
        Self {
            capacity: Some(capacity.max(1)),
            ..Self::new(ttl)
        }
    }

    /// Fresh value for `key`, if any
    pub fn get(&self, key: &K, now: DateTime<Utc>) -> Option<V> {
        let mut entries = self.lock();

        let fresh = match entries.get(key) {
            Some(entry) => is_fresh(entry.captured_at, now, self.ttl),
            None => return None,
        };

        if fresh {
            entries.get(key).map(|entry| entry.value.clone())
        } else {
            entries.remove(key);
            None
        }
    }

    /// Store `value`, replacing whatever was cached under `key`
    pub fn insert(&self, key: K, value: V, now: DateTime<Utc>) {
        let mut entries = self.lock();

        if let Some(capacity) = self.capacity {
            if !entries.contains_key(&key) && entries.len() >= capacity {
                entries.retain(|_, entry| is_fresh(entry.captured_at, now, self.ttl));
            }
            while !entries.contains_key(&key) && entries.len() >= capacity {
                let Some(oldest) = entries
                    .iter()
                    .min_by_key(|(_, entry)| entry.captured_at)
                    .map(|(k, _)| k.clone())
                else {
                    break;
                };
                entries.remove(&oldest);
            }
        }

        entries.insert(
            key,
            CacheEntry {
                value,
                captured_at: now,
            },
        );
    }

    /// Drop every expired entry, returning how many were removed
    pub fn purge_expired(&self, now: DateTime<Utc>) -> usize {
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|_, entry| is_fresh(entry.captured_at, now, self.ttl));
        before - entries.len()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<K, CacheEntry<V>>> {
        // Every critical section is a single map call, so a poisoned map is still consistent
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Whether something captured at `captured_at` is still within `window` of `now`
pub(crate) fn is_fresh(captured_at: DateTime<Utc>, now: DateTime<Utc>, window: Duration) -> bool {
    match now.signed_duration_since(captured_at).to_std() {
        Ok(age) => age < window,
        // Captured "in the future" (clock went backwards): treat as brand new
        Err(_) => true,
    }
}
