//! In-memory TTL Cache
//!
//! Concurrent key/value store where every entry carries its own expiry.
//! Expired entries are invisible to readers and are dropped lazily on access
//! or in bulk by [`TtlCache::purge_expired`] (see [`TtlCache::spawn_sweeper`]).

use dashmap::DashMap;
use std::hash::Hash;
use std::sync::{Arc, Weak};
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;

struct Entry<V> {
    value: V,
    /// `None` when `now + ttl` overflows `Instant`; such entries never expire.
    expires_at: Option<Instant>,
}

impl<V> Entry<V> {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| now >= at)
    }
}

/// Generic TTL cache
pub struct TtlCache<K, V> {
    entries: DashMap<K, Entry<V>>,
}

impl<K, V> Default for TtlCache<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite `key`; returns the instant the entry expires
    pub fn insert(&self, key: K, value: V, ttl: Duration) -> Option<Instant> {
        let expires_at = Instant::now().checked_add(ttl);
        self.entries.insert(key, Entry { value, expires_at });
        expires_at
    }

    /// Live value for `key`, `None` when absent or expired
    pub fn get(&self, key: &K) -> Option<V> {
        let now = Instant::now();
        {
            // The shard guard must be released before `remove_if` below.
            let entry = self.entries.get(key)?;
            if !entry.is_expired(now) {
                return Some(entry.value.clone());
            }
        }
        self.entries.remove_if(key, |_, entry| entry.is_expired(now));
        None
    }

    pub fn contains(&self, key: &K) -> bool {
        let now = Instant::now();
        self.entries
            .get(key)
            .is_some_and(|entry| !entry.is_expired(now))
    }

    /// Remove `key`, returning its value if it was still live
    pub fn remove(&self, key: &K) -> Option<V> {
        let now = Instant::now();
        self.entries
            .remove(key)
            .filter(|(_, entry)| !entry.is_expired(now))
            .map(|(_, entry)| entry.value)
    }

    /// Drop every expired entry, returning how many were dropped
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut purged = 0;
        self.entries.retain(|_, entry| {
            let keep = !entry.is_expired(now);
            if !keep {
                purged += 1;
            }
            keep
        });
        purged
    }

    /// Number of stored entries, including expired ones not yet purged
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    /// Periodically purge expired entries on the Tokio runtime
    ///
    /// The task holds only a weak reference and stops once the cache is
    /// dropped; abort the handle to stop it earlier.
    pub fn spawn_sweeper(self: &Arc<Self>, name: &'static str, period: Duration) -> JoinHandle<()> {
        let cache: Weak<Self> = Arc::downgrade(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            // First tick completes immediately.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let Some(cache) = cache.upgrade() else {
                    tracing::debug!(cache = name, "Cache dropped, sweeper exiting");
                    break;
                };
                let purged = cache.purge_expired();
                if purged > 0 {
                    tracing::debug!(
                        cache = name,
                        purged,
                        remaining = cache.len(),
                        "Purged expired cache entries"
                    );
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LONG: Duration = Duration::from_secs(600);

    #[test]
    fn test_insert_and_get() {
        let cache = TtlCache::new();
        cache.insert("a@example.com", 1, LONG);
        assert_eq!(cache.get(&"a@example.com"), Some(1));
        assert!(cache.contains(&"a@example.com"));
        assert_eq!(cache.get(&"b@example.com"), None);
    }

    #[test]
    fn test_insert_overwrites() {
        let cache = TtlCache::new();
        cache.insert("k", "first", LONG);
        cache.insert("k", "second", LONG);
        assert_eq!(cache.get(&"k"), Some("second"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_zero_ttl_is_expired_immediately() {
        let cache = TtlCache::new();
        cache.insert("k", 1, Duration::ZERO);
        assert!(!cache.contains(&"k"));
        assert_eq!(cache.get(&"k"), None);
        // lazily dropped on the failed read
        assert!(cache.is_empty());
    }

    #[test]
    fn test_entry_expires_after_ttl() {
        let cache = TtlCache::new();
        cache.insert("k", 1, Duration::from_millis(30));
        assert_eq!(cache.get(&"k"), Some(1));
        std::thread::sleep(Duration::from_millis(60));
        assert_eq!(cache.get(&"k"), None);
    }

    #[test]
    fn test_remove_returns_only_live_values() {
        let cache = TtlCache::new();
        cache.insert("live", 1, LONG);
        cache.insert("dead", 2, Duration::ZERO);
        assert_eq!(cache.remove(&"live"), Some(1));
        assert_eq!(cache.remove(&"live"), None);
        assert_eq!(cache.remove(&"dead"), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_purge_expired() {
        let cache = TtlCache::new();
        cache.insert(1, "x", Duration::ZERO);
        cache.insert(2, "y", Duration::ZERO);
        cache.insert(3, "z", LONG);
        assert_eq!(cache.len(), 3);
        assert_eq!(cache.purge_expired(), 2);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&3), Some("z"));
    }

    #[test]
    fn test_huge_ttl_does_not_overflow() {
        let cache = TtlCache::new();
        assert!(cache.insert("k", 1, Duration::MAX).is_none());
        assert_eq!(cache.get(&"k"), Some(1));
    }

    #[tokio::test]
    async fn test_sweeper_purges_in_background() {
        let cache = Arc::new(TtlCache::new());
        cache.insert("k", 1, Duration::ZERO);
        let handle = cache.spawn_sweeper("test", Duration::from_millis(10));

        tokio::time::sleep(Duration::from_millis(60)).await;
        assert_eq!(cache.len(), 0);

        handle.abort();
    }

    #[tokio::test]
    async fn test_sweeper_exits_when_cache_dropped() {
        let cache: Arc<TtlCache<u8, u8>> = Arc::new(TtlCache::new());
        let handle = cache.spawn_sweeper("test", Duration::from_millis(5));
        drop(cache);

        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("sweeper should stop")
            .expect("sweeper should not panic");
    }
}
