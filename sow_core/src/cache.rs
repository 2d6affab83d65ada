//! # TTL Cache
//!
//! Explicit TTL memoization for lookups whose backing data changes rarely
//! (geocoding, jurisdiction tables). The cache is an owned object with an
//! injectable clock, an explicit `clear()`, and observable `stats()` -
//! there are no module-level singletons, and invalidation is manual rather
//! than time-critical.
//!
//! ## Example
//!
//! ```rust
//! use std::time::Duration;
//! use sow_core::cache::TtlCache;
//!
//! let mut cache: TtlCache<String, u32> = TtlCache::new(Duration::from_secs(300));
//! cache.insert("FL/broward".to_string(), 170);
//!
//! assert_eq!(cache.get(&"FL/broward".to_string()), Some(&170));
//! assert_eq!(cache.stats().hits, 1);
//!
//! cache.clear();
//! assert_eq!(cache.get(&"FL/broward".to_string()), None);
//! ```

use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, SystemTime};

use serde::{Deserialize, Serialize};

/// Time source abstraction so tests can drive expiry deterministically.
pub trait Clock {
    /// Current wall-clock time
    fn now(&self) -> SystemTime;
}

/// Production clock backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}

/// Cache observability counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    /// Lookups that returned a live entry
    pub hits: u64,
    /// Lookups that found nothing (or only an expired entry)
    pub misses: u64,
    /// Entries dropped because their TTL elapsed
    pub evictions: u64,
    /// Live entries currently stored
    pub entries: usize,
}

struct Entry<V> {
    value: V,
    inserted_at: SystemTime,
}

/// A TTL-bounded memoization cache keyed by input.
///
/// Expiry is lazy: entries are checked on access, not by a background
/// sweeper. `C` defaults to the system clock; tests inject a manual one.
pub struct TtlCache<K, V, C = SystemClock> {
    entries: HashMap<K, Entry<V>>,
    ttl: Duration,
    clock: C,
    hits: u64,
    misses: u64,
    evictions: u64,
}

impl<K: Eq + Hash, V> TtlCache<K, V, SystemClock> {
    /// Create a cache with the given TTL on the system clock.
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, SystemClock)
    }
}

impl<K: Eq + Hash, V, C: Clock> TtlCache<K, V, C> {
    /// Create a cache with an injected clock.
    pub fn with_clock(ttl: Duration, clock: C) -> Self {
        TtlCache {
            entries: HashMap::new(),
            ttl,
            clock,
            hits: 0,
            misses: 0,
            evictions: 0,
        }
    }

    /// Look up a live entry. Expired entries are evicted on access and
    /// counted as misses.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let now = self.clock.now();
        let expired = match self.entries.get(key) {
            Some(entry) => self.is_expired(entry, now),
            None => {
                self.misses += 1;
                return None;
            }
        };

        if expired {
            self.entries.remove(key);
            self.evictions += 1;
            self.misses += 1;
            return None;
        }

        self.hits += 1;
        self.entries.get(key).map(|entry| &entry.value)
    }

    /// Insert or replace an entry, stamping it with the current time.
    pub fn insert(&mut self, key: K, value: V) {
        let inserted_at = self.clock.now();
        self.entries.insert(key, Entry { value, inserted_at });
    }

    /// Memoize: return the cached value or compute, store, and return it.
    pub fn get_or_insert_with(&mut self, key: K, compute: impl FnOnce() -> V) -> &V
    where
        K: Clone,
    {
        if self.get(&key).is_none() {
            let value = compute();
            self.insert(key.clone(), value);
        }
        &self.entries[&key].value
    }

    /// Drop all entries. Counters are preserved; entry count resets.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Snapshot the observability counters.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            evictions: self.evictions,
            entries: self.entries.len(),
        }
    }

    /// Number of stored entries (live and not-yet-evicted expired ones)
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the cache holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn is_expired(&self, entry: &Entry<V>, now: SystemTime) -> bool {
        now.duration_since(entry.inserted_at)
            .map(|age| age > self.ttl)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;
    use std::time::UNIX_EPOCH;

    /// Manually advanced clock shared between the test and the cache.
    #[derive(Clone)]
    struct ManualClock {
        now: Rc<Cell<SystemTime>>,
    }

    impl ManualClock {
        fn new() -> Self {
            ManualClock {
                now: Rc::new(Cell::new(UNIX_EPOCH + Duration::from_secs(1_000_000))),
            }
        }

        fn advance(&self, by: Duration) {
            self.now.set(self.now.get() + by);
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> SystemTime {
            self.now.get()
        }
    }

    #[test]
    fn test_hit_and_miss_counting() {
        let mut cache: TtlCache<&str, u32> = TtlCache::new(Duration::from_secs(60));
        assert_eq!(cache.get(&"a"), None);
        cache.insert("a", 1);
        assert_eq!(cache.get(&"a"), Some(&1));

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.entries, 1);
    }

    #[test]
    fn test_entries_expire_after_ttl() {
        let clock = ManualClock::new();
        let mut cache: TtlCache<&str, u32, ManualClock> =
            TtlCache::with_clock(Duration::from_secs(300), clock.clone());

        cache.insert("broward", 170);
        clock.advance(Duration::from_secs(299));
        assert_eq!(cache.get(&"broward"), Some(&170));

        clock.advance(Duration::from_secs(2));
        assert_eq!(cache.get(&"broward"), None);

        let stats = cache.stats();
        assert_eq!(stats.evictions, 1);
        assert_eq!(stats.entries, 0);
    }

    #[test]
    fn test_clear_is_explicit() {
        let mut cache: TtlCache<&str, u32> = TtlCache::new(Duration::from_secs(60));
        cache.insert("a", 1);
        cache.insert("b", 2);
        assert_eq!(cache.len(), 2);

        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.get(&"a"), None);
    }

    #[test]
    fn test_get_or_insert_with_memoizes() {
        let mut cache: TtlCache<String, u32> = TtlCache::new(Duration::from_secs(60));
        let mut calls = 0;

        let v = *cache.get_or_insert_with("key".to_string(), || {
            calls += 1;
            42
        });
        assert_eq!(v, 42);

        let v = *cache.get_or_insert_with("key".to_string(), || {
            calls += 1;
            99
        });
        assert_eq!(v, 42);
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_reinsert_refreshes_ttl() {
        let clock = ManualClock::new();
        let mut cache: TtlCache<&str, u32, ManualClock> =
            TtlCache::with_clock(Duration::from_secs(100), clock.clone());

        cache.insert("k", 1);
        clock.advance(Duration::from_secs(80));
        cache.insert("k", 2);
        clock.advance(Duration::from_secs(80));

        // 160s since first insert, 80s since refresh: still live
        assert_eq!(cache.get(&"k"), Some(&2));
    }
}
