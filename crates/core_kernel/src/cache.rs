//! Bounded TTL cache
//!
//! An explicitly constructed cache with an injected time-to-live and a hard
//! capacity. When full, inserting a new key evicts the least recently used
//! entry. Expired entries are dropped lazily on access or eagerly through
//! [`TtlCache::purge_expired`].
//!
//! The cache takes `&mut self` for every operation and does no locking of its
//! own; an owner that shares it across tasks wraps it in a mutex.
//!
//! ```rust
//! use std::time::Duration;
//! use core_kernel::cache::TtlCache;
//!
//! let mut cache: TtlCache<String, u32> = TtlCache::new(Duration::from_secs(60), 2);
//! cache.set("a".to_string(), 1);
//! assert_eq!(cache.get(&"a".to_string()), Some(1));
//! ```

use chrono::{DateTime, TimeDelta, Utc};
use std::collections::HashMap;
use std::hash::Hash;
use std::time::Duration;

use crate::temporal::{Clock, SystemClock};

#[derive(Debug, Clone)]
struct Entry<V> {
    value: V,
    /// `None` when the TTL is too large to represent
    expires_at: Option<DateTime<Utc>>,
    last_used: u64,
}

impl<V> Entry<V> {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        matches!(self.expires_at, Some(at) if now >= at)
    }
}

/// Key/value cache with per-entry expiry and LRU eviction
#[derive(Debug)]
pub struct TtlCache<K, V, C = SystemClock>
where
    K: Eq + Hash + Clone,
    C: Clock,
{
    entries: HashMap<K, Entry<V>>,
    ttl: Duration,
    capacity: usize,
    tick: u64,
    clock: C,
}

impl<K, V> TtlCache<K, V, SystemClock>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Creates a cache on the system clock
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        Self::with_clock(ttl, capacity, SystemClock)
    }
}

impl<K, V, C> TtlCache<K, V, C>
where
    K: Eq + Hash + Clone,
    V: Clone,
    C: Clock,
{
    /// Creates a cache reading time from `clock`
    pub fn with_clock(ttl: Duration, capacity: usize, clock: C) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity.min(1024)),
            ttl,
            capacity,
            tick: 0,
            clock,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns a clone of the cached value if present and not expired
    pub fn get(&mut self, key: &K) -> Option<V> {
        let now = self.clock.now();
        let expired = self.entries.get(key)?.is_expired(now);
        if expired {
            self.entries.remove(key);
            return None;
        }

        let tick = self.next_tick();
        let entry = self.entries.get_mut(key)?;
        entry.last_used = tick;
        Some(entry.value.clone())
    }

    /// Inserts or replaces `key`, evicting the least recently used entry
    /// when a new key would exceed capacity
    pub fn set(&mut self, key: K, value: V) {
        if self.capacity == 0 {
            return;
        }

        if !self.entries.contains_key(&key) && self.entries.len() >= self.capacity {
            self.purge_expired();
            if self.entries.len() >= self.capacity {
                self.evict_least_recent();
            }
        }

        let now = self.clock.now();
        let expires_at = TimeDelta::from_std(self.ttl)
            .ok()
            .and_then(|delta| now.checked_add_signed(delta));
        let last_used = self.next_tick();

        self.entries.insert(
            key,
            Entry {
                value,
                expires_at,
                last_used,
            },
        );
    }

    /// Removes `key` and returns its value, expired or not
    pub fn evict(&mut self, key: &K) -> Option<V> {
        self.entries.remove(key).map(|e| e.value)
    }

    /// Drops every expired entry and returns how many were removed
    pub fn purge_expired(&mut self) -> usize {
        let now = self.clock.now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired(now));
        before - self.entries.len()
    }

    /// Number of stored entries, including expired ones not yet purged
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn next_tick(&mut self) -> u64 {
        self.tick += 1;
        self.tick
    }

    fn evict_least_recent(&mut self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.last_used)
            .map(|(key, _)| key.clone());

        if let Some(key) = oldest {
            self.entries.remove(&key);
        }
    }
}
