//! In-memory TTL cache for facade results.
//!
//! Entries expire a fixed time after they were written. Expiry is checked
//! lazily on read: a stale entry is removed and reported as a miss. Nothing
//! sweeps the map in the background.

use dashmap::DashMap;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::time::{Duration, Instant};

/// Lifetime of a cache entry.
pub const DEFAULT_TTL: Duration = Duration::from_secs(30 * 60);

// ---------------------------------------------------------------------------
// Keys
// ---------------------------------------------------------------------------

/// Deterministic key derived from an operation name and its parameters.
///
/// Parameters are serialized to JSON with object keys sorted at every level,
/// so two parameter objects with the same keys and values produce the same
/// key regardless of field or insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn new<P: Serialize + ?Sized>(operation: &str, params: &P) -> Self {
        let value = serde_json::to_value(params).unwrap_or(Value::Null);
        let mut key = String::with_capacity(operation.len() + 32);
        key.push_str(operation);
        key.push('_');
        write_canonical(&value, &mut key);
        Self(key)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Write `value` as compact JSON with object keys in sorted order.
fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            out.push('{');
            for (i, key) in keys.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&Value::from(key.as_str()).to_string());
                out.push(':');
                write_canonical(&map[key], out);
            }
            out.push('}');
        }
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        scalar => out.push_str(&scalar.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Cache
// ---------------------------------------------------------------------------

/// Entry in the cache.
struct CacheEntry<V> {
    data: V,
    stored_at: Instant,
}

impl<V> CacheEntry<V> {
    fn is_fresh(&self, ttl: Duration) -> bool {
        self.stored_at.elapsed() < ttl
    }
}

/// Thread-safe cache whose entries expire a fixed time after being stored.
///
/// Values are returned by clone, so callers never observe later writes
/// through a value they already hold.
pub struct TtlCache<V> {
    entries: DashMap<CacheKey, CacheEntry<V>>,
    ttl: Duration,
}

impl<V: Clone> TtlCache<V> {
    /// Create a cache with the standard 30-minute lifetime.
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TTL)
    }

    /// Create a cache with a custom lifetime.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Return the stored value if it is younger than the TTL.
    ///
    /// A stale entry is deleted and treated as absent.
    pub fn get(&self, key: &CacheKey) -> Option<V> {
        if let Some(entry) = self.entries.get(key) {
            if entry.is_fresh(self.ttl) {
                return Some(entry.data.clone());
            }
        }

        // Re-check under the write lock: a concurrent `set` may have refreshed it.
        self.entries.remove_if(key, |_, e| !e.is_fresh(self.ttl));
        None
    }

    /// Store `data` under `key`, replacing any previous entry and resetting
    /// its timestamp.
    pub fn set(&self, key: CacheKey, data: V) {
        self.entries.insert(
            key,
            CacheEntry {
                data,
                stored_at: Instant::now(),
            },
        );
    }

    /// Number of stored entries, including stale ones not yet read.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V: Clone> Default for TtlCache<V> {
    fn default() -> Self {
        Self::new()
    }
}
