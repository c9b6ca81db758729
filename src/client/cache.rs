//! Explicit query cache shared by a client and its watched queries.

use chrono::{DateTime, Utc};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

/// Identifies one cached result: operation name plus its variables.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    operation: String,
    variables: String,
}

impl CacheKey {
    pub fn new(operation: &str, variables: &Value) -> Self {
        Self {
            operation: operation.to_string(),
            variables: variables.to_string(),
        }
    }

    pub fn operation(&self) -> &str {
        &self.operation
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    pub data: Value,
    pub fetched_at: DateTime<Utc>,
    /// Sequence number of the request that produced this data.
    pub seq: u64,
}

#[derive(Debug, Clone)]
enum Slot {
    Fresh(CacheEntry),
    /// Dropped at `seq`; responses to requests issued before that are stale.
    Invalidated { seq: u64 },
}

impl Slot {
    fn seq(&self) -> u64 {
        match self {
            Slot::Fresh(entry) => entry.seq,
            Slot::Invalidated { seq } => *seq,
        }
    }
}

#[derive(Debug, Default)]
struct Inner {
    slots: RwLock<HashMap<CacheKey, Slot>>,
    next_seq: AtomicU64,
}

/// Cheaply cloneable handle; clones share the same storage.
///
/// The cache also hands out request sequence numbers, so ordering is
/// consistent across every query that shares it.
#[derive(Debug, Clone, Default)]
pub struct QueryCache {
    inner: Arc<Inner>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next request sequence number (starts at 1, strictly increasing).
    pub fn next_seq(&self) -> u64 {
        self.inner.next_seq.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn read(&self, key: &CacheKey) -> Option<CacheEntry> {
        let slots = self
            .inner
            .slots
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        match slots.get(key) {
            Some(Slot::Fresh(entry)) => Some(entry.clone()),
            _ => None,
        }
    }

    /// Store `data` produced by request `seq`.
    ///
    /// Returns `false` and leaves the cache alone when a newer request (or an
    /// invalidation) already touched this key.
    pub fn write(&self, key: CacheKey, data: Value, seq: u64) -> bool {
        let mut slots = self
            .inner
            .slots
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if slots.get(&key).is_some_and(|slot| slot.seq() > seq) {
            tracing::debug!(operation = key.operation(), seq, "Ignored stale cache write");
            return false;
        }
        slots.insert(
            key,
            Slot::Fresh(CacheEntry {
                data,
                fetched_at: Utc::now(),
                seq,
            }),
        );
        true
    }

    pub fn invalidate(&self, key: &CacheKey) {
        let seq = self.next_seq();
        let mut slots = self
            .inner
            .slots
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        slots.insert(key.clone(), Slot::Invalidated { seq });
    }

    /// Invalidate every cached result of `operation`, whatever its variables.
    pub fn invalidate_operation(&self, operation: &str) {
        let seq = self.next_seq();
        let mut slots = self
            .inner
            .slots
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        for (key, slot) in slots.iter_mut() {
            if key.operation() == operation {
                *slot = Slot::Invalidated { seq };
            }
        }
        tracing::debug!(operation, "Invalidated cached results");
    }
}
