//! Counter store abstraction and the in-memory backend.

use async_trait::async_trait;
use derive_getters::Getters;
use mingus_error::{StoreError, StoreErrorKind, StoreResult};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

/// A key-value store with atomic increment.
///
/// Any backend with these three operations works: an in-process map, Redis,
/// a durable KV store. `incr` must be atomic with respect to concurrent
/// callers; the tracker adds no locking of its own.
#[async_trait]
pub trait CounterStore: Send + Sync {
    /// Current value of a counter; missing or expired keys read as 0.
    async fn get(&self, key: &str) -> StoreResult<i64>;

    /// Atomically add one and return the new value.
    async fn incr(&self, key: &str) -> StoreResult<i64>;

    /// Expire a counter after `ttl`. A missing key is left alone.
    async fn expire(&self, key: &str, ttl: Duration) -> StoreResult<()>;
}

/// A counter and its optional expiry.
#[derive(Debug, Clone, Getters)]
pub struct CounterEntry {
    count: i64,
    expires_at: Option<Instant>,
}

impl CounterEntry {
    /// Check if this counter is expired.
    pub fn is_expired(&self) -> bool {
        self.expires_at
            .map(|at| Instant::now() >= at)
            .unwrap_or(false)
    }

    /// Get remaining time until expiration.
    pub fn time_remaining(&self) -> Option<Duration> {
        self.expires_at
            .map(|at| at.saturating_duration_since(Instant::now()))
    }
}

/// In-process counter store.
///
/// Suitable for tests, the CLI, and single-instance deployments. Counters do
/// not survive a restart. Expired counters are evicted on the first write
/// after the earliest expiry passes, so stale periods leave the map without a
/// background task.
#[derive(Debug, Default)]
pub struct InMemoryCounterStore {
    counters: RwLock<Counters>,
}

#[derive(Debug, Default)]
struct Counters {
    entries: HashMap<String, CounterEntry>,
    /// Earliest `expires_at` among live entries
    next_expiry: Option<Instant>,
}

impl Counters {
    fn sweep(&mut self, now: Instant) -> usize {
        let before = self.entries.len();
        self.entries
            .retain(|_, entry| entry.expires_at.is_none_or(|at| now < at));
        self.next_expiry = self.entries.values().filter_map(|e| e.expires_at).min();
        before - self.entries.len()
    }

    fn sweep_if_due(&mut self) {
        let now = Instant::now();
        if self.next_expiry.is_some_and(|at| now >= at) {
            let removed = self.sweep(now);
            debug!(removed, remaining = self.entries.len(), "Evicted expired counters");
        }
    }
}

impl InMemoryCounterStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of a live counter, for inspection.
    pub async fn entry(&self, key: &str) -> Option<CounterEntry> {
        let counters = self.counters.read().await;
        counters.entries.get(key).filter(|e| !e.is_expired()).cloned()
    }

    /// Number of stored counters, expired ones included until evicted.
    pub async fn len(&self) -> usize {
        self.counters.read().await.entries.len()
    }

    /// Check if the store holds no counters.
    pub async fn is_empty(&self) -> bool {
        self.counters.read().await.entries.is_empty()
    }

    /// Remove expired counters now.
    pub async fn purge_expired(&self) -> usize {
        let mut counters = self.counters.write().await;
        let removed = counters.sweep(Instant::now());
        if removed > 0 {
            info!(removed, remaining = counters.entries.len(), "Purged expired counters");
        }
        removed
    }

    /// Remove every counter.
    pub async fn clear(&self) {
        let mut counters = self.counters.write().await;
        let count = counters.entries.len();
        counters.entries.clear();
        counters.next_expiry = None;
        info!(cleared = count, "Cleared counter store");
    }
}

fn check_key(key: &str) -> StoreResult<()> {
    if key.is_empty() {
        return Err(StoreError::new(StoreErrorKind::InvalidKey(
            "counter key must not be empty".to_string(),
        )));
    }
    Ok(())
}

#[async_trait]
impl CounterStore for InMemoryCounterStore {
    async fn get(&self, key: &str) -> StoreResult<i64> {
        check_key(key)?;
        let counters = self.counters.read().await;
        Ok(counters
            .entries
            .get(key)
            .filter(|e| !e.is_expired())
            .map(|e| e.count)
            .unwrap_or(0))
    }

    #[instrument(skip(self))]
    async fn incr(&self, key: &str) -> StoreResult<i64> {
        check_key(key)?;
        let mut counters = self.counters.write().await;
        counters.sweep_if_due();

        let entry = counters.entries.entry(key.to_string()).or_insert(CounterEntry {
            count: 0,
            expires_at: None,
        });

        // Expiry not yet swept when another key expires earlier
        if entry.is_expired() {
            debug!("Counter expired, starting over");
            entry.count = 0;
            entry.expires_at = None;
        }

        entry.count = entry.count.checked_add(1).ok_or_else(|| {
            StoreError::new(StoreErrorKind::Corrupt(format!("counter '{}' overflowed", key)))
        })?;
        Ok(entry.count)
    }

    async fn expire(&self, key: &str, ttl: Duration) -> StoreResult<()> {
        check_key(key)?;
        let mut counters = self.counters.write().await;
        let Some(entry) = counters.entries.get_mut(key).filter(|e| !e.is_expired()) else {
            return Ok(());
        };

        let Some(at) = Instant::now().checked_add(ttl) else {
            warn!(key, ttl_secs = ttl.as_secs(), "TTL beyond the clock's range, counter kept without expiry");
            entry.expires_at = None;
            return Ok(());
        };

        entry.expires_at = Some(at);
        counters.next_expiry = Some(counters.next_expiry.map_or(at, |next| next.min(at)));
        Ok(())
    }
}
