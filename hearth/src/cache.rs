//! Read-through cache with TTL and single-flight refresh.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::error::FetchError;

/// The upstream call a [`Cache`] wraps.
///
/// Implementors are stateless clients; the cache holds one as a capability and
/// never re-exposes it, so callers cannot accidentally bypass the cache.
#[async_trait]
pub trait Fetch: Send + Sync {
    type Value: Send + Sync;

    async fn fetch(&self) -> Result<Self::Value, FetchError>;
}

struct Entry<T> {
    value: Arc<T>,
    fetched_at: Instant,
}

/// Read-through cache: serves the stored value while it is younger than the
/// TTL, otherwise fetches, stores, and serves the fresh one.
///
/// The slot mutex is held across the whole check-expiry → fetch → store
/// sequence. That is the single-flight mechanism: concurrent callers on an
/// expired cache produce exactly one upstream fetch, the rest queue on the
/// lock and then read the stored entry. The lock is async, so a waiter that
/// gives up (its future is dropped) leaves the queue instead of blocking past
/// its own deadline; the fetch itself is bounded by the upstream client's
/// request timeout.
///
/// Failures are never cached: an error leaves the slot untouched and the next
/// call fetches again. Expiry compares [`tokio::time::Instant`]s, which are
/// monotonic; wall-clock adjustments cannot stretch or shrink an entry's life.
pub struct Cache<F: Fetch> {
    fetcher: F,
    ttl: Duration,
    slot: Mutex<Option<Entry<F::Value>>>,
}

impl<F: Fetch> Cache<F> {
    /// Wraps `fetcher` with a fixed TTL. There is no invalidation API; a value
    /// only leaves the cache by being replaced with a fresher one.
    pub fn new(fetcher: F, ttl: Duration) -> Self {
        Self {
            fetcher,
            ttl,
            slot: Mutex::new(None),
        }
    }

    /// Returns the current value, fetching first when nothing is stored yet or
    /// the stored entry has outlived the TTL.
    ///
    /// Callers that share one fetch share its stored result (`Arc` identity is
    /// preserved); a caller whose own fetch fails gets the error, and the
    /// caller after it retries.
    pub async fn get(&self) -> Result<Arc<F::Value>, FetchError> {
        let mut slot = self.slot.lock().await;
        if let Some(entry) = slot.as_ref() {
            if entry.fetched_at.elapsed() < self.ttl {
                return Ok(Arc::clone(&entry.value));
            }
        }
        let value = Arc::new(self.fetcher.fetch().await?);
        *slot = Some(Entry {
            value: Arc::clone(&value),
            fetched_at: Instant::now(),
        });
        Ok(value)
    }
}
