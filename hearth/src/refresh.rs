//! Background refresh: keep a cache warm and push each refreshed value to the
//! broker, so streaming displays never have to poll.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::broker::Broker;
use crate::cache::{Cache, Fetch};

/// Spawns a task that refreshes `cache` every `period` and publishes each
/// successful value to `broker`, projected through `project`.
///
/// The first tick fires one full period after spawn. A fetch failure is logged
/// and the tick is skipped; the cache never stores errors, so the next tick
/// retries. A zero period (a `0s` TTL) is clamped to one second, since
/// `tokio::time::interval` rejects zero. Abort the returned handle to stop
/// refreshing.
pub fn spawn<F, T, P>(
    cache: Arc<Cache<F>>,
    broker: Broker<T>,
    period: Duration,
    project: P,
) -> JoinHandle<()>
where
    F: Fetch + 'static,
    T: Clone + Send + 'static,
    P: Fn(&F::Value) -> T + Send + 'static,
{
    let period = if period.is_zero() {
        Duration::from_secs(1)
    } else {
        period
    };
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        // The first interval tick completes immediately; skip it so a cold
        // start does not hit the upstream before anyone asked.
        interval.tick().await;
        loop {
            interval.tick().await;
            match cache.get().await {
                Ok(value) => broker.publish(project(&value)).await,
                Err(e) => tracing::warn!("background refresh failed: {e}"),
            }
        }
    })
}
