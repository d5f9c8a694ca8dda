use crate::{CacheEntry, QueryKey};

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use chrono::Utc;
use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use log::{debug, warn};
use tokio::sync::{Mutex, watch};

type SharedFetch<V, E> = Shared<BoxFuture<'static, Result<V, E>>>;

struct InFlight<V, E> {
    id: u64,
    fetch: SharedFetch<V, E>,
}

struct Slot<V, E> {
    entry: CacheEntry<V, E>,
    in_flight: Option<InFlight<V, E>>,
}

impl<V, E> Default for Slot<V, E> {
    fn default() -> Self {
        Self {
            entry: CacheEntry::default(),
            in_flight: None,
        }
    }
}

struct CacheInner<V, E> {
    slots: HashMap<QueryKey, Slot<V, E>>,
    next_fetch_id: u64,
}

/// Process-wide query cache.
///
/// Concurrent reads of the same key share a single fetch. `invalidate`
/// detaches any fetch in flight for the key, so a response that was
/// already on the wire can never overwrite the entry afterwards. The lock
/// is released before any fetch is awaited.
pub struct QueryCache<V, E> {
    inner: Arc<Mutex<CacheInner<V, E>>>,
    revision: Arc<watch::Sender<u64>>,
}

impl<V, E> Clone for QueryCache<V, E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            revision: Arc::clone(&self.revision),
        }
    }
}

impl<V, E> Default for QueryCache<V, E>
where
    V: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V, E> QueryCache<V, E>
where
    V: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        let (revision, _) = watch::channel(0);

        Self {
            inner: Arc::new(Mutex::new(CacheInner {
                slots: HashMap::new(),
                next_fetch_id: 0,
            })),
            revision: Arc::new(revision),
        }
    }

    /// Return the cached value for `key`, or fetch it.
    ///
    /// `fetcher` is only invoked when the entry is missing or stale and no
    /// fetch is already in flight; otherwise the caller joins the existing
    /// fetch.
    pub async fn read<F, Fut>(&self, key: QueryKey, fetcher: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>> + Send + 'static,
    {
        let (fetch_id, fetch) = {
            let mut guard = self.inner.lock().await;
            let CacheInner {
                slots,
                next_fetch_id,
            } = &mut *guard;
            let slot = slots.entry(key).or_default();

            if !slot.entry.is_stale
                && let Some(data) = &slot.entry.data
            {
                debug!("Cache hit for {key}");
                return Ok(data.clone());
            }

            let joined = slot
                .in_flight
                .as_ref()
                .map(|in_flight| (in_flight.id, in_flight.fetch.clone()));

            match joined {
                Some(joined) => {
                    debug!("Joining in-flight fetch for {key}");
                    joined
                }
                None => {
                    *next_fetch_id += 1;
                    let id = *next_fetch_id;
                    let fetch = fetcher().boxed().shared();

                    debug!("Fetching {key} (fetch #{id})");
                    slot.in_flight = Some(InFlight {
                        id,
                        fetch: fetch.clone(),
                    });
                    slot.entry.is_loading = true;
                    (id, fetch)
                }
            }
        };

        self.notify();

        let result = fetch.await;
        self.settle(key, fetch_id, &result).await;
        result
    }

    /// Mark `key` stale so the next read refetches. Returns whether an
    /// entry existed.
    pub async fn invalidate(&self, key: QueryKey) -> bool {
        let existed = {
            let mut guard = self.inner.lock().await;
            match guard.slots.get_mut(&key) {
                Some(slot) => {
                    if slot.in_flight.take().is_some() {
                        debug!("Invalidated {key} with a fetch in flight; its result will be discarded");
                    }
                    slot.entry.is_stale = true;
                    slot.entry.is_loading = false;
                    true
                }
                None => false,
            }
        };

        if existed {
            debug!("Invalidated {key}");
            self.notify();
        }
        existed
    }

    /// Drop every entry, including fetches in flight.
    pub async fn clear(&self) {
        let dropped = {
            let mut guard = self.inner.lock().await;
            let dropped = guard.slots.len();
            guard.slots.clear();
            dropped
        };

        debug!("Cleared {dropped} cache entries");
        self.notify();
    }

    /// Current state of `key`; an empty entry if it was never read.
    pub async fn snapshot(&self, key: QueryKey) -> CacheEntry<V, E> {
        let guard = self.inner.lock().await;
        guard
            .slots
            .get(&key)
            .map(|slot| slot.entry.clone())
            .unwrap_or_default()
    }

    /// Revision counter, bumped whenever an entry starts loading, settles,
    /// is invalidated or is cleared.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    async fn settle(&self, key: QueryKey, fetch_id: u64, result: &Result<V, E>) {
        {
            let mut guard = self.inner.lock().await;
            let Some(slot) = guard.slots.get_mut(&key) else {
                debug!("Discarding fetch #{fetch_id} for {key}: entry cleared");
                return;
            };

            // Joined callers settle too; only the first one finds a match.
            if slot.in_flight.as_ref().map(|f| f.id) != Some(fetch_id) {
                return;
            }

            slot.in_flight = None;
            slot.entry.is_loading = false;

            match result {
                Ok(value) => {
                    slot.entry.data = Some(value.clone());
                    slot.entry.error = None;
                    slot.entry.fetched_at = Some(Utc::now());
                    slot.entry.is_stale = false;
                }
                Err(err) => {
                    warn!("Fetch #{fetch_id} for {key} failed");
                    slot.entry.error = Some(err.clone());
                    slot.entry.is_stale = true;
                }
            }
        }

        self.notify();
    }

    fn notify(&self) {
        self.revision.send_modify(|rev| *rev = rev.wrapping_add(1));
    }
}
