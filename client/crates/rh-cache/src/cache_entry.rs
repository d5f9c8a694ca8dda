use chrono::{DateTime, Utc};

/// Render-side view of one cache slot.
#[derive(Debug, Clone)]
pub struct CacheEntry<V, E> {
    /// Last successfully fetched value. Kept across failed refetches.
    pub data: Option<V>,
    /// Error from the most recent settled fetch, cleared on success
    pub error: Option<E>,
    pub fetched_at: Option<DateTime<Utc>>,
    pub is_stale: bool,
    pub is_loading: bool,
}

impl<V, E> CacheEntry<V, E> {
    /// Data present and not invalidated: a read will not hit the backend.
    pub fn is_fresh(&self) -> bool {
        self.data.is_some() && !self.is_stale
    }
}

impl<V, E> Default for CacheEntry<V, E> {
    fn default() -> Self {
        Self {
            data: None,
            error: None,
            fetched_at: None,
            is_stale: false,
            is_loading: false,
        }
    }
}
