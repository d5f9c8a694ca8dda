//! rh-cache
//!
//! Keyed query cache with in-flight request deduplication and explicit,
//! last-request-wins invalidation. Entries only go stale when told to;
//! nothing here polls.

pub mod cache_entry;
pub mod query_cache;
pub mod query_key;

#[cfg(test)]
mod tests;

pub use cache_entry::CacheEntry;
pub use query_cache::QueryCache;
pub use query_key::QueryKey;
