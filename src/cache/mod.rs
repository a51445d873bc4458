//! Query cache shared by every list screen.
//!
//! Pages are cached per [`QueryKey`], i.e. per `(kind, page, size, sort)`.
//! Identical keys share a single in-flight request, and
//! [`QueryClient::invalidate`] marks every cached page of a kind stale.
//!
//! # Configuration
//!
//! ```toml
//! [query]
//! stale_seconds = 0    # 0 revalidates on every read
//! ttl_seconds = 300    # unused pages are evicted after this
//! max_entries = 500
//! ```

mod key;
mod memory;
mod query;

pub use key::QueryKey;
pub use memory::CacheEntry;
pub use query::QueryClient;
