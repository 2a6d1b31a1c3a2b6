//! # boundlru
//!
//! Bounded least-recently-used cache.
//!
//! ## Architecture
//! - **HashMap**: AHash for fast key -> node lookups (O(1))
//! - **LRU List**: index-linked doubly-linked list in a `Vec` arena (O(1))
//! - **SharedLruCache**: one `parking_lot` mutex around the whole cache,
//!   atomic hit/miss statistics beside it
//!
//! ```
//! use boundlru::LruCache;
//!
//! let mut cache = LruCache::new(2).unwrap();
//! cache.put("a", 1);
//! cache.put("b", 2);
//! cache.get(&"a");
//! cache.put("c", 3); // evicts "b"
//!
//! assert_eq!(cache.get(&"b"), None);
//! assert_eq!(cache.get(&"a"), Some(&1));
//! ```

#![warn(missing_docs)]

mod error;
mod lru;
mod shared;
mod stats;

pub use error::{Error, Result};
pub use lru::{Iter, LruCache};
pub use shared::SharedLruCache;
pub use stats::{CacheStats, StatsSnapshot};
