pub use crate::builder::{CacheBuilder, CacheConfig};
pub use crate::error::{ConfigError, InvariantError};
pub use crate::policy::lru::LruCache;
pub use crate::traits::{CoreCache, LruCacheTrait, MutableCache};
pub use crate::translation::{LocalTranslationCache, TranslationKey};

#[cfg(feature = "concurrency")]
pub use crate::policy::lru::ConcurrentLruCache;
#[cfg(feature = "concurrency")]
pub use crate::policy::sharded::ShardedLruCache;
#[cfg(feature = "concurrency")]
pub use crate::translation::TranslationCache;

#[cfg(feature = "metrics")]
pub use crate::metrics::LruMetricsSnapshot;
