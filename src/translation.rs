//! Cache key shape for translation results.
//!
//! [`TranslationKey`] bundles the three inputs that determine a translation.
//! The cache only hashes and compares it; canonicalizing the text (trimming,
//! case folding, language-code aliases) is up to whoever builds the key.
//!
//! ```
//! use xlate_cache::translation::{LocalTranslationCache, TranslationKey};
//!
//! let mut cache = LocalTranslationCache::new(512);
//! let key = TranslationKey::new("Good morning", "en", "de");
//!
//! if cache.get(&key).is_none() {
//!     cache.put(key.clone(), "Guten Morgen".to_string());
//! }
//! assert_eq!(cache.get(&key).map(String::as_str), Some("Guten Morgen"));
//! ```

use std::fmt;
use std::sync::Arc;

#[cfg(feature = "concurrency")]
use crate::policy::lru::ConcurrentLruCache;
use crate::policy::lru::LruCache;

/// Snippet plus source/target language pair.
///
/// Fields are `Arc<str>` so the clone the cache keeps in its recency node is a
/// reference-count bump.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TranslationKey {
    text: Arc<str>,
    source_lang: Arc<str>,
    target_lang: Arc<str>,
}

impl TranslationKey {
    pub fn new(
        text: impl Into<Arc<str>>,
        source_lang: impl Into<Arc<str>>,
        target_lang: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            text: text.into(),
            source_lang: source_lang.into(),
            target_lang: target_lang.into(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn source_lang(&self) -> &str {
        &self.source_lang
    }

    pub fn target_lang(&self) -> &str {
        &self.target_lang
    }
}

impl fmt::Display for TranslationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}: {}", self.source_lang, self.target_lang, self.text)
    }
}

/// Single-owner translation cache.
pub type LocalTranslationCache = LruCache<TranslationKey, String>;

/// Shared translation cache, passed by handle to request handlers.
#[cfg(feature = "concurrency")]
pub type TranslationCache = ConcurrentLruCache<TranslationKey, String>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_pair_is_part_of_identity() {
        let en_de = TranslationKey::new("hello", "en", "de");
        let en_fr = TranslationKey::new("hello", "en", "fr");
        assert_ne!(en_de, en_fr);
        assert_eq!(en_de, TranslationKey::new("hello", "en", "de"));
    }

    #[test]
    fn no_normalization_is_applied() {
        assert_ne!(
            TranslationKey::new("Hello", "en", "de"),
            TranslationKey::new("hello ", "en", "de")
        );
    }

    #[test]
    fn accessors_and_display() {
        let key = TranslationKey::new("thanks", "en", "ja");
        assert_eq!(key.text(), "thanks");
        assert_eq!(key.source_lang(), "en");
        assert_eq!(key.target_lang(), "ja");
        assert_eq!(key.to_string(), "en->ja: thanks");
    }

    #[test]
    fn local_cache_keeps_pairs_apart() {
        let mut cache = LocalTranslationCache::new(4);
        cache.put(TranslationKey::new("hello", "en", "de"), "hallo".into());
        cache.put(TranslationKey::new("hello", "en", "es"), "hola".into());
        assert_eq!(
            cache.get(&TranslationKey::new("hello", "en", "es")).map(String::as_str),
            Some("hola")
        );
        assert_eq!(cache.len(), 2);
    }
}
