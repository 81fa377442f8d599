//! Memoizes a slow stand-in translator behind a shared cache.
//!
//! Run with `RUST_LOG=xlate_cache=trace cargo run --example translation` to
//! see creation and eviction events.

use std::thread;
use std::time::Duration;

use tracing::info;
use xlate_cache::builder::CacheBuilder;
use xlate_cache::translation::{TranslationCache, TranslationKey};

fn slow_translate(key: &TranslationKey) -> String {
    thread::sleep(Duration::from_millis(20));
    format!("[{}] {}", key.target_lang(), key.text().to_uppercase())
}

fn lookup(cache: &TranslationCache, text: &str) -> String {
    let key = TranslationKey::new(text, "en", "de");
    let mut produced = false;
    let value = cache.get_or_insert_with(key.clone(), || {
        produced = true;
        slow_translate(&key)
    });
    info!(%key, hit = !produced, "translated");
    value.as_str().to_owned()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "translation=info,xlate_cache=debug".into()),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let cache: TranslationCache = CacheBuilder::new(3).build_concurrent()?;

    for text in ["good morning", "thank you", "good morning", "see you", "goodbye"] {
        lookup(&cache, text);
    }

    // "thank you" was least recently used when "goodbye" arrived.
    let evicted = TranslationKey::new("thank you", "en", "de");
    info!(resident = cache.contains(&evicted), len = cache.len(), "after warmup");

    let workers: Vec<_> = (0..4)
        .map(|_| {
            let cache = cache.clone();
            thread::spawn(move || lookup(&cache, "good morning"))
        })
        .collect();
    for worker in workers {
        let text = worker.join().map_err(|_| "worker panicked")?;
        println!("{text}");
    }

    cache.check_invariants()?;
    Ok(())
}
