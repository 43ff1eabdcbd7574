//! Prompt cache refresh behaviour under a paused clock.

use async_trait::async_trait;
use chrono::Utc;
use draftsmith_cache::{PromptCache, PromptCacheConfig};
use draftsmith_core::{PromptRole, PromptSet, PromptTemplate};
use draftsmith_error::{DraftsmithResult, PromptStoreError, PromptStoreErrorKind};
use draftsmith_interface::PromptStore;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Store whose templates carry a version suffix; can be switched to fail.
#[derive(Default)]
struct VersionedStore {
    version: AtomicUsize,
    fetches: AtomicUsize,
    failing: Mutex<bool>,
}

impl VersionedStore {
    fn bump(&self) {
        self.version.fetch_add(1, Ordering::SeqCst);
    }

    fn set_failing(&self, failing: bool) {
        *self.failing.lock().unwrap() = failing;
    }

    fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PromptStore for VersionedStore {
    async fn fetch_all(&self) -> DraftsmithResult<PromptSet> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if *self.failing.lock().unwrap() {
            return Err(PromptStoreError::new(PromptStoreErrorKind::Request(
                "connection refused".to_string(),
            ))
            .into());
        }
        let version = self.version.load(Ordering::SeqCst);
        let now = Utc::now();
        let templates = PromptRole::all().map(|role| {
            (
                role,
                PromptTemplate::new(role.key(), format!("{} v{}", role.key(), version), now),
            )
        });
        Ok(PromptSet::complete(templates)?)
    }
}

fn body(set: &PromptSet, role: PromptRole) -> String {
    set.get(role).map(|t| t.body().clone()).unwrap_or_default()
}

#[tokio::test(start_paused = true)]
async fn test_reads_within_ttl_share_one_set() -> anyhow::Result<()> {
    let store = Arc::new(VersionedStore::default());
    let cache = PromptCache::new(PromptCacheConfig::default(), store.clone());

    let first = cache.get_prompt_set().await;
    tokio::time::advance(Duration::from_secs(299)).await;
    let second = cache.get_prompt_set().await;

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(store.fetches(), 1);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_expired_set_is_replaced_whole() -> anyhow::Result<()> {
    let store = Arc::new(VersionedStore::default());
    let cache = PromptCache::new(PromptCacheConfig::default(), store.clone());

    let old = cache.get_prompt_set().await;
    store.bump();
    tokio::time::advance(Duration::from_secs(301)).await;
    let new = cache.get_prompt_set().await;

    assert_eq!(store.fetches(), 2);
    for role in PromptRole::all() {
        assert_eq!(body(&old, role), format!("{} v0", role.key()));
        assert_eq!(body(&new, role), format!("{} v1", role.key()));
    }
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_failed_refresh_keeps_previous_set() -> anyhow::Result<()> {
    let store = Arc::new(VersionedStore::default());
    let cache = PromptCache::new(PromptCacheConfig::default(), store.clone());

    let original = cache.get_prompt_set().await;
    store.set_failing(true);
    tokio::time::advance(Duration::from_secs(600)).await;

    let after_failure = cache.get_prompt_set().await;
    assert!(Arc::ptr_eq(&original, &after_failure));

    // Retried on the next call once the store recovers.
    store.set_failing(false);
    store.bump();
    let recovered = cache.get_prompt_set().await;
    assert_eq!(body(&recovered, PromptRole::PostGeneration), "post-generation v1");
    assert_eq!(store.fetches(), 3);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_unreachable_store_at_start_yields_empty_set() -> anyhow::Result<()> {
    let store = Arc::new(VersionedStore::default());
    store.set_failing(true);
    let cache = PromptCache::new(PromptCacheConfig::default(), store.clone());

    let set = cache.get_prompt_set().await;
    assert!(set.is_empty());
    assert!(cache.age().await.is_none());
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_stale_readers_fetch_once() -> anyhow::Result<()> {
    let store = Arc::new(VersionedStore::default());
    let cache = Arc::new(PromptCache::new(PromptCacheConfig::default(), store.clone()));

    let readers: Vec<_> = (0..8)
        .map(|_| {
            let cache = Arc::clone(&cache);
            tokio::spawn(async move { cache.get_prompt_set().await })
        })
        .collect();
    for reader in readers {
        assert_eq!(reader.await?.len(), 4);
    }

    assert_eq!(store.fetches(), 1);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_invalidate_forces_refresh() -> anyhow::Result<()> {
    let store = Arc::new(VersionedStore::default());
    let cache = PromptCache::new(PromptCacheConfig::default(), store.clone());

    cache.get_prompt_set().await;
    store.bump();
    cache.invalidate().await;
    let refreshed = cache.get_prompt_set().await;

    assert_eq!(body(&refreshed, PromptRole::TopicGeneration), "topic-generation v1");
    Ok(())
}
