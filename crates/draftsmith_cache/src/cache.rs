//! Prompt set cache with TTL-based refresh.

use derive_getters::Getters;
use draftsmith_core::PromptSet;
use draftsmith_interface::PromptStore;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tokio::time::Instant;
use tracing::{debug, info, instrument, warn};

/// Configuration for the prompt cache.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Getters,
    derive_setters::Setters,
    derive_builder::Builder,
)]
#[setters(prefix = "with_")]
pub struct PromptCacheConfig {
    /// Maximum age of the cached set (seconds)
    #[serde(default = "default_ttl_secs")]
    #[builder(default = "default_ttl_secs()")]
    ttl_secs: u64,
}

fn default_ttl_secs() -> u64 {
    300 // 5 minutes
}

impl Default for PromptCacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
        }
    }
}

impl PromptCacheConfig {
    /// TTL as a [`Duration`].
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

#[derive(Debug)]
struct CacheState {
    set: Arc<PromptSet>,
    refreshed_at: Option<Instant>,
}

/// Owned, shareable cache of the current prompt set.
///
/// Readers always get a whole set: a refresh builds the new set off to the side
/// and swaps it in under the write lock. Refreshes are serialized by a separate
/// update lock so concurrent stale readers trigger a single store fetch.
///
/// # Example
///
/// ```no_run
/// use draftsmith_cache::{PromptCache, PromptCacheConfig, TomlPromptStore};
/// use std::sync::Arc;
///
/// # async fn example() {
/// let store = Arc::new(TomlPromptStore::new("prompts.toml"));
/// let cache = PromptCache::new(PromptCacheConfig::default(), store);
/// let prompts = cache.get_prompt_set().await;
/// println!("{} templates cached", prompts.len());
/// # }
/// ```
pub struct PromptCache {
    config: PromptCacheConfig,
    store: Arc<dyn PromptStore>,
    state: RwLock<CacheState>,
    update_lock: Mutex<()>,
}

impl PromptCache {
    /// Create an empty cache backed by `store`.
    pub fn new(config: PromptCacheConfig, store: Arc<dyn PromptStore>) -> Self {
        debug!(ttl_secs = config.ttl_secs, "Creating new PromptCache");
        Self {
            config,
            store,
            state: RwLock::new(CacheState {
                set: Arc::new(PromptSet::empty()),
                refreshed_at: None,
            }),
            update_lock: Mutex::new(()),
        }
    }

    /// Cache configuration.
    pub fn config(&self) -> &PromptCacheConfig {
        &self.config
    }

    /// Current prompt set, refreshed first if older than the TTL.
    ///
    /// A failed refresh is logged and the previous set (possibly empty or stale)
    /// is returned; it is retried on the next call.
    #[instrument(skip(self))]
    pub async fn get_prompt_set(&self) -> Arc<PromptSet> {
        if let Some(set) = self.fresh_set().await {
            return set;
        }

        let _guard = self.update_lock.lock().await;

        // Another caller may have refreshed while we waited for the lock.
        if let Some(set) = self.fresh_set().await {
            return set;
        }

        match self.store.fetch_all().await {
            Ok(set) => {
                let set = Arc::new(set);
                let mut state = self.state.write().await;
                state.set = Arc::clone(&set);
                state.refreshed_at = Some(Instant::now());
                info!(
                    templates = set.len(),
                    newest_update = ?set.newest_update(),
                    "Prompt set refreshed"
                );
                set
            }
            Err(e) => {
                let age = self.age().await;
                let state = self.state.read().await;
                warn!(
                    error = %e,
                    cached_templates = state.set.len(),
                    cached_age_secs = age.map(|age| age.as_secs()),
                    "Prompt refresh failed, keeping previous set"
                );
                Arc::clone(&state.set)
            }
        }
    }

    /// Mark the cached set stale so the next read refreshes it.
    pub async fn invalidate(&self) {
        let mut state = self.state.write().await;
        state.refreshed_at = None;
        debug!("Prompt cache invalidated");
    }

    /// Time since the last successful refresh.
    pub async fn age(&self) -> Option<Duration> {
        self.state.read().await.refreshed_at.map(|at| at.elapsed())
    }

    async fn fresh_set(&self) -> Option<Arc<PromptSet>> {
        let state = self.state.read().await;
        match state.refreshed_at {
            Some(at) if at.elapsed() < self.config.ttl() => Some(Arc::clone(&state.set)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults_to_five_minutes() {
        let config = PromptCacheConfig::default();
        assert_eq!(*config.ttl_secs(), 300);

        let built = PromptCacheConfigBuilder::default().build().unwrap();
        assert_eq!(built, config);

        let short = config.with_ttl_secs(5);
        assert_eq!(short.ttl(), Duration::from_secs(5));
    }
}
