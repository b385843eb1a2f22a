//! The observable site-content cache.
//!
//! One instance is constructed at startup, shared by `Arc`, and owns
//! every cached section row plus the subscriber list. Readers never
//! block on a fetch: before the first successful load every resolution
//! falls back to its caller-supplied defaults.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock, Weak};

use metrics::counter;
use tracing::{debug, warn};

use crate::application::repos::{ContentRepo, RepoError};
use crate::domain::content::{self, ResolvedSection, SectionDefaults};
use crate::domain::entities::SiteContentRecord;

const SOURCE: &str = "application::content_cache";

type Callback = Arc<dyn Fn() + Send + Sync>;

struct CacheState {
    entries: HashMap<String, SiteContentRecord>,
    warmed: bool,
}

pub struct ContentCache {
    repo: Arc<dyn ContentRepo>,
    state: RwLock<CacheState>,
    subscribers: Mutex<Vec<(u64, Callback)>>,
    next_token: AtomicU64,
}

/// Subscription guard. Dropping it removes the callback, so a subscriber
/// cannot outlive its owner.
pub struct Subscription {
    cache: Weak<ContentCache>,
    token: u64,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cache) = self.cache.upgrade() {
            cache.unsubscribe(self.token);
        }
    }
}

impl ContentCache {
    pub fn new(repo: Arc<dyn ContentRepo>) -> Arc<Self> {
        Arc::new(Self {
            repo,
            state: RwLock::new(CacheState {
                entries: HashMap::new(),
                warmed: false,
            }),
            subscribers: Mutex::new(Vec::new()),
            next_token: AtomicU64::new(1),
        })
    }

    /// Fetch every section row and replace the cached entries. On failure
    /// the previous entries stay available and nobody is notified.
    pub async fn load_all(&self) -> Result<(), RepoError> {
        match self.repo.list_sections().await {
            Ok(rows) => {
                let count = rows.len();
                {
                    let mut state = self.state.write().expect("content cache lock poisoned");
                    for row in rows {
                        state.entries.insert(row.section_key.clone(), row);
                    }
                    state.warmed = true;
                }
                counter!("kadro_content_cache_reloads_total", "outcome" => "success")
                    .increment(1);
                debug!(target = SOURCE, sections = count, "content cache loaded");
                self.notify();
                Ok(())
            }
            Err(err) => {
                counter!("kadro_content_cache_reloads_total", "outcome" => "failure")
                    .increment(1);
                warn!(
                    target = SOURCE,
                    error = %err,
                    "content cache reload failed; serving previous entries"
                );
                Err(err)
            }
        }
    }

    /// Clear the warmed flag and fetch again. Concurrent reloads are
    /// allowed to race; the last completed fetch wins per key.
    pub async fn invalidate_and_reload(&self) -> Result<(), RepoError> {
        {
            let mut state = self.state.write().expect("content cache lock poisoned");
            state.warmed = false;
        }
        self.load_all().await
    }

    /// Register a callback to run after every successful load.
    pub fn subscribe(
        self: &Arc<Self>,
        callback: impl Fn() + Send + Sync + 'static,
    ) -> Subscription {
        let token = self.next_token.fetch_add(1, Ordering::Relaxed);
        self.subscribers
            .lock()
            .expect("subscriber lock poisoned")
            .push((token, Arc::new(callback)));
        Subscription {
            cache: Arc::downgrade(self),
            token,
        }
    }

    fn unsubscribe(&self, token: u64) {
        self.subscribers
            .lock()
            .expect("subscriber lock poisoned")
            .retain(|(existing, _)| *existing != token);
    }

    fn notify(&self) {
        let callbacks: Vec<Callback> = self
            .subscribers
            .lock()
            .expect("subscriber lock poisoned")
            .iter()
            .map(|(_, callback)| Arc::clone(callback))
            .collect();
        for callback in callbacks {
            callback();
        }
    }

    /// Merge the cached record for `key` over the supplied defaults.
    /// Never blocks and never fails.
    pub fn resolve(&self, key: &str, defaults: &SectionDefaults) -> ResolvedSection {
        let state = self.state.read().expect("content cache lock poisoned");
        content::resolve(state.entries.get(key), defaults)
    }

    pub fn record(&self, key: &str) -> Option<SiteContentRecord> {
        let state = self.state.read().expect("content cache lock poisoned");
        state.entries.get(key).cloned()
    }

    pub fn is_warmed(&self) -> bool {
        self.state
            .read()
            .expect("content cache lock poisoned")
            .warmed
    }

    /// Drop all entries and subscribers.
    pub fn dispose(&self) {
        let mut state = self.state.write().expect("content cache lock poisoned");
        state.entries.clear();
        state.warmed = false;
        drop(state);
        self.subscribers
            .lock()
            .expect("subscriber lock poisoned")
            .clear();
    }
}
