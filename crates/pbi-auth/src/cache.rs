//! Lazily populated bearer token cache.

use std::future::Future;
use std::sync::{Arc, RwLock};

use tokio::sync::Mutex;
use tracing::debug;

use crate::error::Result;

/// Holds at most one access token, fetched on first use.
///
/// Concurrent first callers share a single fetch: the fast path reads the
/// cached token, and the slow path takes the fetch guard, checks again,
/// and only then fetches. A failed fetch leaves the cache empty so the
/// next caller tries again.
///
/// Tokens are never refreshed on their own; call [`TokenCache::invalidate`]
/// to force the next caller to fetch.
#[derive(Clone, Default)]
pub struct TokenCache {
    token: Arc<RwLock<Option<String>>>,
    fetch_guard: Arc<Mutex<()>>,
}

impl std::fmt::Debug for TokenCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCache")
            .field("cached", &self.get().is_some())
            .finish()
    }
}

impl TokenCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached token, if any.
    pub fn get(&self) -> Option<String> {
        match self.token.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Drop the cached token.
    pub fn invalidate(&self) {
        self.store(None);
    }

    /// Return the cached token, fetching it with `fetch` if the cache is
    /// empty.
    pub async fn get_or_fetch<F, Fut>(&self, fetch: F) -> Result<String>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<String>>,
    {
        if let Some(token) = self.get() {
            return Ok(token);
        }

        let _guard = self.fetch_guard.lock().await;

        // Another caller may have fetched while we waited.
        if let Some(token) = self.get() {
            return Ok(token);
        }

        debug!("Token cache empty, fetching");
        let token = fetch().await?;
        self.store(Some(token.clone()));
        Ok(token)
    }

    fn store(&self, value: Option<String>) {
        match self.token.write() {
            Ok(mut guard) => *guard = value,
            Err(poisoned) => *poisoned.into_inner() = value,
        }
    }
}
