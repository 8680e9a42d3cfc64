//! Registry cache
//!
//! In-process, read-mostly cache over the persisted catalog. Downstream
//! consumers read exclusively through these filters so the catalog core is
//! the sole authority on what the catalog currently looks like.
//!
//! The cache is an injected service object, not a process-wide singleton:
//! it owns its snapshot, staleness is bounded by a TTL, lazy initialization
//! is single-flight, and the snapshot is swapped atomically as one
//! reference. A failed refresh keeps serving the last-known-good snapshot.

use std::sync::{Arc, PoisonError, RwLock};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use crate::domain::repositories::ShellRepository;
use crate::domain::shell::{GeneratedShell, ShellStatus};

/// Directory shells at or above this priority count as featured.
pub const FEATURED_PRIORITY: u8 = 8;

struct Snapshot {
    tools: Arc<Vec<GeneratedShell>>,
    fetched_at: Option<Instant>,
}

struct CacheInner {
    repository: Arc<dyn ShellRepository>,
    ttl: Duration,
    snapshot: RwLock<Snapshot>,
    /// Single-flight guard: concurrent refreshers serialize here, and each
    /// re-checks staleness after acquiring so only the first one fetches.
    refresh_lock: tokio::sync::Mutex<()>,
}

#[derive(Clone)]
pub struct CatalogCache {
    inner: Arc<CacheInner>,
}

impl CatalogCache {
    pub fn new(repository: Arc<dyn ShellRepository>, ttl: Duration) -> Self {
        Self {
            inner: Arc::new(CacheInner {
                repository,
                ttl,
                snapshot: RwLock::new(Snapshot {
                    tools: Arc::new(Vec::new()),
                    fetched_at: None,
                }),
                refresh_lock: tokio::sync::Mutex::new(()),
            }),
        }
    }

    /// A never-fetched cache is always stale.
    pub fn is_stale(&self) -> bool {
        let snapshot = self
            .inner
            .snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        match snapshot.fetched_at {
            Some(fetched_at) => fetched_at.elapsed() > self.inner.ttl,
            None => true,
        }
    }

    /// Current snapshot, synchronously. On a cold cache this returns the
    /// empty snapshot immediately and schedules a single-flighted background
    /// initialization; it never blocks the caller.
    pub fn cached_tools(&self) -> Arc<Vec<GeneratedShell>> {
        let (tools, cold) = {
            let snapshot = self
                .inner
                .snapshot
                .read()
                .unwrap_or_else(PoisonError::into_inner);
            (Arc::clone(&snapshot.tools), snapshot.fetched_at.is_none())
        };

        if cold {
            if let Ok(handle) = tokio::runtime::Handle::try_current() {
                let cache = self.clone();
                handle.spawn(async move {
                    cache.ensure_loaded().await;
                });
            }
        }

        tools
    }

    /// Returns a snapshot no older than the TTL, refreshing first when the
    /// cache is stale or uninitialized.
    pub async fn ensure_loaded(&self) -> Arc<Vec<GeneratedShell>> {
        if self.is_stale() {
            let _guard = self.inner.refresh_lock.lock().await;
            // First holder refreshed while we waited; skip the second fetch.
            if self.is_stale() {
                self.refresh_snapshot().await;
            }
        }
        self.current()
    }

    /// Unconditional refresh, for write-path callers that just changed the
    /// catalog and should not wait out the TTL.
    pub async fn refresh(&self) -> Arc<Vec<GeneratedShell>> {
        let _guard = self.inner.refresh_lock.lock().await;
        self.refresh_snapshot().await;
        self.current()
    }

    pub fn tool_by_slug(&self, slug: &str) -> Option<GeneratedShell> {
        self.cached_tools()
            .iter()
            .find(|shell| shell.slug == slug)
            .cloned()
    }

    pub fn indexed_tools(&self) -> Vec<GeneratedShell> {
        self.filtered(|shell| shell.is_indexed)
    }

    pub fn directory_tools(&self) -> Vec<GeneratedShell> {
        self.filtered(|shell| shell.in_directory)
    }

    pub fn featured_tools(&self) -> Vec<GeneratedShell> {
        self.filtered(|shell| shell.in_directory && shell.priority >= FEATURED_PRIORITY)
    }

    pub fn published_tools(&self) -> Vec<GeneratedShell> {
        self.filtered(|shell| {
            matches!(shell.status, ShellStatus::Ready | ShellStatus::Indexed)
        })
    }

    fn filtered(&self, predicate: impl Fn(&GeneratedShell) -> bool) -> Vec<GeneratedShell> {
        self.cached_tools()
            .iter()
            .filter(|shell| predicate(shell))
            .cloned()
            .collect()
    }

    fn current(&self) -> Arc<Vec<GeneratedShell>> {
        let snapshot = self
            .inner
            .snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&snapshot.tools)
    }

    /// Fetch and swap the whole snapshot. On failure the stale snapshot is
    /// retained and the error logged; filter callers keep reading
    /// last-known-good data.
    async fn refresh_snapshot(&self) {
        match self.inner.repository.find_all().await {
            Ok(tools) => {
                debug!(count = tools.len(), "catalog cache refreshed");
                let mut snapshot = self
                    .inner
                    .snapshot
                    .write()
                    .unwrap_or_else(PoisonError::into_inner);
                snapshot.tools = Arc::new(tools);
                snapshot.fetched_at = Some(Instant::now());
            }
            Err(err) => {
                warn!(error = %err, "catalog cache refresh failed, serving stale snapshot");
            }
        }
    }
}
