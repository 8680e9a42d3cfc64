//! Repository interfaces for the content catalog
//!
//! Contains trait definitions for the storage capabilities the catalog core
//! depends on: set-membership slug lookup, transactional multi-row insert,
//! and full scans for the read-side cache.

use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashSet;

use crate::domain::shell::{CatalogSummary, GeneratedShell, ShellStatus};

#[async_trait]
pub trait ShellRepository: Send + Sync {
    /// Which of the candidate slugs already exist in storage. Must tolerate
    /// arbitrarily large candidate lists via batched set queries, never
    /// per-slug lookups.
    async fn filter_existing_slugs(&self, slugs: &[String]) -> Result<HashSet<String>>;

    /// Insert every shell as one row inside a single transaction. Any
    /// failure aborts the whole batch.
    async fn insert_shells(&self, shells: &[GeneratedShell]) -> Result<()>;

    /// Full catalog scan, used by the registry cache refresh.
    async fn find_all(&self) -> Result<Vec<GeneratedShell>>;

    async fn find_by_slug(&self, slug: &str) -> Result<Option<GeneratedShell>>;

    async fn count(&self) -> Result<u64>;

    /// Counts by lifecycle status plus distinct clusters, for operator
    /// reporting.
    async fn summary(&self) -> Result<CatalogSummary>;

    /// Admin-path lifecycle advancement (`draft -> ready -> indexed`),
    /// mutating the persisted row directly. Returns whether a row matched.
    /// The sync pipeline never calls this.
    async fn advance_status(&self, slug: &str, status: ShellStatus) -> Result<bool>;
}
