//! Dedup & sync pipeline
//!
//! Reconciles generated shells against the persistent catalog: one batched
//! existing-slug query, an in-memory partition, and one all-or-nothing
//! insert transaction per blueprint. Existing rows are never updated or
//! deleted (create-if-absent, never upsert) so manual edits made after
//! generation survive re-runs.
//!
//! The pipeline always returns a result object; storage failures are
//! captured as result-level errors, never raised to the caller.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

use crate::application::expansion::generate_all_shells;
use crate::domain::blueprint::Blueprint;
use crate::domain::registry::BlueprintRegistry;
use crate::domain::repositories::ShellRepository;

/// Outcome of one expansion run, for operator display and audit logs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpansionResult {
    pub blueprint_id: String,
    pub engine_id: String,
    pub created_count: u32,
    pub skipped_count: u32,
    pub created: Vec<String>,
    pub skipped: Vec<String>,
    pub errors: Vec<String>,
    pub duration_ms: u64,
}

impl ExpansionResult {
    fn for_blueprint(blueprint: &Blueprint) -> Self {
        Self {
            blueprint_id: blueprint.id.clone(),
            engine_id: blueprint.engine_id.clone(),
            ..Self::default()
        }
    }

    fn blueprint_not_found(blueprint_id: &str) -> Self {
        Self {
            blueprint_id: blueprint_id.to_string(),
            errors: vec![format!("Blueprint not found: {blueprint_id}")],
            ..Self::default()
        }
    }

    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}

pub struct SyncPipeline {
    registry: Arc<BlueprintRegistry>,
    repository: Arc<dyn ShellRepository>,
}

impl SyncPipeline {
    pub fn new(registry: Arc<BlueprintRegistry>, repository: Arc<dyn ShellRepository>) -> Self {
        Self {
            registry,
            repository,
        }
    }

    /// Operator entry point for a single blueprint. An unknown id is a
    /// routine admin mistake, surfaced as a result error rather than raised.
    pub async fn run_expansion(&self, blueprint_id: &str) -> ExpansionResult {
        match self.registry.get(blueprint_id) {
            Some(blueprint) => self.expand_blueprint(&blueprint).await,
            None => {
                warn!(blueprint_id, "expansion requested for unknown blueprint");
                ExpansionResult::blueprint_not_found(blueprint_id)
            }
        }
    }

    pub async fn expand_blueprint(&self, blueprint: &Blueprint) -> ExpansionResult {
        let started = Instant::now();
        let mut result = self.sync_shells(blueprint).await;
        result.duration_ms = started.elapsed().as_millis() as u64;
        info!(
            blueprint_id = %result.blueprint_id,
            created = result.created_count,
            skipped = result.skipped_count,
            errors = result.errors.len(),
            duration_ms = result.duration_ms,
            "expansion run finished"
        );
        result
    }

    /// Bulk entry point. Blueprints run sequentially (sorted by id) so their
    /// insert transactions never contend on the catalog table; one
    /// blueprint's failure does not roll back rows committed by another.
    pub async fn expand_all(&self) -> Vec<ExpansionResult> {
        let blueprints = self.registry.all();
        let mut results = Vec::with_capacity(blueprints.len());
        for blueprint in blueprints {
            results.push(self.expand_blueprint(&blueprint).await);
        }
        results
    }

    async fn sync_shells(&self, blueprint: &Blueprint) -> ExpansionResult {
        let mut result = ExpansionResult::for_blueprint(blueprint);

        let shells = generate_all_shells(blueprint);
        if shells.is_empty() {
            // Zero dimensions: nothing to reconcile, skip the storage trip.
            return result;
        }

        let slugs: Vec<String> = shells.iter().map(|shell| shell.slug.clone()).collect();
        let existing = match self.repository.filter_existing_slugs(&slugs).await {
            Ok(existing) => existing,
            Err(err) => {
                warn!(blueprint_id = %blueprint.id, error = %err, "existing-slug lookup failed");
                result.errors.push(format!("slug lookup failed: {err:#}"));
                return result;
            }
        };

        let mut to_insert = Vec::with_capacity(shells.len());
        for shell in shells {
            if existing.contains(&shell.slug) {
                result.skipped.push(shell.slug);
            } else {
                to_insert.push(shell);
            }
        }
        result.skipped_count = result.skipped.len() as u32;

        if to_insert.is_empty() {
            return result;
        }

        match self.repository.insert_shells(&to_insert).await {
            Ok(()) => {
                result.created = to_insert.into_iter().map(|shell| shell.slug).collect();
                result.created_count = result.created.len() as u32;
            }
            Err(err) => {
                // Includes the benign race where a concurrent run of the same
                // blueprint won the unique-slug insert; reported, not fatal.
                warn!(blueprint_id = %blueprint.id, error = %err, "shell insert transaction failed");
                result
                    .errors
                    .push(format!("insert transaction failed: {err:#}"));
            }
        }

        result
    }
}
