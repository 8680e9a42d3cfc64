//! Operator entry point: expand one blueprint (or all of them) against the
//! persisted catalog, then force a cache refresh so readers see the result.
//!
//! Usage:
//!   run_expansion            expand every registered blueprint
//!   run_expansion --all      same as above
//!   run_expansion <id>       expand a single blueprint by id

use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use pagematrix::application::cache::CatalogCache;
use pagematrix::application::sync::{ExpansionResult, SyncPipeline};
use pagematrix::catalog::register_builtin_blueprints;
use pagematrix::domain::registry::BlueprintRegistry;
use pagematrix::infrastructure::config::ConfigManager;
use pagematrix::infrastructure::database_connection::DatabaseConnection;
use pagematrix::infrastructure::logging::init_logging_with_config;
use pagematrix::infrastructure::shell_repository::SqliteShellRepository;

#[tokio::main]
async fn main() -> Result<()> {
    let config = ConfigManager::new()?.initialize_on_first_run().await?;
    init_logging_with_config(&config.logging)?;

    let db = DatabaseConnection::new(&config.database.database_url()?).await?;
    db.migrate().await?;

    let repository = Arc::new(SqliteShellRepository::new(db.pool().clone()));
    let registry = Arc::new(BlueprintRegistry::new());
    register_builtin_blueprints(&registry)?;

    let pipeline = SyncPipeline::new(registry, repository.clone());

    let target = std::env::args().nth(1);
    let results = match target.as_deref() {
        None | Some("--all") => pipeline.expand_all().await,
        Some(blueprint_id) => vec![pipeline.run_expansion(blueprint_id).await],
    };

    // Write path just changed the catalog; don't wait out the TTL.
    let cache = CatalogCache::new(
        repository,
        Duration::from_secs(config.cache.ttl_seconds),
    );
    let tools = cache.refresh().await;
    info!(catalog_size = tools.len(), "registry cache refreshed");

    let mut failed = false;
    for result in &results {
        print_result(result);
        failed |= !result.is_success();
    }

    if failed {
        std::process::exit(1);
    }
    Ok(())
}

fn print_result(result: &ExpansionResult) {
    println!(
        "{}: created {} / skipped {} ({} ms)",
        result.blueprint_id, result.created_count, result.skipped_count, result.duration_ms
    );
    for error in &result.errors {
        println!("  error: {error}");
    }
}
