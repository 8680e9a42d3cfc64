//! Operator entry point: print catalog counts by lifecycle status.

use anyhow::Result;
use pagematrix::domain::repositories::ShellRepository;
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

    let repository = SqliteShellRepository::new(db.pool().clone());
    let summary = repository.summary().await?;

    println!("catalog shells: {}", summary.total);
    println!("  draft:   {}", summary.draft);
    println!("  ready:   {}", summary.ready);
    println!("  indexed: {}", summary.indexed);
    println!("  clusters: {}", summary.clusters);

    Ok(())
}
