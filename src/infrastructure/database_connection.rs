// Database connection and pool management
// This module handles SQLite database connections using sqlx

use anyhow::Result;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;

pub struct DatabaseConnection {
    pool: SqlitePool,
}

impl DatabaseConnection {
    pub async fn new(database_url: &str) -> Result<Self> {
        // Create database file directory if it doesn't exist
        let db_path = if database_url.starts_with("sqlite://") {
            database_url.trim_start_matches("sqlite://")
        } else if database_url.starts_with("sqlite:") {
            database_url.trim_start_matches("sqlite:")
        } else {
            database_url
        };

        if let Some(parent) = Path::new(db_path).parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        // Ensure the database file exists by creating it if necessary
        if !Path::new(db_path).exists() {
            std::fs::File::create(db_path)?;
        }

        let pool = SqlitePoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn migrate(&self) -> Result<()> {
        let create_shells_sql = r#"
            CREATE TABLE IF NOT EXISTS tool_shells (
                id TEXT PRIMARY KEY,
                slug TEXT NOT NULL UNIQUE,
                name TEXT NOT NULL,
                engine_type TEXT NOT NULL,
                segment TEXT NOT NULL,
                priority INTEGER NOT NULL DEFAULT 5,
                is_indexed BOOLEAN NOT NULL DEFAULT 1,
                in_directory BOOLEAN NOT NULL DEFAULT 1,
                cluster_slug TEXT,
                primary_keyword TEXT NOT NULL,
                secondary_keywords TEXT NOT NULL DEFAULT '[]',
                search_intent TEXT NOT NULL DEFAULT 'informational',
                h1 TEXT NOT NULL,
                meta_description TEXT NOT NULL,
                intro_copy TEXT NOT NULL,
                link_rules TEXT NOT NULL DEFAULT '{}',
                dimensions TEXT NOT NULL DEFAULT '{}',
                status TEXT NOT NULL DEFAULT 'draft',
                created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
        "#;

        let create_indexes_sql = r#"
            CREATE INDEX IF NOT EXISTS idx_tool_shells_status ON tool_shells (status);
            CREATE INDEX IF NOT EXISTS idx_tool_shells_cluster ON tool_shells (cluster_slug);
            CREATE INDEX IF NOT EXISTS idx_tool_shells_engine ON tool_shells (engine_type);
            CREATE INDEX IF NOT EXISTS idx_tool_shells_directory ON tool_shells (in_directory, priority);
        "#;

        sqlx::query(create_shells_sql).execute(&self.pool).await?;
        sqlx::query(create_indexes_sql).execute(&self.pool).await?;

        Ok(())
    }
}
