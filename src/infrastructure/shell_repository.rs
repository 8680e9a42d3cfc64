//! Repository implementation for the persisted tool-shell catalog
//!
//! Maps the domain storage contract onto the `tool_shells` SQLite table.
//! Collection-valued fields (`secondary_keywords`, `link_rules`,
//! `dimensions`) are stored as JSON text columns.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::blueprint::SearchIntent;
use crate::domain::repositories::ShellRepository;
use crate::domain::shell::{CatalogSummary, GeneratedShell, ShellStatus};

/// SQLite caps bound parameters per statement; membership probes run in
/// chunks of this size, each still a set query rather than a per-slug
/// lookup.
const SLUG_QUERY_CHUNK: usize = 500;

const SHELL_COLUMNS: &str = "slug, name, engine_type, segment, priority, is_indexed, in_directory, \
     cluster_slug, primary_keyword, secondary_keywords, search_intent, h1, \
     meta_description, intro_copy, link_rules, dimensions, status, created_at";

#[derive(Clone)]
pub struct SqliteShellRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteShellRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }
}

#[async_trait]
impl ShellRepository for SqliteShellRepository {
    async fn filter_existing_slugs(&self, slugs: &[String]) -> Result<HashSet<String>> {
        let mut existing = HashSet::new();
        for chunk in slugs.chunks(SLUG_QUERY_CHUNK) {
            let placeholders = vec!["?"; chunk.len()].join(", ");
            let sql = format!("SELECT slug FROM tool_shells WHERE slug IN ({placeholders})");

            let mut query = sqlx::query_scalar::<_, String>(&sql);
            for slug in chunk {
                query = query.bind(slug);
            }

            let found = query
                .fetch_all(&*self.pool)
                .await
                .context("existing-slug membership query failed")?;
            existing.extend(found);
        }
        Ok(existing)
    }

    async fn insert_shells(&self, shells: &[GeneratedShell]) -> Result<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .context("failed to open shell insert transaction")?;

        for shell in shells {
            let id = Uuid::new_v4().to_string();
            let secondary_keywords = serde_json::to_string(&shell.secondary_keywords)?;
            let link_rules = serde_json::to_string(&shell.link_rules)?;
            let dimensions = serde_json::to_string(&shell.dimensions)?;

            sqlx::query(
                r#"
                INSERT INTO tool_shells
                (id, slug, name, engine_type, segment, priority, is_indexed, in_directory,
                 cluster_slug, primary_keyword, secondary_keywords, search_intent, h1,
                 meta_description, intro_copy, link_rules, dimensions, status, created_at, updated_at)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&id)
            .bind(&shell.slug)
            .bind(&shell.name)
            .bind(&shell.engine_type)
            .bind(&shell.segment)
            .bind(i64::from(shell.priority))
            .bind(shell.is_indexed)
            .bind(shell.in_directory)
            .bind(&shell.cluster_slug)
            .bind(&shell.primary_keyword)
            .bind(&secondary_keywords)
            .bind(shell.search_intent.as_str())
            .bind(&shell.h1)
            .bind(&shell.meta_description)
            .bind(&shell.intro_copy)
            .bind(&link_rules)
            .bind(&dimensions)
            .bind(shell.status.as_str())
            .bind(shell.created_at)
            .bind(shell.created_at)
            .execute(&mut *tx)
            .await
            .with_context(|| format!("failed to insert shell {}", shell.slug))?;
        }

        tx.commit()
            .await
            .context("failed to commit shell insert transaction")?;
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<GeneratedShell>> {
        let sql = format!("SELECT {SHELL_COLUMNS} FROM tool_shells ORDER BY slug ASC");
        let rows = sqlx::query(&sql)
            .fetch_all(&*self.pool)
            .await
            .context("catalog scan failed")?;

        rows.iter().map(row_to_shell).collect()
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<GeneratedShell>> {
        let sql = format!("SELECT {SHELL_COLUMNS} FROM tool_shells WHERE slug = ?");
        let row = sqlx::query(&sql)
            .bind(slug)
            .fetch_optional(&*self.pool)
            .await
            .with_context(|| format!("lookup failed for slug {slug}"))?;

        row.as_ref().map(row_to_shell).transpose()
    }

    async fn count(&self) -> Result<u64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM tool_shells")
            .fetch_one(&*self.pool)
            .await?;
        Ok(count as u64)
    }

    async fn summary(&self) -> Result<CatalogSummary> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM tool_shells")
            .fetch_one(&*self.pool)
            .await?;
        let draft = self.count_status(ShellStatus::Draft).await?;
        let ready = self.count_status(ShellStatus::Ready).await?;
        let indexed = self.count_status(ShellStatus::Indexed).await?;
        let clusters = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(DISTINCT cluster_slug) FROM tool_shells WHERE cluster_slug IS NOT NULL",
        )
        .fetch_one(&*self.pool)
        .await?;

        Ok(CatalogSummary {
            total: total as u64,
            draft,
            ready,
            indexed,
            clusters: clusters as u64,
        })
    }

    async fn advance_status(&self, slug: &str, status: ShellStatus) -> Result<bool> {
        let result = sqlx::query("UPDATE tool_shells SET status = ?, updated_at = ? WHERE slug = ?")
            .bind(status.as_str())
            .bind(Utc::now())
            .bind(slug)
            .execute(&*self.pool)
            .await
            .with_context(|| format!("status update failed for slug {slug}"))?;
        Ok(result.rows_affected() > 0)
    }
}

impl SqliteShellRepository {
    async fn count_status(&self, status: ShellStatus) -> Result<u64> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM tool_shells WHERE status = ?")
                .bind(status.as_str())
                .fetch_one(&*self.pool)
                .await?;
        Ok(count as u64)
    }
}

fn row_to_shell(row: &SqliteRow) -> Result<GeneratedShell> {
    let secondary_keywords: String = row.try_get("secondary_keywords")?;
    let link_rules: String = row.try_get("link_rules")?;
    let dimensions: String = row.try_get("dimensions")?;
    let search_intent: String = row.try_get("search_intent")?;
    let status: String = row.try_get("status")?;
    let priority: i64 = row.try_get("priority")?;
    let created_at: DateTime<Utc> = row.try_get("created_at")?;

    Ok(GeneratedShell {
        slug: row.try_get("slug")?,
        name: row.try_get("name")?,
        engine_type: row.try_get("engine_type")?,
        segment: row.try_get("segment")?,
        priority: priority.clamp(0, i64::from(u8::MAX)) as u8,
        is_indexed: row.try_get("is_indexed")?,
        in_directory: row.try_get("in_directory")?,
        cluster_slug: row.try_get("cluster_slug")?,
        primary_keyword: row.try_get("primary_keyword")?,
        secondary_keywords: serde_json::from_str(&secondary_keywords)
            .context("malformed secondary_keywords column")?,
        search_intent: SearchIntent::parse(&search_intent)?,
        h1: row.try_get("h1")?,
        meta_description: row.try_get("meta_description")?,
        intro_copy: row.try_get("intro_copy")?,
        link_rules: serde_json::from_str(&link_rules).context("malformed link_rules column")?,
        dimensions: serde_json::from_str(&dimensions).context("malformed dimensions column")?,
        created_at,
        status: ShellStatus::parse(&status)?,
    })
}
