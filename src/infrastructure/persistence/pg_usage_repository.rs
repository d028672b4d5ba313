//! PostgreSQL implementation of usage repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{FullUrlUseCount, NewUsageEvent, UsageEvent};
use crate::domain::repositories::UsageRepository;
use crate::error::AppError;

#[derive(Debug, FromRow)]
struct UsageRow {
    id: i64,
    link_id: i64,
    used_at: DateTime<Utc>,
}

impl From<UsageRow> for UsageEvent {
    fn from(r: UsageRow) -> Self {
        UsageEvent::new(r.id, r.link_id, r.used_at)
    }
}

#[derive(Debug, FromRow)]
struct UseCountRow {
    full_url: String,
    uses: i64,
}

/// PostgreSQL repository for usage events.
pub struct PgUsageRepository {
    pool: Arc<PgPool>,
}

impl PgUsageRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UsageRepository for PgUsageRepository {
    async fn record(&self, event: NewUsageEvent) -> Result<UsageEvent, AppError> {
        let row: UsageRow = sqlx::query_as(
            r#"
            INSERT INTO link_uses (link_id, used_at)
            VALUES ($1, $2)
            RETURNING id, link_id, used_at
            "#,
        )
        .bind(event.link_id)
        .bind(event.used_at)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn list_all(&self) -> Result<Vec<UsageEvent>, AppError> {
        let rows: Vec<UsageRow> =
            sqlx::query_as("SELECT id, link_id, used_at FROM link_uses ORDER BY id")
                .fetch_all(self.pool.as_ref())
                .await?;

        Ok(rows.into_iter().map(UsageEvent::from).collect())
    }

    async fn list_by_link(&self, link_id: i64) -> Result<Vec<UsageEvent>, AppError> {
        let rows: Vec<UsageRow> = sqlx::query_as(
            r#"
            SELECT id, link_id, used_at
            FROM link_uses
            WHERE link_id = $1
            ORDER BY used_at, id
            "#,
        )
        .bind(link_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(UsageEvent::from).collect())
    }

    async fn use_counts_by_full_url(&self) -> Result<Vec<FullUrlUseCount>, AppError> {
        let rows: Vec<UseCountRow> = sqlx::query_as(
            r#"
            SELECT l.full_url, COUNT(u.id) AS uses
            FROM links l
            JOIN link_uses u ON u.link_id = l.id
            GROUP BY l.id, l.full_url
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| FullUrlUseCount::new(r.full_url, r.uses.max(0) as u64))
            .collect())
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM link_uses")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
