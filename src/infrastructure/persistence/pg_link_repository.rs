//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::{CodeEncoder, LinkRepository};
use crate::error::AppError;

#[derive(Debug, FromRow)]
struct LinkRow {
    id: i64,
    code: String,
    full_url: String,
    owner_id: i64,
    created_at: DateTime<Utc>,
}

impl From<LinkRow> for Link {
    fn from(r: LinkRow) -> Self {
        Link::new(r.id, r.code, r.full_url, r.owner_id, r.created_at)
    }
}

/// PostgreSQL repository for link storage and retrieval.
///
/// Readers only ever select rows with a code; the code-less row written first
/// by [`LinkRepository::create`] is invisible outside its transaction.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn create(&self, new_link: NewLink, encode: CodeEncoder) -> Result<Link, AppError> {
        let mut tx = self.pool.begin().await?;

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO links (full_url, owner_id)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(&new_link.full_url)
        .bind(new_link.owner_id)
        .fetch_one(&mut *tx)
        .await?;

        let code = encode(u64::try_from(id).map_err(|_| {
            AppError::internal("Storage assigned a negative id", json!({ "id": id }))
        })?);

        let row: LinkRow = sqlx::query_as(
            r#"
            UPDATE links SET code = $1
            WHERE id = $2
            RETURNING id, code, full_url, owner_id, created_at
            "#,
        )
        .bind(&code)
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(row.into())
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        let row: Option<LinkRow> = sqlx::query_as(
            r#"
            SELECT id, code, full_url, owner_id, created_at
            FROM links
            WHERE code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Link::from))
    }

    async fn find_owned(&self, id: i64, owner_id: i64) -> Result<Option<Link>, AppError> {
        let row: Option<LinkRow> = sqlx::query_as(
            r#"
            SELECT id, code, full_url, owner_id, created_at
            FROM links
            WHERE id = $1 AND owner_id = $2 AND code IS NOT NULL
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Link::from))
    }

    async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<Link>, AppError> {
        let rows: Vec<LinkRow> = sqlx::query_as(
            r#"
            SELECT id, code, full_url, owner_id, created_at
            FROM links
            WHERE owner_id = $1 AND code IS NOT NULL
            ORDER BY id
            "#,
        )
        .bind(owner_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Link::from).collect())
    }

    async fn delete_owned(&self, id: i64, owner_id: i64) -> Result<Option<Link>, AppError> {
        // link_uses rows go with the link via ON DELETE CASCADE
        let row: Option<LinkRow> = sqlx::query_as(
            r#"
            DELETE FROM links
            WHERE id = $1 AND owner_id = $2 AND code IS NOT NULL
            RETURNING id, code, full_url, owner_id, created_at
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Link::from))
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links WHERE code IS NOT NULL")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
