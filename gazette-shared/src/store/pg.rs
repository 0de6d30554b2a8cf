/// PostgreSQL document store
///
/// Documents live in a single `documents` table keyed by
/// `(collection, id)`, with the entity payload in a JSONB `body` column and
/// the store-maintained timestamps in real columns:
///
/// ```sql
/// CREATE TABLE documents (
///     collection TEXT NOT NULL,
///     id         TEXT NOT NULL,
///     body       JSONB NOT NULL,
///     created    TIMESTAMPTZ NOT NULL,
///     modified   TIMESTAMPTZ NOT NULL,
///     PRIMARY KEY (collection, id)
/// );
/// ```
///
/// The id column is TEXT because the two collections key differently: users
/// by username, articles by UUID. Upserts preserve `created` (the conflict
/// branch only touches `body` and `modified`), which gives the set-once
/// semantics the article contract requires without a read-modify-write.
///
/// Views are partial indexes, synced by signature at startup; see
/// [`views`](super::views).

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{postgres::PgRow, PgPool, Row};
use tracing::{debug, info};
use uuid::Uuid;

use super::views::VIEWS;
use super::{DocumentStore, StoreError};
use crate::models::{Article, ArticleInput, User};

/// Collection names used as the `collection` column value
const USERS: &str = "users";
const ARTICLES: &str = "articles";

/// Document store backed by PostgreSQL
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Creates a store over an existing connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The underlying pool (for health checks)
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// The JSONB payload of an article document.
///
/// Timestamps and id are columns, not body fields, so the body carries only
/// the entity content.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
struct ArticleBody {
    username: String,
    title: String,
    body: String,
}

fn article_from_row(row: &PgRow) -> Result<Article, StoreError> {
    let id: String = row.try_get("id")?;
    let id = Uuid::parse_str(&id)
        .map_err(|e| StoreError::Corrupt(format!("article id '{}': {}", id, e)))?;

    let body: serde_json::Value = row.try_get("body")?;
    let body: ArticleBody = serde_json::from_value(body)?;

    let created: DateTime<Utc> = row.try_get("created")?;
    let modified: DateTime<Utc> = row.try_get("modified")?;

    Ok(Article {
        id,
        username: body.username,
        title: body.title,
        body: body.body,
        created,
        modified,
    })
}

#[async_trait]
impl DocumentStore for PgStore {
    async fn get_user(&self, username: &str) -> Result<Option<User>, StoreError> {
        let body: Option<serde_json::Value> = sqlx::query_scalar(
            "SELECT body FROM documents WHERE collection = $1 AND id = $2",
        )
        .bind(USERS)
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        match body {
            Some(body) => Ok(Some(serde_json::from_value(body)?)),
            None => Ok(None),
        }
    }

    async fn put_user(&self, user: User) -> Result<User, StoreError> {
        let body = serde_json::to_value(&user)?;
        let now = Utc::now();

        sqlx::query(
            "INSERT INTO documents (collection, id, body, created, modified) \
             VALUES ($1, $2, $3, $4, $4) \
             ON CONFLICT (collection, id) \
             DO UPDATE SET body = EXCLUDED.body, modified = EXCLUDED.modified",
        )
        .bind(USERS)
        .bind(&user.username)
        .bind(body)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(user)
    }

    async fn usernames(&self) -> Result<Vec<String>, StoreError> {
        let names: Vec<String> = sqlx::query_scalar(
            "SELECT body->>'username' FROM documents \
             WHERE collection = $1 \
             ORDER BY body->>'username'",
        )
        .bind(USERS)
        .fetch_all(&self.pool)
        .await?;

        Ok(names)
    }

    async fn get_article(&self, id: Uuid) -> Result<Option<Article>, StoreError> {
        let row = sqlx::query(
            "SELECT id, body, created, modified FROM documents \
             WHERE collection = $1 AND id = $2",
        )
        .bind(ARTICLES)
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(article_from_row(&row)?)),
            None => Ok(None),
        }
    }

    async fn put_article(&self, input: ArticleInput) -> Result<Article, StoreError> {
        let id = input.id.unwrap_or_else(Uuid::new_v4);
        let body = serde_json::to_value(ArticleBody {
            username: input.username,
            title: input.title,
            body: input.body,
        })?;
        let now = Utc::now();

        // The conflict branch leaves `created` untouched: set-once semantics.
        let row = sqlx::query(
            "INSERT INTO documents (collection, id, body, created, modified) \
             VALUES ($1, $2, $3, $4, $4) \
             ON CONFLICT (collection, id) \
             DO UPDATE SET body = EXCLUDED.body, modified = EXCLUDED.modified \
             RETURNING id, body, created, modified",
        )
        .bind(ARTICLES)
        .bind(id.to_string())
        .bind(body)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        article_from_row(&row)
    }

    async fn delete_article(&self, id: Uuid) -> Result<(), StoreError> {
        let deleted = sqlx::query(
            "DELETE FROM documents WHERE collection = $1 AND id = $2",
        )
        .bind(ARTICLES)
        .bind(id.to_string())
        .execute(&self.pool)
        .await?;

        if deleted.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn articles_by_created(&self) -> Result<Vec<Article>, StoreError> {
        let rows = sqlx::query(
            "SELECT id, body, created, modified FROM documents \
             WHERE collection = $1 \
             ORDER BY created DESC",
        )
        .bind(ARTICLES)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(article_from_row).collect()
    }

    async fn articles_by_owner(&self, username: &str) -> Result<Vec<Article>, StoreError> {
        let rows = sqlx::query(
            "SELECT id, body, created, modified FROM documents \
             WHERE collection = $1 AND body->>'username' = $2 \
             ORDER BY created DESC",
        )
        .bind(ARTICLES)
        .bind(username)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(article_from_row).collect()
    }

    async fn sync_views(&self) -> Result<(), StoreError> {
        for view in VIEWS {
            let stored: Option<String> = sqlx::query_scalar(
                "SELECT signature FROM view_signatures WHERE name = $1",
            )
            .bind(view.name)
            .fetch_optional(&self.pool)
            .await?;

            if stored.as_deref() == Some(view.signature()) {
                debug!(view = view.name, "view up to date");
                continue;
            }

            if stored.is_some() {
                info!(view = view.name, "view definition changed, rebuilding");
            } else {
                info!(view = view.name, "building view");
            }

            // Drop unconditionally: the index may exist from an interrupted
            // sync even when no signature row was written.
            sqlx::query(&format!("DROP INDEX IF EXISTS {}", view.name))
                .execute(&self.pool)
                .await?;

            sqlx::query(view.create_sql).execute(&self.pool).await?;

            sqlx::query(
                "INSERT INTO view_signatures (name, signature, synced_at) \
                 VALUES ($1, $2, NOW()) \
                 ON CONFLICT (name) \
                 DO UPDATE SET signature = EXCLUDED.signature, synced_at = NOW()",
            )
            .bind(view.name)
            .bind(view.signature())
            .execute(&self.pool)
            .await?;
        }

        info!(views = VIEWS.len(), "view sync complete");
        Ok(())
    }
}
