//! SQLite persistence for sites and the parts listed on them.
//!
//! Migrations under `migrations/` run every time a store is opened. Parts
//! arrive in batches per site through [`Store::record_parts`], which also
//! sweeps listings that stopped showing up.

use std::path::Path;

use serde::{Deserialize, Serialize};
use sqlx::{
    FromRow, QueryBuilder, Row, Sqlite, SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow},
};
use time::{Duration, OffsetDateTime};

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!();

const MAX_CONNECTIONS: u32 = 5;

/// Parts of a site not seen for this long are removed by the next large batch.
pub const STALE_AFTER: Duration = Duration::minutes(5);

/// Smaller batches never remove anything: a short listing usually means the
/// site answered partially, not that parts were sold.
pub const SWEEP_MIN_BATCH: usize = 10;

const PART_COLUMNS: &str = "id, part_id, description, type_name, name, image_base64, url, \
                            site_id, price, created_at, updated_at, last_seen";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

/// A marketplace parts are collected from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Site {
    pub id: i64,
    pub name: String,
    pub url: String,
}

/// A stored part listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Part {
    pub id: i64,
    pub part_id: String,
    pub description: String,
    pub type_name: String,
    pub name: String,
    pub image_base64: String,
    pub url: String,
    pub site_id: i64,
    pub price: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub last_seen: OffsetDateTime,
}

impl<'r> FromRow<'r, SqliteRow> for Part {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            part_id: row.try_get("part_id")?,
            description: row.try_get("description")?,
            type_name: row.try_get("type_name")?,
            name: row.try_get("name")?,
            image_base64: row.try_get("image_base64")?,
            url: row.try_get("url")?,
            site_id: row.try_get("site_id")?,
            price: row.try_get("price")?,
            created_at: timestamp(row, "created_at")?,
            updated_at: timestamp(row, "updated_at")?,
            last_seen: timestamp(row, "last_seen")?,
        })
    }
}

fn timestamp(row: &SqliteRow, column: &str) -> Result<OffsetDateTime, sqlx::Error> {
    let seconds: i64 = row.try_get(column)?;

    OffsetDateTime::from_unix_timestamp(seconds).map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_owned(),
        source: Box::new(e),
    })
}

/// A listing as reported by a site, before it is stored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewPart {
    pub part_id: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub type_name: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub image_base64: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub price: String,
}

/// Narrows a part listing. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartFilter {
    /// Substring of the part type.
    pub type_name: Option<String>,
    pub site_id: Option<i64>,
    /// Only parts first stored at or after this instant.
    pub newer_than: Option<OffsetDateTime>,
}

impl PartFilter {
    pub fn is_empty(&self) -> bool {
        self.type_name.is_none() && self.site_id.is_none() && self.newer_than.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: i64,
    pub offset: i64,
}

/// Outcome of storing one batch of listings for a site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSummary {
    /// Listings that were not stored before.
    pub inserted: Vec<Part>,
    /// Listings already stored whose `last_seen` moved to the batch time.
    pub refreshed: u64,
    /// Stale listings deleted after the batch.
    pub removed: u64,
}

#[derive(Debug, Clone)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    /// Opens (creating if needed) the database file at `path` and migrates it.
    pub async fn open(path: &Path) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect_with(options)
            .await?;

        tracing::info!(path = %path.display(), "database opened");

        Self::migrated(pool).await
    }

    /// A private in-memory database, alive as long as the store.
    #[cfg(test)]
    pub(crate) async fn in_memory() -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::new()
            .in_memory(true)
            .foreign_keys(true);

        // Every connection to `:memory:` is its own database; keep exactly one.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        Self::migrated(pool).await
    }

    async fn migrated(pool: SqlitePool) -> Result<Self, StoreError> {
        MIGRATOR.run(&pool).await?;

        Ok(Self { pool })
    }

    pub async fn list_sites(&self) -> Result<Vec<Site>, StoreError> {
        let sites = sqlx::query_as("SELECT id, site_name AS name, site_url AS url FROM sites ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(sites)
    }

    pub async fn site(&self, id: i64) -> Result<Option<Site>, StoreError> {
        let site = sqlx::query_as("SELECT id, site_name AS name, site_url AS url FROM sites WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(site)
    }

    /// Parts matching `filter`, newest first.
    pub async fn parts(&self, filter: &PartFilter, page: Page) -> Result<Vec<Part>, StoreError> {
        let mut query = QueryBuilder::<Sqlite>::new(format!("SELECT {PART_COLUMNS} FROM parts"));
        push_filter(&mut query, filter);

        query
            .push(" ORDER BY created_at DESC, id DESC LIMIT ")
            .push_bind(page.limit)
            .push(" OFFSET ")
            .push_bind(page.offset);

        let parts = query.build_query_as::<Part>().fetch_all(&self.pool).await?;

        Ok(parts)
    }

    /// Number of parts matching `filter`, ignoring pagination.
    pub async fn count_parts(&self, filter: &PartFilter) -> Result<i64, StoreError> {
        let mut query = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM parts");
        push_filter(&mut query, filter);

        let count = query.build_query_scalar::<i64>().fetch_one(&self.pool).await?;

        Ok(count)
    }

    pub async fn part(&self, id: i64) -> Result<Option<Part>, StoreError> {
        let part = sqlx::query_as(&format!("SELECT {PART_COLUMNS} FROM parts WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(part)
    }

    pub async fn parts_by_site(&self, site_id: i64, page: Page) -> Result<Vec<Part>, StoreError> {
        let filter = PartFilter {
            site_id: Some(site_id),
            ..PartFilter::default()
        };

        self.parts(&filter, page).await
    }

    /// Deletes every part of a site, returning how many went.
    pub async fn delete_parts_by_site(&self, site_id: i64) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM parts WHERE site_id = ?")
            .bind(site_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Stores a batch of listings fetched from a site at `now`.
    ///
    /// Unknown listings are inserted, known ones get their `last_seen`
    /// refreshed. A batch of at least [`SWEEP_MIN_BATCH`] listings then removes
    /// the site's parts not seen within [`STALE_AFTER`]. All of it commits or
    /// none of it does.
    pub async fn record_parts(
        &self,
        site_id: i64,
        fetched: &[NewPart],
        now: OffsetDateTime,
    ) -> Result<RecordSummary, StoreError> {
        let seen = now.unix_timestamp();
        let mut tx = self.pool.begin().await?;
        let mut inserted = Vec::new();
        let mut refreshed = 0;

        for part in fetched {
            let updated = sqlx::query("UPDATE parts SET last_seen = ? WHERE site_id = ? AND part_id = ?")
                .bind(seen)
                .bind(site_id)
                .bind(&part.part_id)
                .execute(&mut *tx)
                .await?;

            if updated.rows_affected() > 0 {
                refreshed += 1;
                continue;
            }

            let stored: Part = sqlx::query_as(&format!(
                "INSERT INTO parts (part_id, description, type_name, name, image_base64, url, \
                 site_id, price, created_at, updated_at, last_seen) \
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING {PART_COLUMNS}"
            ))
            .bind(&part.part_id)
            .bind(&part.description)
            .bind(&part.type_name)
            .bind(&part.name)
            .bind(&part.image_base64)
            .bind(&part.url)
            .bind(site_id)
            .bind(&part.price)
            .bind(seen)
            .bind(seen)
            .bind(seen)
            .fetch_one(&mut *tx)
            .await?;

            inserted.push(stored);
        }

        let removed = if fetched.len() >= SWEEP_MIN_BATCH {
            let threshold = (now - STALE_AFTER).unix_timestamp();

            sqlx::query("DELETE FROM parts WHERE site_id = ? AND last_seen < ?")
                .bind(site_id)
                .bind(threshold)
                .execute(&mut *tx)
                .await?
                .rows_affected()
        } else {
            tracing::debug!(site_id, fetched = fetched.len(), "batch too small to sweep stale parts");
            0
        };

        tx.commit().await?;

        tracing::info!(
            site_id,
            inserted = inserted.len(),
            refreshed,
            removed,
            "stored parts batch"
        );

        Ok(RecordSummary {
            inserted,
            refreshed,
            removed,
        })
    }
}

fn push_filter(query: &mut QueryBuilder<'_, Sqlite>, filter: &PartFilter) {
    query.push(" WHERE 1 = 1");

    if let Some(type_name) = &filter.type_name {
        query
            .push(" AND type_name LIKE ")
            .push_bind(format!("%{type_name}%"));
    }

    if let Some(site_id) = filter.site_id {
        query.push(" AND site_id = ").push_bind(site_id);
    }

    if let Some(newer_than) = filter.newer_than {
        query
            .push(" AND created_at >= ")
            .push_bind(newer_than.unix_timestamp());
    }
}
