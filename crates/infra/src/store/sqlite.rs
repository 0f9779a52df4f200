//! SQLite-backed inventory store.
//!
//! A single local database file holds two tables, `product` and `issuance`. The
//! schema is created on connect if missing; there is no migration scheme.

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqliteConnection, SqlitePool};
use tokio::sync::Mutex;

use toolcrib_core::{DomainError, IssuanceId, ProductId};
use toolcrib_inventory::{Issuance, NewProduct, Product, ProductStatus};

use super::{InventoryStore, StoreError, StoreResult, issuance_not_found, product_not_found};

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS product (
        id          INTEGER PRIMARY KEY,
        name        TEXT NOT NULL,
        description TEXT NULL,
        status      TEXT NOT NULL DEFAULT 'Available'
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS issuance (
        id              INTEGER PRIMARY KEY,
        product_id      INTEGER NOT NULL REFERENCES product (id),
        issue_date      TEXT NOT NULL,
        submission_date TEXT NULL
    )
    "#,
    r#"
    CREATE INDEX IF NOT EXISTS issuance_open_by_product
        ON issuance (product_id)
        WHERE submission_date IS NULL
    "#,
];

/// How long a connection waits on a lock held by another process.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const PRODUCT_COLUMNS: &str = "id, name, description, status";
const ISSUANCE_COLUMNS: &str = "id, product_id, issue_date, submission_date";

/// SQLite inventory store.
///
/// Every mutating operation runs inside one transaction. Ids are SQLite rowids,
/// so they restart at 1 once a table has been emptied.
///
/// Write transactions are serialized through `writer`: a deferred SQLite
/// transaction that reads before it writes fails with `SQLITE_BUSY` instead of
/// waiting when another connection is upgrading at the same time.
#[derive(Debug, Clone)]
pub struct SqliteInventoryStore {
    pool: SqlitePool,
    writer: Arc<Mutex<()>>,
}

impl SqliteInventoryStore {
    /// Open (creating if missing) the database at `url`, e.g. `sqlite://toolcrib.db`.
    pub async fn connect(url: &str, max_connections: u32) -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(BUSY_TIMEOUT);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections.max(1))
            .connect_with(options)
            .await?;

        tracing::debug!(url, max_connections, "opened sqlite inventory store");
        Self::with_pool(pool).await
    }

    /// A private in-memory database (tests/dev).
    ///
    /// Pinned to one connection that is never recycled: every SQLite in-memory
    /// connection is a separate database.
    pub async fn in_memory() -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;
        Self::with_pool(pool).await
    }

    async fn with_pool(pool: SqlitePool) -> StoreResult<Self> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&pool).await?;
        }
        Ok(Self {
            pool,
            writer: Arc::new(Mutex::new(())),
        })
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

fn product_from_row(row: &SqliteRow) -> StoreResult<Product> {
    let status: String = row.try_get("status")?;
    let status = ProductStatus::from_str(&status)
        .map_err(|e| StoreError::Corrupt(format!("product.status: {e}")))?;

    Ok(Product::restore(
        ProductId::new(row.try_get::<i64, _>("id")?),
        row.try_get::<String, _>("name")?,
        row.try_get::<Option<String>, _>("description")?,
        status,
    ))
}

fn issuance_from_row(row: &SqliteRow) -> StoreResult<Issuance> {
    Ok(Issuance::restore(
        IssuanceId::new(row.try_get::<i64, _>("id")?),
        ProductId::new(row.try_get::<i64, _>("product_id")?),
        row.try_get::<DateTime<Utc>, _>("issue_date")?,
        row.try_get::<Option<DateTime<Utc>>, _>("submission_date")?,
    ))
}

async fn fetch_product(conn: &mut SqliteConnection, id: ProductId) -> StoreResult<Option<Product>> {
    let row = sqlx::query(&format!("SELECT {PRODUCT_COLUMNS} FROM product WHERE id = ?1"))
        .bind(id.get())
        .fetch_optional(&mut *conn)
        .await?;
    row.as_ref().map(product_from_row).transpose()
}

async fn fetch_issuance(conn: &mut SqliteConnection, id: IssuanceId) -> StoreResult<Option<Issuance>> {
    let row = sqlx::query(&format!("SELECT {ISSUANCE_COLUMNS} FROM issuance WHERE id = ?1"))
        .bind(id.get())
        .fetch_optional(&mut *conn)
        .await?;
    row.as_ref().map(issuance_from_row).transpose()
}

async fn insert_product(conn: &mut SqliteConnection, new: NewProduct) -> StoreResult<Product> {
    let id = sqlx::query("INSERT INTO product (name, description, status) VALUES (?1, ?2, ?3)")
        .bind(new.name())
        .bind(new.description())
        .bind(ProductStatus::Available.as_str())
        .execute(&mut *conn)
        .await?
        .last_insert_rowid();
    Ok(Product::create(ProductId::new(id), new))
}

/// Re-derive a product's status from its open issuances.
async fn sync_product_status(
    conn: &mut SqliteConnection,
    product_id: ProductId,
) -> StoreResult<ProductStatus> {
    let open: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM issuance WHERE product_id = ?1 AND submission_date IS NULL",
    )
    .bind(product_id.get())
    .fetch_one(&mut *conn)
    .await?;

    let status = ProductStatus::from_open_count(usize::try_from(open).unwrap_or(0));
    sqlx::query("UPDATE product SET status = ?1 WHERE id = ?2")
        .bind(status.as_str())
        .bind(product_id.get())
        .execute(&mut *conn)
        .await?;
    Ok(status)
}

#[async_trait]
impl InventoryStore for SqliteInventoryStore {
    async fn create_product(&self, product: NewProduct) -> StoreResult<Product> {
        let _writer = self.writer.lock().await;
        let mut tx = self.pool.begin().await?;
        let created = insert_product(&mut tx, product).await?;
        tx.commit().await?;
        Ok(created)
    }

    async fn create_products(&self, products: Vec<NewProduct>) -> StoreResult<Vec<Product>> {
        let _writer = self.writer.lock().await;
        let mut tx = self.pool.begin().await?;
        let mut created = Vec::with_capacity(products.len());
        for product in products {
            created.push(insert_product(&mut tx, product).await?);
        }
        tx.commit().await?;
        Ok(created)
    }

    async fn get_product(&self, id: ProductId) -> StoreResult<Product> {
        let mut conn = self.pool.acquire().await?;
        fetch_product(&mut conn, id)
            .await?
            .ok_or_else(|| product_not_found(id))
    }

    async fn list_products(&self) -> StoreResult<Vec<Product>> {
        sqlx::query(&format!("SELECT {PRODUCT_COLUMNS} FROM product ORDER BY id"))
            .fetch_all(&self.pool)
            .await?
            .iter()
            .map(product_from_row)
            .collect()
    }

    async fn create_issuance(
        &self,
        product_id: ProductId,
        issued_at: DateTime<Utc>,
    ) -> StoreResult<Issuance> {
        let _writer = self.writer.lock().await;
        let mut tx = self.pool.begin().await?;
        if fetch_product(&mut tx, product_id).await?.is_none() {
            return Err(product_not_found(product_id));
        }

        let id = sqlx::query("INSERT INTO issuance (product_id, issue_date) VALUES (?1, ?2)")
            .bind(product_id.get())
            .bind(issued_at)
            .execute(&mut *tx)
            .await?
            .last_insert_rowid();
        sync_product_status(&mut tx, product_id).await?;
        tx.commit().await?;

        Ok(Issuance::open(IssuanceId::new(id), product_id, issued_at))
    }

    async fn get_issuance(&self, id: IssuanceId) -> StoreResult<Issuance> {
        let mut conn = self.pool.acquire().await?;
        fetch_issuance(&mut conn, id)
            .await?
            .ok_or_else(|| issuance_not_found(id))
    }

    async fn list_issuances(&self) -> StoreResult<Vec<Issuance>> {
        sqlx::query(&format!("SELECT {ISSUANCE_COLUMNS} FROM issuance ORDER BY id"))
            .fetch_all(&self.pool)
            .await?
            .iter()
            .map(issuance_from_row)
            .collect()
    }

    async fn open_issuances(&self, product_id: ProductId) -> StoreResult<Vec<Issuance>> {
        sqlx::query(&format!(
            "SELECT {ISSUANCE_COLUMNS} FROM issuance \
             WHERE product_id = ?1 AND submission_date IS NULL ORDER BY id"
        ))
        .bind(product_id.get())
        .fetch_all(&self.pool)
        .await?
        .iter()
        .map(issuance_from_row)
        .collect()
    }

    async fn close_issuance(
        &self,
        id: IssuanceId,
        submitted_at: DateTime<Utc>,
    ) -> StoreResult<Issuance> {
        let _writer = self.writer.lock().await;
        let mut tx = self.pool.begin().await?;
        let mut issuance = fetch_issuance(&mut tx, id)
            .await?
            .ok_or_else(|| issuance_not_found(id))?;
        issuance.close(submitted_at)?;

        // Guarded so a concurrent submit cannot overwrite the first date.
        let updated = sqlx::query(
            "UPDATE issuance SET submission_date = ?1 WHERE id = ?2 AND submission_date IS NULL",
        )
        .bind(submitted_at)
        .bind(id.get())
        .execute(&mut *tx)
        .await?
        .rows_affected();
        if updated == 0 {
            return Err(DomainError::conflict(format!("issuance {id} already submitted")).into());
        }

        sync_product_status(&mut tx, issuance.product_id()).await?;
        tx.commit().await?;
        Ok(issuance)
    }

    async fn clear_all(&self) -> StoreResult<()> {
        let _writer = self.writer.lock().await;
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM issuance").execute(&mut *tx).await?;
        sqlx::query("DELETE FROM product").execute(&mut *tx).await?;
        tx.commit().await?;
        Ok(())
    }
}
