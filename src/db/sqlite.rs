use crate::config::DatabaseConfig;
use crate::db::lookup::{Lookup, LookupValue};
use crate::error::HubError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use tracing::debug;

pub type SqlitePool = Pool<Sqlite>;

/// Open the bounded connection pool for the configured database file.
/// The file is created if it does not exist yet.
pub async fn connect(cfg: &DatabaseConfig) -> Result<SqlitePool, HubError> {
    let connect_opts = SqliteConnectOptions::new()
        .filename(&cfg.path)
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(cfg.busy_timeout());
    let pool = SqlitePoolOptions::new()
        .max_connections(cfg.max_connections.max(1))
        .acquire_timeout(cfg.acquire_timeout())
        .connect_with(connect_opts)
        .await?;
    debug!(
        path = %cfg.path.display(),
        max_connections = cfg.max_connections,
        "sqlite pool opened"
    );
    Ok(pool)
}

#[derive(Clone)]
pub struct HubStorage {
    pool: SqlitePool,
}

impl HubStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Execute a multi-statement DDL script in one transaction.
    pub async fn init_schema(&self, script: &str) -> Result<(), HubError> {
        let mut tx = self.pool.begin().await?;
        sqlx::raw_sql(script).execute(&mut *tx).await?;
        tx.commit().await?;
        Ok(())
    }

    /// Whether at least one row matches the lookup.
    pub async fn exists(&self, lookup: Lookup<'_>) -> Result<bool, HubError> {
        let sql = lookup.select_sql();
        let query = sqlx::query(&sql);
        let query = match lookup.value() {
            LookupValue::Int(v) => query.bind(v),
            LookupValue::Text(s) => query.bind(s),
        };
        let row = query.fetch_optional(&self.pool).await?;
        Ok(row.is_some())
    }

    /// `NotFound` unless the lookup matches a row.
    pub async fn ensure_exists(&self, lookup: Lookup<'_>) -> Result<(), HubError> {
        if self.exists(lookup).await? {
            Ok(())
        } else {
            Err(HubError::not_found(format!("{lookup} not found")))
        }
    }

    /// `Conflict` if the lookup already matches a row.
    pub async fn ensure_absent(&self, lookup: Lookup<'_>) -> Result<(), HubError> {
        if self.exists(lookup).await? {
            Err(HubError::conflict(format!("{lookup} already exists")))
        } else {
            Ok(())
        }
    }

    /// Close the pool. Idempotent; later queries fail with `PoolClosed`.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    pub fn is_closed(&self) -> bool {
        self.pool.is_closed()
    }
}
