pub mod seed;
pub mod sql;

use std::{
    path::{Path, PathBuf},
    str::FromStr,
};

use anyhow::Context;
use serde_json::{Map, Value};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Row, SqlitePool,
};

use crate::model::db::{Error, Info};

pub type Record = Map<String, Value>;

pub struct Database {
    pool: SqlitePool,
    path: PathBuf,
}

impl Database {
    pub async fn connect(path: &Path, create: bool) -> anyhow::Result<Self> {
        tracing::info!(path = %path.display(), create, "connecting to sqlite");
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(create);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .with_context(|| format!("can't open database {}", path.display()))?;
        tracing::info!("connected to sqlite");
        Ok(Database {
            pool,
            path: path.to_path_buf(),
        })
    }

    /// Single connection database living as long as the pool.
    pub async fn in_memory() -> anyhow::Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .min_connections(1)
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;
        Ok(Database {
            pool,
            path: PathBuf::from(":memory:"),
        })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn info(&self) -> Info {
        let name = self
            .path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        let full_path = std::path::absolute(&self.path).unwrap_or_else(|_| self.path.clone());
        Info {
            name,
            path: self.path.display().to_string(),
            full_path: full_path.display().to_string(),
        }
    }

    pub async fn tables(&self) -> Result<Vec<String>, Error> {
        let rows = sqlx::query("SELECT name FROM sqlite_master WHERE type='table'")
            .fetch_all(&self.pool)
            .await?;
        let names = rows
            .iter()
            .map(|row| row.try_get::<String, _>("name"))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(names)
    }

    pub async fn rows(&self, table: &str) -> Result<Vec<Record>, Error> {
        let sql = sql::select_sql(table)?;
        tracing::debug!(sql = sql, "select");
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        let res = rows
            .iter()
            .map(sql::row_to_json)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(res)
    }

    /// Returns the rowid of the new row.
    pub async fn insert(&self, table: &str, data: &Record) -> Result<i64, Error> {
        let sql = sql::insert_sql(table, data)?;
        tracing::debug!(sql = sql, "insert");
        let query = data.values().fold(sqlx::query(&sql), sql::bind_value);
        let res = query.execute(&self.pool).await?;
        Ok(res.last_insert_rowid())
    }

    pub async fn update(&self, table: &str, id: &str, data: &Record) -> Result<u64, Error> {
        let sql = sql::update_sql(table, data)?;
        tracing::debug!(sql = sql, id, "update");
        let query = data.values().fold(sqlx::query(&sql), sql::bind_value);
        let res = sql::bind_id(query, id).execute(&self.pool).await?;
        Ok(res.rows_affected())
    }

    pub async fn delete(&self, table: &str, id: &str) -> Result<u64, Error> {
        let sql = sql::delete_sql(table)?;
        tracing::debug!(sql = sql, id, "delete");
        let res = sql::bind_id(sqlx::query(&sql), id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected())
    }

    pub async fn clear(&self, table: &str) -> Result<u64, Error> {
        let sql = sql::clear_sql(table)?;
        tracing::warn!(sql = sql, "clear table");
        let res = sqlx::query(&sql).execute(&self.pool).await?;
        Ok(res.rows_affected())
    }
}
