//! Durable key-value storage for session state.
//!
//! The gate only ever sees the object-safe [`SessionStore`] trait; the
//! embedding app picks the backend. `SqliteStore` is the durable on-device
//! backend, `MemoryStore` backs tests and ephemeral embeddings.

use std::collections::HashMap;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use anyhow::Context;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Row, SqlitePool};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend error: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn backend(err: impl core::fmt::Display) -> Self {
        Self::Backend(err.to_string())
    }
}

/// Boxed future returned by [`SessionStore`] methods (keeps the trait
/// object-safe so it can live behind `Arc<dyn SessionStore>`).
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + Send + 'a>>;

/// Object-safe async key-value store.
pub trait SessionStore: Send + Sync {
    fn get<'a>(&'a self, key: &'a str) -> StoreFuture<'a, Option<String>>;
    fn put<'a>(&'a self, key: &'a str, value: &'a str) -> StoreFuture<'a, ()>;
    fn remove<'a>(&'a self, key: &'a str) -> StoreFuture<'a, ()>;
    fn clear(&self) -> StoreFuture<'_, ()>;
}

/// In-memory store for tests and ephemeral embeddings.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, StoreError> {
        self.entries
            .lock()
            .map_err(|_| StoreError::Backend("memory store poisoned".to_string()))
    }
}

impl SessionStore for MemoryStore {
    fn get<'a>(&'a self, key: &'a str) -> StoreFuture<'a, Option<String>> {
        Box::pin(async move { Ok(self.lock()?.get(key).cloned()) })
    }

    fn put<'a>(&'a self, key: &'a str, value: &'a str) -> StoreFuture<'a, ()> {
        Box::pin(async move {
            self.lock()?.insert(key.to_string(), value.to_string());
            Ok(())
        })
    }

    fn remove<'a>(&'a self, key: &'a str) -> StoreFuture<'a, ()> {
        Box::pin(async move {
            self.lock()?.remove(key);
            Ok(())
        })
    }

    fn clear(&self) -> StoreFuture<'_, ()> {
        Box::pin(async move {
            self.lock()?.clear();
            Ok(())
        })
    }
}

/// SQLite-backed durable store.
///
/// Cheap to clone; the pool is initialized lazily on first use.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: Arc<tokio::sync::Mutex<Option<SqlitePool>>>,
    location: Location,
}

#[derive(Debug, Clone)]
enum Location {
    File(PathBuf),
    InMemory,
}

impl SqliteStore {
    /// Store backed by a database file at `path` (created if missing).
    pub fn at_path(path: impl AsRef<Path>) -> Self {
        Self {
            pool: Arc::new(tokio::sync::Mutex::new(None)),
            location: Location::File(path.as_ref().to_path_buf()),
        }
    }

    /// Store at the platform-default data directory.
    pub fn at_default_path() -> anyhow::Result<Self> {
        let dir = dirs::data_dir().context("failed to determine app data directory")?;
        Ok(Self::at_path(dir.join("kerala-sellers").join("session.db")))
    }

    /// Non-durable store (single in-memory connection); used in tests.
    pub fn in_memory() -> Self {
        Self {
            pool: Arc::new(tokio::sync::Mutex::new(None)),
            location: Location::InMemory,
        }
    }

    async fn ensure_initialized(&self) -> anyhow::Result<()> {
        let mut pool_guard = self.pool.lock().await;
        if pool_guard.is_some() {
            return Ok(());
        }

        let options = match &self.location {
            Location::File(path) => {
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent).with_context(|| {
                        format!("failed to create session store directory at {:?}", parent)
                    })?;
                }
                SqliteConnectOptions::new()
                    .filename(path)
                    .create_if_missing(true)
            }
            Location::InMemory => SqliteConnectOptions::new().in_memory(true),
        };

        // A single connection keeps the in-memory variant coherent (each
        // in-memory connection is its own database).
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .context("failed to create SQLite pool for SessionStore")?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS session_store (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await
        .context("failed to create session_store table")?;

        *pool_guard = Some(pool);
        Ok(())
    }

    async fn get_pool(&self) -> Result<SqlitePool, StoreError> {
        self.ensure_initialized()
            .await
            .map_err(StoreError::backend)?;
        let pool_guard = self.pool.lock().await;
        pool_guard
            .as_ref()
            .cloned()
            .ok_or_else(|| StoreError::Backend("session store not initialized".to_string()))
    }
}

impl SessionStore for SqliteStore {
    fn get<'a>(&'a self, key: &'a str) -> StoreFuture<'a, Option<String>> {
        Box::pin(async move {
            let pool = self.get_pool().await?;
            let row = sqlx::query("SELECT value FROM session_store WHERE key = ?1")
                .bind(key)
                .fetch_optional(&pool)
                .await
                .map_err(StoreError::backend)?;
            match row {
                Some(row) => {
                    let value: String = row.try_get("value").map_err(StoreError::backend)?;
                    Ok(Some(value))
                }
                None => Ok(None),
            }
        })
    }

    fn put<'a>(&'a self, key: &'a str, value: &'a str) -> StoreFuture<'a, ()> {
        Box::pin(async move {
            let pool = self.get_pool().await?;
            sqlx::query(
                r#"
                INSERT INTO session_store (key, value)
                VALUES (?1, ?2)
                ON CONFLICT (key) DO UPDATE SET value = excluded.value
                "#,
            )
            .bind(key)
            .bind(value)
            .execute(&pool)
            .await
            .map_err(StoreError::backend)?;
            Ok(())
        })
    }

    fn remove<'a>(&'a self, key: &'a str) -> StoreFuture<'a, ()> {
        Box::pin(async move {
            let pool = self.get_pool().await?;
            sqlx::query("DELETE FROM session_store WHERE key = ?1")
                .bind(key)
                .execute(&pool)
                .await
                .map_err(StoreError::backend)?;
            Ok(())
        })
    }

    fn clear(&self) -> StoreFuture<'_, ()> {
        Box::pin(async move {
            let pool = self.get_pool().await?;
            sqlx::query("DELETE FROM session_store")
                .execute(&pool)
                .await
                .map_err(StoreError::backend)?;
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_store_round_trips() {
        let store = MemoryStore::new();
        store.put("access_token", "tok").await.unwrap();
        assert_eq!(store.get("access_token").await.unwrap().as_deref(), Some("tok"));
        store.remove("access_token").await.unwrap();
        assert_eq!(store.get("access_token").await.unwrap(), None);
    }

    #[tokio::test]
    async fn sqlite_store_round_trips() {
        let store = SqliteStore::in_memory();
        store.put("user_type", "seller").await.unwrap();
        store.put("user_type", "seller").await.unwrap(); // upsert, not error
        assert_eq!(store.get("user_type").await.unwrap().as_deref(), Some("seller"));

        store.put("access_token", "tok").await.unwrap();
        store.clear().await.unwrap();
        assert_eq!(store.get("user_type").await.unwrap(), None);
        assert_eq!(store.get("access_token").await.unwrap(), None);
    }
}
