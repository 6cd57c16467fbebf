//! SQLite-backed key-value store

use async_trait::async_trait;
use sqlx::sqlite::SqlitePool;
use sqlx::Row;
use std::path::Path;

use super::KeyValueStore;
use crate::error::{Result, StorageError};

#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (creating if needed) the store at `db_path`
    pub async fn new(db_path: &str) -> Result<Self> {
        let expanded_path = shellexpand::tilde(db_path).to_string();
        let path = Path::new(&expanded_path);

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(StorageError::IoError)?;
            }
        }

        // mode=rwc creates the file on first use
        let db_url = format!("sqlite://{}?mode=rwc", expanded_path.replace('\\', "/"));

        let pool = SqlitePool::connect(&db_url)
            .await
            .map_err(StorageError::SqlxError)?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(StorageError::MigrationError)?;

        tracing::debug!("Opened storage at {}", expanded_path);
        Ok(Self { pool })
    }

    /// Close the pool, flushing pending writes
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl KeyValueStore for SqliteStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        let row = sqlx::query("SELECT value FROM kv_store WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::SqlxError)?;

        Ok(row.map(|r| r.get::<String, _>("value")))
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO kv_store (key, value) VALUES (?, ?)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = strftime('%s', 'now')
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await
        .map_err(StorageError::SqlxError)?;

        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<()> {
        sqlx::query("DELETE FROM kv_store WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(StorageError::SqlxError)?;

        Ok(())
    }

    async fn multi_remove(&self, keys: &[&str]) -> Result<()> {
        let mut tx = self.pool.begin().await.map_err(StorageError::SqlxError)?;
        for key in keys {
            sqlx::query("DELETE FROM kv_store WHERE key = ?")
                .bind(*key)
                .execute(&mut *tx)
                .await
                .map_err(StorageError::SqlxError)?;
        }
        tx.commit().await.map_err(StorageError::SqlxError)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SportifyError;
    use tempfile::TempDir;

    async fn open(temp_dir: &TempDir) -> SqliteStore {
        let path = temp_dir.path().join("storage.db");
        SqliteStore::new(path.to_str().unwrap()).await.unwrap()
    }

    #[tokio::test]
    async fn test_set_get_remove() {
        let temp_dir = TempDir::new().unwrap();
        let store = open(&temp_dir).await;

        assert!(store.get_item("k").await.unwrap().is_none());

        store.set_item("k", "v1").await.unwrap();
        store.set_item("k", "v2").await.unwrap();
        assert_eq!(store.get_item("k").await.unwrap().as_deref(), Some("v2"));

        store.remove_item("k").await.unwrap();
        assert!(store.get_item("k").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_values_persist_across_instances() {
        let temp_dir = TempDir::new().unwrap();

        {
            let store = open(&temp_dir).await;
            store.set_item("@sportify_token", "\"abc\"").await.unwrap();
            store.close().await;
        }

        let store = open(&temp_dir).await;
        assert_eq!(
            store.get_item("@sportify_token").await.unwrap().as_deref(),
            Some("\"abc\"")
        );
    }

    #[tokio::test]
    async fn test_multi_remove_in_one_transaction() {
        let temp_dir = TempDir::new().unwrap();
        let store = open(&temp_dir).await;

        store.set_item("a", "1").await.unwrap();
        store.set_item("b", "2").await.unwrap();
        store.set_item("c", "3").await.unwrap();

        store.multi_remove(&["a", "b", "missing"]).await.unwrap();

        assert!(store.get_item("a").await.unwrap().is_none());
        assert!(store.get_item("b").await.unwrap().is_none());
        assert!(store.get_item("c").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a").join("b").join("storage.db");

        let store = SqliteStore::new(nested.to_str().unwrap()).await.unwrap();
        store.set_item("k", "v").await.unwrap();
        assert!(nested.exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_invalid_path_is_storage_error() {
        let result = SqliteStore::new("/tmp/sportify\0invalid.db").await;
        assert!(matches!(result, Err(SportifyError::Storage(_))));
    }
}
