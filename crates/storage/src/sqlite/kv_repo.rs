use async_trait::async_trait;

use super::SqliteStore;
use crate::repository::{KeyValueStore, StorageError};

fn map_sqlx_error(error: sqlx::Error) -> StorageError {
    match error {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            StorageError::Connection(error.to_string())
        }
        other => StorageError::Query(other.to_string()),
    }
}

#[async_trait]
impl KeyValueStore for SqliteStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        sqlx::query_scalar("SELECT value FROM slots WHERE key = ?1")
            .bind(key)
            .fetch_optional(self.pool())
            .await
            .map_err(map_sqlx_error)
    }

    async fn put(&self, key: &str, value: &str) -> Result<(), StorageError> {
        sqlx::query(
            r"
                INSERT INTO slots (key, value) VALUES (?1, ?2)
                ON CONFLICT(key) DO UPDATE SET value = excluded.value
            ",
        )
        .bind(key)
        .bind(value)
        .execute(self.pool())
        .await
        .map_err(map_sqlx_error)?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM slots WHERE key = ?1")
            .bind(key)
            .execute(self.pool())
            .await
            .map_err(map_sqlx_error)?;
        Ok(())
    }
}
