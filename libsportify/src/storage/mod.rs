//! Local key-value persistence
//!
//! `KeyValueStore` is the raw string store (SQLite on disk, or memory in
//! tests). `Storage` sits on top of it and exposes the three records the app
//! keeps across restarts: the auth token, the user profile and the favourites
//! list, each stored as JSON under a fixed key.
//!
//! `Storage` never propagates failures. Every error is logged and the call
//! degrades to "nothing stored", so callers cannot tell an empty store from a
//! broken one.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

use crate::error::{Result, StorageError};
use crate::types::{Team, UserProfile};

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

pub const TOKEN_KEY: &str = "@sportify_token";
pub const USER_KEY: &str = "@sportify_user";
pub const FAVOURITES_KEY: &str = "@sportify_favourites";

/// Asynchronous string key-value store
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get_item(&self, key: &str) -> Result<Option<String>>;

    async fn set_item(&self, key: &str, value: &str) -> Result<()>;

    async fn remove_item(&self, key: &str) -> Result<()>;

    /// Remove several keys; stops at the first failure
    async fn multi_remove(&self, keys: &[&str]) -> Result<()> {
        for key in keys {
            self.remove_item(key).await?;
        }
        Ok(())
    }
}

/// Typed access to the persisted records
#[derive(Clone)]
pub struct Storage {
    backend: Arc<dyn KeyValueStore>,
}

impl Storage {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// Storage over a fresh in-memory backend
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    // ---- auth token ----

    pub async fn save_token(&self, token: &str) {
        if let Err(e) = self.write_json(TOKEN_KEY, &token).await {
            tracing::error!("Error saving token: {}", e);
        }
    }

    /// Stored token; a blank token counts as none
    pub async fn get_token(&self) -> Option<String> {
        let token: Option<String> = self.read_json(TOKEN_KEY).await.unwrap_or_else(|e| {
            tracing::error!("Error getting token: {}", e);
            None
        });
        token.filter(|t| !t.trim().is_empty())
    }

    pub async fn remove_token(&self) {
        if let Err(e) = self.backend.remove_item(TOKEN_KEY).await {
            tracing::error!("Error removing token: {}", e);
        }
    }

    // ---- user profile ----

    pub async fn save_user(&self, user: &UserProfile) {
        if let Err(e) = self.write_json(USER_KEY, user).await {
            tracing::error!("Error saving user: {}", e);
        }
    }

    pub async fn get_user(&self) -> Option<UserProfile> {
        self.read_json(USER_KEY).await.unwrap_or_else(|e| {
            tracing::error!("Error getting user: {}", e);
            None
        })
    }

    pub async fn remove_user(&self) {
        if let Err(e) = self.backend.remove_item(USER_KEY).await {
            tracing::error!("Error removing user: {}", e);
        }
    }

    // ---- favourites ----

    pub async fn save_favourites(&self, favourites: &[Team]) {
        if let Err(e) = self.try_save_favourites(favourites).await {
            tracing::error!("Error saving favourites: {}", e);
        }
    }

    /// Like `save_favourites`, but reports the failure
    pub async fn try_save_favourites(&self, favourites: &[Team]) -> Result<()> {
        self.write_json(FAVOURITES_KEY, &favourites).await
    }

    /// Persisted favourites, or an empty list when none (or unreadable)
    pub async fn load_favourites(&self) -> Vec<Team> {
        self.try_load_favourites().await.unwrap_or_else(|e| {
            tracing::error!("Error loading favourites: {}", e);
            Vec::new()
        })
    }

    /// Like `load_favourites`, but reports a broken backend or record
    pub async fn try_load_favourites(&self) -> Result<Vec<Team>> {
        Ok(self
            .read_json::<Vec<Team>>(FAVOURITES_KEY)
            .await?
            .unwrap_or_default())
    }

    pub async fn clear_favourites(&self) {
        if let Err(e) = self.backend.remove_item(FAVOURITES_KEY).await {
            tracing::error!("Error clearing favourites: {}", e);
        }
    }

    // ---- utilities ----

    /// Remove every record the app owns
    pub async fn clear_all(&self) {
        if let Err(e) = self
            .backend
            .multi_remove(&[TOKEN_KEY, USER_KEY, FAVOURITES_KEY])
            .await
        {
            tracing::error!("Error clearing all storage: {}", e);
        }
    }

    /// True when a token is stored
    pub async fn is_logged_in(&self) -> bool {
        self.get_token().await.is_some()
    }

    async fn read_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.backend.get_item(key).await? {
            Some(raw) => {
                let value = serde_json::from_str(&raw).map_err(StorageError::Serialization)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    async fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value).map_err(StorageError::Serialization)?;
        self.backend.set_item(key, &raw).await
    }
}
