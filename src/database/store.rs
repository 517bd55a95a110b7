//! Per-chat settings storage behind a trait so handlers can run against an
//! in-memory store in tests.

use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::database::connection::DatabaseManager;
use crate::database::models::UserConfig;
use crate::errors::Result;
use crate::utils::logging::{log_database_error, log_database_operation};

#[async_trait]
pub trait UserConfigStore: Send + Sync {
    async fn get(&self, chat_id: i64) -> Result<Option<UserConfig>>;

    /// Inserts or replaces the whole record.
    async fn save(&self, config: &UserConfig) -> Result<()>;

    /// Registers `chat_id` with default settings. Returns `false` if it was
    /// already registered, leaving its settings untouched.
    async fn add_user(&self, chat_id: i64) -> Result<bool>;

    async fn list(&self) -> Result<Vec<UserConfig>>;
}

pub struct SqliteUserConfigStore {
    db: DatabaseManager,
}

impl SqliteUserConfigStore {
    pub fn new(db: DatabaseManager) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserConfigStore for SqliteUserConfigStore {
    async fn get(&self, chat_id: i64) -> Result<Option<UserConfig>> {
        log_database_operation("SELECT", "user_configs", Some(&chat_id.to_string()));
        UserConfig::find_by_chat_id(&self.db.pool, chat_id)
            .await
            .map_err(|e| {
                log_database_error("SELECT", "user_configs", &e.to_string());
                e.into()
            })
    }

    async fn save(&self, config: &UserConfig) -> Result<()> {
        log_database_operation("UPSERT", "user_configs", Some(&config.chat_id.to_string()));
        config.upsert(&self.db.pool).await.map_err(|e| {
            log_database_error("UPSERT", "user_configs", &e.to_string());
            e.into()
        })
    }

    async fn add_user(&self, chat_id: i64) -> Result<bool> {
        log_database_operation("INSERT", "user_configs", Some(&chat_id.to_string()));
        UserConfig::create(&self.db.pool, chat_id).await.map_err(|e| {
            log_database_error("INSERT", "user_configs", &e.to_string());
            e.into()
        })
    }

    async fn list(&self) -> Result<Vec<UserConfig>> {
        log_database_operation("SELECT", "user_configs", None);
        UserConfig::list_all(&self.db.pool).await.map_err(|e| {
            log_database_error("SELECT", "user_configs", &e.to_string());
            e.into()
        })
    }
}

#[derive(Default)]
pub struct InMemoryUserConfigStore {
    users: RwLock<BTreeMap<i64, UserConfig>>,
}

impl InMemoryUserConfigStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserConfigStore for InMemoryUserConfigStore {
    async fn get(&self, chat_id: i64) -> Result<Option<UserConfig>> {
        Ok(self.users.read().await.get(&chat_id).cloned())
    }

    async fn save(&self, config: &UserConfig) -> Result<()> {
        self.users.write().await.insert(config.chat_id, config.clone());
        Ok(())
    }

    async fn add_user(&self, chat_id: i64) -> Result<bool> {
        let mut users = self.users.write().await;
        if users.contains_key(&chat_id) {
            return Ok(false);
        }
        users.insert(chat_id, UserConfig::new(chat_id));
        Ok(true)
    }

    async fn list(&self) -> Result<Vec<UserConfig>> {
        Ok(self.users.read().await.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_add_user_is_idempotent() {
        let store = InMemoryUserConfigStore::new();
        assert!(store.add_user(7).await.unwrap());

        let mut config = store.get(7).await.unwrap().unwrap();
        config.lang = "fi".to_string();
        store.save(&config).await.unwrap();

        assert!(!store.add_user(7).await.unwrap());
        assert_eq!(store.get(7).await.unwrap().unwrap().lang, "fi");
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_in_memory_unknown_chat() {
        let store = InMemoryUserConfigStore::new();
        assert!(store.get(1).await.unwrap().is_none());
    }
}
