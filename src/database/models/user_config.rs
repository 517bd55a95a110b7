use chrono::{Locale, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;

use crate::services::saunas::DEFAULT_SAUNA;
use crate::utils::datetime::parse_locale;

pub const DEFAULT_LANG: &str = "en";

/// A user-adjustable setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Setting {
    Lang,
    Sauna,
}

impl Setting {
    pub const ALL: [Setting; 2] = [Setting::Lang, Setting::Sauna];

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "lang" => Some(Setting::Lang),
            "sauna" => Some(Setting::Sauna),
            _ => None,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Setting::Lang => "lang",
            Setting::Sauna => "sauna",
        }
    }
}

impl fmt::Display for Setting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Per-chat settings.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct UserConfig {
    pub chat_id: i64,
    pub lang: String,
    pub sauna: String,
}

impl UserConfig {
    /// Defaults for a chat that has never configured anything.
    pub fn new(chat_id: i64) -> Self {
        Self {
            chat_id,
            lang: DEFAULT_LANG.to_string(),
            sauna: DEFAULT_SAUNA.to_string(),
        }
    }

    pub fn get(&self, setting: Setting) -> &str {
        match setting {
            Setting::Lang => &self.lang,
            Setting::Sauna => &self.sauna,
        }
    }

    /// Stores an already validated value.
    pub fn apply(&mut self, setting: Setting, value: String) {
        match setting {
            Setting::Lang => self.lang = value,
            Setting::Sauna => self.sauna = value,
        }
    }

    /// Stored values were validated on the way in; fall back to English if
    /// the locale tables ever drop one.
    pub fn locale(&self) -> Locale {
        parse_locale(&self.lang).unwrap_or(Locale::en_US)
    }

    pub fn sauna_letter(&self) -> char {
        self.sauna.chars().next().unwrap_or(DEFAULT_SAUNA)
    }

    /// `key: value` lines in `Setting::ALL` order.
    pub fn describe(&self) -> String {
        Setting::ALL
            .iter()
            .map(|setting| format!("{}: {}", setting.key(), self.get(*setting)))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub async fn find_by_chat_id(
        pool: &sqlx::SqlitePool,
        chat_id: i64,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, UserConfig>(
            "SELECT chat_id, lang, sauna FROM user_configs WHERE chat_id = ?",
        )
        .bind(chat_id)
        .fetch_optional(pool)
        .await
    }

    /// Inserts default settings; returns false when the chat already exists.
    pub async fn create(pool: &sqlx::SqlitePool, chat_id: i64) -> Result<bool, sqlx::Error> {
        let defaults = Self::new(chat_id);
        let result = sqlx::query(
            "INSERT OR IGNORE INTO user_configs (chat_id, lang, sauna, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(defaults.chat_id)
        .bind(&defaults.lang)
        .bind(&defaults.sauna)
        .bind(Utc::now().to_rfc3339())
        .execute(pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    pub async fn upsert(&self, pool: &sqlx::SqlitePool) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO user_configs (chat_id, lang, sauna, created_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(chat_id) DO UPDATE SET lang = excluded.lang, sauna = excluded.sauna
            "#,
        )
        .bind(self.chat_id)
        .bind(&self.lang)
        .bind(&self.sauna)
        .bind(Utc::now().to_rfc3339())
        .execute(pool)
        .await?;

        Ok(())
    }

    pub async fn list_all(pool: &sqlx::SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, UserConfig>(
            "SELECT chat_id, lang, sauna FROM user_configs ORDER BY chat_id",
        )
        .fetch_all(pool)
        .await
    }
}
