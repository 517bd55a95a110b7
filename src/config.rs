use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

const MISSING_CONFIG: &str = "You should have 'config.yaml' file to give hoas account(s)\n\
and telegram bot token. See config.example.yaml";

/// Credentials for one HOAS portal account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub login: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub telegram_bot_token: String,
    pub accounts: Vec<Account>,
    pub database_url: String,
    pub http_port: u16,
    pub sauna_config_path: String,
    pub portal_url: String,
}

/// On-disk shape of `config.yaml`. Only `token` and `accounts` are mandatory.
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    token: Option<String>,
    accounts: Option<Vec<Account>>,
    database_url: Option<String>,
    http_port: Option<u16>,
    sauna_config_path: Option<String>,
    portal_url: Option<String>,
}

impl Config {
    /// Reads `path` and applies environment overrides.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())
            .map_err(|_| anyhow!("Could not read '{}'\n{}", path.as_ref().display(), MISSING_CONFIG))?;
        let mut config = Self::from_yaml_str(&raw)?;
        config.apply_env()?;
        Ok(config)
    }

    pub fn from_yaml_str(raw: &str) -> Result<Self> {
        let file: FileConfig = serde_yaml::from_str(raw)
            .map_err(|e| anyhow!("Malformed config file: {}\n{}", e, MISSING_CONFIG))?;

        let token = file
            .token
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| anyhow!(MISSING_CONFIG))?;

        let accounts = file
            .accounts
            .filter(|a| !a.is_empty())
            .ok_or_else(|| anyhow!(MISSING_CONFIG))?;

        let database_url = file
            .database_url
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| "sqlite:./data/saunabot.db".to_string());

        Ok(Config {
            telegram_bot_token: token,
            accounts,
            database_url,
            http_port: file.http_port.unwrap_or(3000),
            sauna_config_path: file
                .sauna_config_path
                .unwrap_or_else(|| "sauna_configs.yaml".to_string()),
            portal_url: file
                .portal_url
                .unwrap_or_else(|| "https://booking.hoas.fi".to_string()),
        })
    }

    /// `TELEGRAM_BOT_TOKEN`, `DATABASE_URL` and `HTTP_PORT` take precedence
    /// over the file.
    pub fn apply_env(&mut self) -> Result<()> {
        if let Ok(token) = env::var("TELEGRAM_BOT_TOKEN") {
            if !token.trim().is_empty() {
                self.telegram_bot_token = token;
            }
        }

        if let Ok(database_url) = env::var("DATABASE_URL") {
            if !database_url.trim().is_empty() {
                self.database_url = database_url;
            }
        }

        if let Ok(port_str) = env::var("HTTP_PORT") {
            self.http_port = port_str
                .trim()
                .parse()
                .map_err(|_| anyhow!("Invalid HTTP_PORT"))?;
        }

        Ok(())
    }
}
