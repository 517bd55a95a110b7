//! HOAS booking site client.

pub mod scrape;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::config::Account;
use crate::errors::{BotError, Result};
use crate::services::portal::ReservationPortal;
use crate::services::saunas::{SaunaConfigDocument, ServiceIds, SAUNA_CATEGORY};
use crate::utils::datetime::Clock;
use crate::utils::logging::{log_portal_error, log_portal_request};

const LOGIN_PATH: &str = "/auth/login";
const SERVICES_PATH: &str = "/varaus/service";
const RESERVATIONS_PATH: &str = "/varaus/service/my-reservations";

pub struct HoasClient {
    base_url: String,
    accounts: Vec<Account>,
    clock: Arc<dyn Clock>,
    // Logged-in HTTP clients keyed by account login.
    sessions: Mutex<HashMap<String, Client>>,
}

impl HoasClient {
    pub fn new(
        base_url: impl Into<String>,
        accounts: Vec<Account>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        if accounts.is_empty() {
            return Err(BotError::config("at least one HOAS account is required"));
        }
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            accounts,
            clock,
            sessions: Mutex::new(HashMap::new()),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn primary_account(&self) -> Result<&Account> {
        self.accounts
            .first()
            .ok_or_else(|| BotError::config("no HOAS accounts configured"))
    }

    async fn login(&self, account: &Account) -> Result<Client> {
        log_portal_request("login", Some(&account.login));
        let client = Client::builder()
            .cookie_store(true)
            .user_agent(concat!("sauna-bot/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let page = client
            .post(self.url(LOGIN_PATH))
            .form(&[("login", account.login.as_str()), ("password", account.password.as_str())])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        if scrape::is_login_page(&page)? {
            log_portal_error("login", "credentials rejected", Some(&account.login));
            return Err(BotError::remote(format!("login failed for '{}'", account.login)));
        }
        Ok(client)
    }

    async fn session(&self, account: &Account, fresh: bool) -> Result<Client> {
        let mut sessions = self.sessions.lock().await;
        if !fresh {
            if let Some(client) = sessions.get(&account.login) {
                return Ok(client.clone());
            }
        }
        let client = self.login(account).await?;
        sessions.insert(account.login.clone(), client.clone());
        Ok(client)
    }

    /// GETs `path` as `account`, logging in again once if the session expired.
    async fn fetch(&self, account: &Account, path: &str) -> Result<String> {
        log_portal_request("fetch", Some(path));
        let mut fresh = false;
        loop {
            let client = self.session(account, fresh).await?;
            let page = client
                .get(self.url(path))
                .send()
                .await?
                .error_for_status()?
                .text()
                .await?;

            if !scrape::is_login_page(&page)? {
                return Ok(page);
            }
            if fresh {
                log_portal_error("fetch", "session rejected after login", Some(path));
                return Err(BotError::remote(format!("not authorized to fetch '{path}'")));
            }
            fresh = true;
        }
    }

    fn timetable_path(service_id: &str, date: NaiveDate) -> String {
        format!("{SERVICES_PATH}/timetable/{}/{}", service_id, date.format("%d/%m/%Y"))
    }

    /// Today's timetable of `view`; its resource select lists the reserve ids.
    fn discovery_path(&self, view: &str) -> String {
        Self::timetable_path(view, self.clock.today())
    }
}

#[async_trait]
impl ReservationPortal for HoasClient {
    async fn get_timetables(&self, service_id: &str, date: NaiveDate) -> Result<String> {
        let account = self.primary_account()?;
        let page = self.fetch(account, &Self::timetable_path(service_id, date)).await?;
        let slots = scrape::parse_timetable(&page)?;
        Ok(scrape::render_timetable(&slots))
    }

    async fn get_reservations(&self) -> Result<String> {
        let mut sections = Vec::with_capacity(self.accounts.len());
        for account in &self.accounts {
            let page = self.fetch(account, RESERVATIONS_PATH).await?;
            let lines = scrape::parse_reservations(&page)?;
            let body = if lines.is_empty() {
                "No reservations".to_string()
            } else {
                lines.join("\n")
            };
            sections.push(format!("{}:\n{}", account.login, body));
        }
        Ok(sections.join("\n\n"))
    }

    async fn create_config(&self) -> Result<SaunaConfigDocument> {
        let account = self.primary_account()?;
        let listing = self.fetch(account, SERVICES_PATH).await?;
        let mut groups = scrape::parse_service_list(&listing)?;
        let saunas = groups
            .remove(SAUNA_CATEGORY)
            .ok_or_else(|| BotError::remote(format!("no '{SAUNA_CATEGORY}' services found")))?;

        let mut document = SaunaConfigDocument::default();
        for (name, view) in saunas {
            let page = self.fetch(account, &self.discovery_path(&view)).await?;
            let reserve = scrape::parse_reservable_resources(&page)?;
            if reserve.is_empty() {
                log_portal_error("create_config", "no reservable resources", Some(&name));
            }
            document.saunavuorot.insert(name, ServiceIds { view, reserve });
        }
        Ok(document)
    }
}
