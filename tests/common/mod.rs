#![allow(dead_code)]

use async_trait::async_trait;
use chrono::NaiveDate;
use sauna_bot::bot::dispatcher::CommandDispatcher;
use sauna_bot::database::store::InMemoryUserConfigStore;
use sauna_bot::errors::{BotError, Result};
use sauna_bot::services::portal::ReservationPortal;
use sauna_bot::services::saunas::{SaunaConfigDocument, SaunaTable};
use sauna_bot::utils::datetime::FixedClock;
use std::sync::{Arc, Mutex};

pub const SAUNAS_YAML: &str = r#"
saunavuorot:
  Sauna 1, H-talo:
    view: "101"
    reserve:
      Sauna 1, H-talo: "201"
  Sauna 2, M-talo:
    view: "102"
    reserve:
      Sauna 2, M-talo: "202"
  Sauna 3, E-talo:
    view: "103"
    reserve:
      Sauna 3, E-talo: "203"
"#;

/// Wednesday 2026-10-14
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 14).unwrap()
}

pub fn sauna_document() -> SaunaConfigDocument {
    SaunaConfigDocument::from_yaml_str(SAUNAS_YAML).unwrap()
}

pub fn sauna_table() -> SaunaTable {
    SaunaTable::build(&sauna_document()).unwrap()
}

/// Records every timetable query and answers with canned text.
#[derive(Default)]
pub struct FakePortal {
    pub timetable_calls: Mutex<Vec<(String, NaiveDate)>>,
    pub reservation_calls: Mutex<usize>,
    pub fail: bool,
    pub document: SaunaConfigDocument,
}

impl FakePortal {
    pub fn new() -> Self {
        Self {
            document: sauna_document(),
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    pub fn timetable_calls(&self) -> Vec<(String, NaiveDate)> {
        self.timetable_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReservationPortal for FakePortal {
    async fn get_timetables(&self, service_id: &str, date: NaiveDate) -> Result<String> {
        self.timetable_calls
            .lock()
            .unwrap()
            .push((service_id.to_string(), date));
        if self.fail {
            return Err(BotError::remote("connection refused"));
        }
        Ok(format!("17:00-18:00 free @{service_id}"))
    }

    async fn get_reservations(&self) -> Result<String> {
        *self.reservation_calls.lock().unwrap() += 1;
        if self.fail {
            return Err(BotError::remote("connection refused"));
        }
        Ok("user@example.com:\nSauna 1, H-talo 15.10.2026 17:00-18:00".to_string())
    }

    async fn create_config(&self) -> Result<SaunaConfigDocument> {
        if self.fail {
            return Err(BotError::remote("connection refused"));
        }
        Ok(self.document.clone())
    }
}

pub struct TestBot {
    pub dispatcher: CommandDispatcher,
    pub portal: Arc<FakePortal>,
    pub store: Arc<InMemoryUserConfigStore>,
}

pub fn test_bot_with(portal: FakePortal) -> TestBot {
    let portal = Arc::new(portal);
    let store = Arc::new(InMemoryUserConfigStore::new());
    let dispatcher = CommandDispatcher::new(
        store.clone(),
        portal.clone(),
        sauna_table(),
        Arc::new(FixedClock(today())),
    );
    TestBot {
        dispatcher,
        portal,
        store,
    }
}

pub fn test_bot() -> TestBot {
    test_bot_with(FakePortal::new())
}

pub const BOT_NAME: &str = "SaunaBot";
