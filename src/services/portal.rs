use async_trait::async_trait;
use chrono::NaiveDate;

use crate::errors::Result;
use crate::services::saunas::SaunaConfigDocument;

/// Remote reservation portal.
///
/// `HoasClient` talks to the real site; tests inject fakes behind the same
/// interface.
#[async_trait]
pub trait ReservationPortal: Send + Sync {
    /// Human-readable timetable of `service_id` on `date`.
    async fn get_timetables(&self, service_id: &str, date: NaiveDate) -> Result<String>;

    /// Current reservations of every configured account.
    async fn get_reservations(&self) -> Result<String>;

    /// Scrapes sauna names and ids. Makes several requests; run rarely.
    async fn create_config(&self) -> Result<SaunaConfigDocument>;
}
