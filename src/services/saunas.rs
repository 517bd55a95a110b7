//! Sauna configuration document and the letter -> portal id table built from it.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::errors::{BotError, Result};
use crate::services::portal::ReservationPortal;
use crate::utils::logging::log_system_event;

/// Portal category holding the sauna services.
pub const SAUNA_CATEGORY: &str = "saunavuorot";

/// Sauna used when a command names none.
pub const DEFAULT_SAUNA: char = 'h';

#[allow(clippy::expect_used)]
mod patterns {
    use lazy_static::lazy_static;
    use regex::Regex;

    lazy_static! {
        pub static ref SAUNA_NAME: Regex =
            Regex::new(r"^Sauna \d, (?P<letter>[A-Z])-talo$").expect("Invalid sauna name pattern");
    }
}

use patterns::SAUNA_NAME;

/// Ids of one portal service: the timetable view and the reservable resources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceIds {
    #[serde(deserialize_with = "id_from_scalar")]
    pub view: String,
    #[serde(deserialize_with = "ids_from_scalars")]
    pub reserve: BTreeMap<String, String>,
}

/// `{"saunavuorot": {"<Sauna name>": {"view": id, "reserve": {"<Sauna name>": id}}}}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaunaConfigDocument {
    #[serde(default)]
    pub saunavuorot: BTreeMap<String, ServiceIds>,
}

/// Ids are numbers on the portal but older files stored them as strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(text) => text,
            RawId::Number(number) => number.to_string(),
        }
    }
}

fn id_from_scalar<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<String, D::Error> {
    RawId::deserialize(deserializer).map(String::from)
}

fn ids_from_scalars<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<BTreeMap<String, String>, D::Error> {
    let raw = BTreeMap::<String, RawId>::deserialize(deserializer)?;
    Ok(raw.into_iter().map(|(name, id)| (name, String::from(id))).collect())
}

impl SaunaConfigDocument {
    pub fn from_yaml_str(raw: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(raw)?)
    }

    pub fn to_yaml_string(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&raw)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, self.to_yaml_string()?)?;
        Ok(())
    }
}

/// Discovery runs when forced or when no sauna file has been written yet.
pub fn needs_discovery(force: bool, path: impl AsRef<Path>) -> bool {
    force || !path.as_ref().exists()
}

/// Scrapes the portal and writes the result to `path`. A document without
/// any sauna is an error so a broken scrape never replaces a good file.
pub async fn discover_saunas(
    portal: &dyn ReservationPortal,
    path: impl AsRef<Path>,
) -> Result<SaunaConfigDocument> {
    log_system_event("Discovering sauna ids", Some(&path.as_ref().display().to_string()));
    let document = portal.create_config().await?;
    if document.saunavuorot.is_empty() {
        return Err(BotError::remote("portal listed no saunas"));
    }
    // Validate before writing; startup would reject it anyway.
    SaunaTable::build(&document)?;
    document.save(path)?;
    Ok(document)
}

/// Printed once discovery has written the sauna file.
pub const CONFIGS_CREATED: &str = "Configs created";

/// Startup discovery step. Returns the confirmation to print when discovery
/// ran, after which the process exits, or `None` to continue starting up.
pub async fn run_discovery(
    force: bool,
    path: impl AsRef<Path>,
    portal: &dyn ReservationPortal,
) -> Result<Option<&'static str>> {
    if !needs_discovery(force, path.as_ref()) {
        return Ok(None);
    }
    discover_saunas(portal, path).await?;
    Ok(Some(CONFIGS_CREATED))
}

/// Portal ids of a single sauna.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaunaEntry {
    pub letter: char,
    pub view_id: String,
    pub reserve_id: String,
}

/// Immutable letter -> ids mapping, keyed by lowercase letter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaunaTable {
    entries: BTreeMap<char, SaunaEntry>,
}

impl SaunaTable {
    /// Builds the table, rejecting any sauna name outside the
    /// `Sauna <digit>, <LETTER>-talo` pattern.
    pub fn build(document: &SaunaConfigDocument) -> Result<Self> {
        let mut entries = BTreeMap::new();

        for (name, ids) in &document.saunavuorot {
            let letter = SAUNA_NAME
                .captures(name)
                .and_then(|caps| caps.name("letter"))
                .and_then(|m| m.as_str().chars().next())
                .ok_or_else(|| BotError::config(format!("Unexpected sauna name '{name}'")))?
                .to_ascii_lowercase();

            let reserve_id = ids
                .reserve
                .get(name)
                .ok_or_else(|| BotError::config(format!("No reservation id for '{name}'")))?;

            entries.insert(
                letter,
                SaunaEntry {
                    letter,
                    view_id: ids.view.clone(),
                    reserve_id: reserve_id.clone(),
                },
            );
        }

        Ok(Self { entries })
    }

    pub fn get(&self, letter: char) -> Option<&SaunaEntry> {
        self.entries.get(&letter.to_ascii_lowercase())
    }

    pub fn contains(&self, letter: char) -> bool {
        self.get(letter).is_some()
    }

    /// Known letters in alphabetical order.
    pub fn letters(&self) -> Vec<char> {
        self.entries.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
