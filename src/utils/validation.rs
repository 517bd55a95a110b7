use anyhow::{anyhow, Result};

use crate::database::models::Setting;
use crate::services::saunas::SaunaTable;
use crate::utils::datetime::parse_locale;

/// Telegram never uses 0. Users, groups and channels may use any other
/// 64-bit value, including user ids above 2^31.
pub fn validate_telegram_chat_id(chat_id: i64) -> Result<()> {
    if chat_id == 0 {
        return Err(anyhow!("Chat ID cannot be zero"));
    }
    Ok(())
}

fn known_keys() -> String {
    Setting::ALL
        .iter()
        .map(|s| s.key())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Validates one `key=value` argument and returns the normalized value.
pub fn validate_setting_pair(pair: &str, saunas: &SaunaTable) -> Result<(Setting, String)> {
    let (key, value) = pair
        .split_once('=')
        .map(|(k, v)| (k.trim(), v.trim()))
        .filter(|(k, v)| !k.is_empty() && !v.is_empty())
        .ok_or_else(|| anyhow!("'{}' is not of the form key=value", pair))?;

    let setting = Setting::from_key(key).ok_or_else(|| {
        anyhow!("Unknown setting '{}' in '{}'. Available: {}", key, pair, known_keys())
    })?;

    match setting {
        Setting::Lang => {
            if parse_locale(value).is_none() {
                return Err(anyhow!(
                    "'{}': lang must be a valid locale code, e.g. en, fi or fi_FI",
                    pair
                ));
            }
            Ok((setting, value.to_string()))
        }
        Setting::Sauna => {
            let value = value.to_lowercase();
            let mut chars = value.chars();
            match (chars.next(), chars.next()) {
                (Some(letter), None) if saunas.contains(letter) => Ok((setting, value)),
                _ => {
                    let letters = saunas
                        .letters()
                        .iter()
                        .map(char::to_string)
                        .collect::<Vec<_>>()
                        .join(", ");
                    Err(anyhow!("'{}': sauna must be one of {}", pair, letters))
                }
            }
        }
    }
}

/// Validates every pair; the first failure rejects the whole batch.
pub fn validate_setting_pairs(pairs: &[String], saunas: &SaunaTable) -> Result<Vec<(Setting, String)>> {
    pairs
        .iter()
        .map(|pair| validate_setting_pair(pair, saunas))
        .collect()
}
