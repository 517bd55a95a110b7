use chrono::{DateTime, Days, Local, Locale, NaiveDate, NaiveTime, TimeZone, Utc};

use crate::errors::{BotError, Result};

/// Language codes whose `xx_XX` spelling is not a real locale.
const DEFAULT_REGIONS: &[(&str, &str)] = &[
    ("en", "en_US"),
    ("da", "da_DK"),
    ("et", "et_EE"),
    ("ja", "ja_JP"),
    ("ko", "ko_KR"),
    ("uk", "uk_UA"),
    ("zh", "zh_CN"),
];

/// Source of "today" for day resolution.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Local wall-clock date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Always reports the same date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Resolves a user language setting to a locale.
///
/// Accepts full POSIX names (`fi_FI`) as well as bare language codes
/// (`fi`, `en`), which map to their default region.
pub fn parse_locale(code: &str) -> Option<Locale> {
    let code = code.trim();
    if code.is_empty() {
        return None;
    }
    if let Ok(locale) = Locale::try_from(code) {
        return Some(locale);
    }
    if code.contains('_') {
        return None;
    }

    let lang = code.to_lowercase();
    if let Some((_, full)) = DEFAULT_REGIONS.iter().find(|(short, _)| *short == lang) {
        return Locale::try_from(*full).ok();
    }
    Locale::try_from(format!("{}_{}", lang, lang.to_uppercase()).as_str()).ok()
}

fn at_midnight(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::default()))
}

fn weekday_abbreviation(date: NaiveDate, locale: Locale) -> String {
    at_midnight(date)
        .format_localized("%a", locale)
        .to_string()
        .to_lowercase()
}

/// Sorted, lower-cased abbreviated weekday names of `locale`.
pub fn weekday_abbreviations(locale: Locale) -> Vec<String> {
    // 2024-01-01 is a Monday; any seven consecutive days will do.
    let monday = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default();
    let mut names: Vec<String> = monday
        .iter_days()
        .take(7)
        .map(|day| weekday_abbreviation(day, locale))
        .collect();
    names.sort();
    names
}

/// Turns a day token into a date.
///
/// A non-negative integer is an offset from `today`. Anything else must be
/// an abbreviated weekday name of `locale` (case-insensitive) and resolves
/// to its next occurrence, `today` included.
pub fn resolve_day(token: &str, locale: Locale, today: NaiveDate) -> Result<NaiveDate> {
    let token = token.trim().to_lowercase();

    if !token.is_empty() && token.chars().all(|c| c.is_ascii_digit()) {
        return token
            .parse::<u64>()
            .ok()
            .and_then(|offset| today.checked_add_days(Days::new(offset)))
            .ok_or_else(|| BotError::invalid("Invalid arguments"));
    }

    today
        .iter_days()
        .take(7)
        .find(|day| weekday_abbreviation(*day, locale) == token)
        .ok_or_else(|| BotError::invalid("Invalid arguments"))
}

/// True when `token` is a weekday abbreviation of `locale`.
pub fn is_weekday_token(token: &str, locale: Locale) -> bool {
    let token = token.to_lowercase();
    weekday_abbreviations(locale).iter().any(|name| *name == token)
}

/// Reply header for a timetable, e.g. `Thu 15.10`.
pub fn format_day(date: NaiveDate, locale: Locale) -> String {
    at_midnight(date).format_localized("%a %d.%m", locale).to_string()
}
