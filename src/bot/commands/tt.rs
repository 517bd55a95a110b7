use chrono::{Locale, NaiveDate};

use crate::bot::dispatcher::CommandDispatcher;
use crate::errors::{BotError, Result};
use crate::services::saunas::{SaunaTable, DEFAULT_SAUNA};
use crate::utils::datetime::{format_day, is_weekday_token, resolve_day};

const MAX_ARGS: usize = 2;

/// Resolved `/tt` arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TtQuery {
    pub date: NaiveDate,
    pub sauna: char,
}

/// Classifies each argument as a day offset, a sauna letter or a weekday
/// abbreviation. Order does not matter; a later argument on the same axis
/// replaces an earlier one.
pub fn parse_tt_args(
    args: &[String],
    locale: Locale,
    saunas: &SaunaTable,
    default_sauna: char,
    today: NaiveDate,
) -> Result<TtQuery> {
    if args.len() > MAX_ARGS {
        return Err(BotError::invalid("Invalid arguments"));
    }

    let mut query = TtQuery {
        date: today,
        sauna: default_sauna,
    };

    for arg in args {
        let arg = arg.to_lowercase();
        let mut chars = arg.chars();
        let single = match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c),
            _ => None,
        };

        if !arg.is_empty() && arg.chars().all(|c| c.is_ascii_digit()) {
            query.date = resolve_day(&arg, locale, today)?;
        } else if let Some(letter) = single.filter(|c| c.is_alphabetic()) {
            if !saunas.contains(letter) {
                return Err(BotError::invalid("Invalid sauna"));
            }
            query.sauna = letter;
        } else if is_weekday_token(&arg, locale) {
            query.date = resolve_day(&arg, locale, today)?;
        } else {
            return Err(BotError::invalid("Invalid arguments"));
        }
    }

    Ok(query)
}

pub async fn handle_tt(ctx: &CommandDispatcher, chat_id: i64, args: &[String]) -> Result<String> {
    // Arity is checked before touching the store or the portal.
    if args.len() > MAX_ARGS {
        return Err(BotError::invalid("Invalid arguments"));
    }

    let user = ctx.user_config(chat_id).await?;
    let locale = user.locale();
    let saunas = ctx.saunas();

    let preferred = user.sauna_letter();
    let default_sauna = if saunas.contains(preferred) {
        preferred
    } else {
        DEFAULT_SAUNA
    };

    let query = parse_tt_args(args, locale, saunas, default_sauna, ctx.today())?;
    let entry = saunas
        .get(query.sauna)
        .ok_or_else(|| BotError::invalid("Invalid sauna"))?;

    let timetable = ctx.portal().get_timetables(&entry.view_id, query.date).await?;
    Ok(format!("{}\n{}", format_day(query.date, locale), timetable))
}
