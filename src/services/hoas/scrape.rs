//! HTML parsing for the HOAS booking pages.

use scraper::{ElementRef, Html, Selector};
use std::collections::BTreeMap;
use std::fmt;

use crate::errors::{BotError, Result};

#[allow(clippy::expect_used)]
mod patterns {
    use lazy_static::lazy_static;
    use regex::Regex;

    lazy_static! {
        pub static ref TIMETABLE_HREF: Regex =
            Regex::new(r"/varaus/service/timetable/(?P<id>\d+)").expect("Invalid timetable href pattern");
    }
}

use patterns::TIMETABLE_HREF;

fn selector(css: &'static str) -> Result<Selector> {
    Selector::parse(css).map_err(|_| BotError::remote(format!("invalid selector '{css}'")))
}

fn text_of(element: ElementRef<'_>) -> String {
    element
        .text()
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// A page that still asks for a password means the session is gone or the
/// credentials were rejected.
pub fn is_login_page(html: &str) -> Result<bool> {
    let document = Html::parse_document(html);
    Ok(document.select(&selector(r#"input[name="password"]"#)?).next().is_some())
}

/// Timetable services grouped by lower-cased category heading, each as
/// `(service name, view id)`.
pub fn parse_service_list(html: &str) -> Result<BTreeMap<String, Vec<(String, String)>>> {
    let document = Html::parse_document(html);
    let group_sel = selector("div.service-group")?;
    let heading_sel = selector("h2")?;
    let link_sel = selector("a[href]")?;

    let mut groups: BTreeMap<String, Vec<(String, String)>> = BTreeMap::new();
    for group in document.select(&group_sel) {
        let Some(heading) = group.select(&heading_sel).next() else {
            continue;
        };
        let category = text_of(heading).to_lowercase();

        for link in group.select(&link_sel) {
            let href = link.value().attr("href").unwrap_or_default();
            if let Some(caps) = TIMETABLE_HREF.captures(href) {
                groups
                    .entry(category.clone())
                    .or_default()
                    .push((text_of(link), caps["id"].to_string()));
            }
        }
    }

    Ok(groups)
}

/// Reservable resources offered on a timetable page, `name -> reserve id`.
pub fn parse_reservable_resources(html: &str) -> Result<BTreeMap<String, String>> {
    let document = Html::parse_document(html);
    let option_sel = selector(r#"select[name="resource"] option[value]"#)?;

    Ok(document
        .select(&option_sel)
        .filter_map(|option| {
            let id = option.value().attr("value")?.trim();
            let name = text_of(option);
            (!id.is_empty() && !name.is_empty()).then(|| (name, id.to_string()))
        })
        .collect())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotStatus {
    Free,
    Reserved,
    Own,
}

impl fmt::Display for SlotStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SlotStatus::Free => "free",
            SlotStatus::Reserved => "reserved",
            SlotStatus::Own => "own",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    pub time: String,
    pub status: SlotStatus,
}

/// Slots of a timetable page in page order.
pub fn parse_timetable(html: &str) -> Result<Vec<Slot>> {
    let document = Html::parse_document(html);
    let row_sel = selector("table.calendar tr")?;
    let time_sel = selector("td.time")?;
    let cell_sel = selector("td")?;

    let mut slots = Vec::new();
    for row in document.select(&row_sel) {
        let Some(time) = row.select(&time_sel).next().map(text_of) else {
            continue;
        };
        let status = row.select(&cell_sel).find_map(|cell| {
            cell.value().classes().find_map(|class| match class {
                "res-free" => Some(SlotStatus::Free),
                "res-reserved" => Some(SlotStatus::Reserved),
                "res-own" => Some(SlotStatus::Own),
                _ => None,
            })
        });
        if let Some(status) = status {
            slots.push(Slot { time, status });
        }
    }

    Ok(slots)
}

pub fn render_timetable(slots: &[Slot]) -> String {
    if slots.is_empty() {
        return "No timetable available".to_string();
    }
    slots
        .iter()
        .map(|slot| format!("{} {}", slot.time, slot.status))
        .collect::<Vec<_>>()
        .join("\n")
}

/// One line per row of the "my reservations" table.
pub fn parse_reservations(html: &str) -> Result<Vec<String>> {
    let document = Html::parse_document(html);
    let row_sel = selector("table.reservations tr")?;
    let cell_sel = selector("td")?;

    Ok(document
        .select(&row_sel)
        .map(|row| {
            row.select(&cell_sel)
                .map(text_of)
                .filter(|text| !text.is_empty())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .filter(|line| !line.is_empty())
        .collect())
}
