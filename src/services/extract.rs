//! DOM extraction: document → day blocks → event rows.
//!
//! The target site's class names are build artifacts (`Table-module__*`) and
//! are not guaranteed stable, so every level carries a fallback: generic
//! `*day*` selectors for day blocks, free-text month/day matching inside a
//! block, and positional cell mapping inside a row. Faults are absorbed at
//! the narrowest scope as documented fallback values; a malformed row or day
//! never aborts its siblings.

use std::sync::LazyLock;

use log::{debug, info};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::models::{month_number, CalendarEvent, WeekSelector};

use super::clock::Clock;
use super::normalize::normalize_impact;
use super::timestamp::event_timestamp;

fn selector(s: &str) -> Selector {
    Selector::parse(s).expect("selector literal must parse")
}

/// Day containers as rendered by the known site build.
static DAY_BLOCK: LazyLock<Selector> = LazyLock::new(|| {
    selector("div.Section-module__container___WUPgM.Table-module__day___As54H")
});

/// Generic fallbacks when the hashed class names have rolled: any container
/// or section whose class mentions "day", tried in that order.
static DAY_BLOCK_FALLBACKS: LazyLock<[Selector; 2]> = LazyLock::new(|| {
    [
        selector(r#"div[class*="day" i]"#),
        selector(r#"section[class*="day" i]"#),
    ]
});

static MONTH: LazyLock<Selector> =
    LazyLock::new(|| selector("div.Table-module__month___PGbXI"));
static DAY_NUMBER: LazyLock<Selector> =
    LazyLock::new(|| selector("div.Table-module__dayNumber___dyJpm"));

static TBODY: LazyLock<Selector> = LazyLock::new(|| selector("tbody"));
static TR: LazyLock<Selector> = LazyLock::new(|| selector("tr"));
static TD: LazyLock<Selector> = LazyLock::new(|| selector("td"));

static CELL_TIME: LazyLock<Selector> =
    LazyLock::new(|| selector("td.Table-module__time___IHBtp"));
static CELL_CURRENCY: LazyLock<Selector> =
    LazyLock::new(|| selector("td.Table-module__currency___gSAJ5"));
static CELL_NAME: LazyLock<Selector> =
    LazyLock::new(|| selector("td.Table-module__name___FugPe"));
static CELL_IMPACT: LazyLock<Selector> =
    LazyLock::new(|| selector("td.Table-module__impact___kYuei"));
static CELL_ACTUAL: LazyLock<Selector> =
    LazyLock::new(|| selector("td.Table-module__actual___kzVNq"));
static CELL_FORECAST: LazyLock<Selector> =
    LazyLock::new(|| selector("td.Table-module__forecast___WchYX"));
static CELL_PREVIOUS: LazyLock<Selector> =
    LazyLock::new(|| selector("td.Table-module__previous___F0PHu"));

static RE_MONTH_ABBR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)")
        .expect("invalid regex: month abbreviation")
});
static RE_DAY_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{1,2}").expect("invalid regex: day number"));

/// Rows must expose at least this many cells for positional mapping.
const POSITIONAL_CELL_COUNT: usize = 7;

/// Minimum event-name length; shorter rows are not events.
const MIN_NAME_LEN: usize = 3;

/// Extract every event from a full DOM snapshot, in document order
/// (day-block order, then row order within a day).
pub fn extract_document(html: &str, week: WeekSelector, clock: &dyn Clock) -> Vec<CalendarEvent> {
    let doc = Html::parse_document(html);

    let mut blocks: Vec<ElementRef<'_>> = doc.select(&DAY_BLOCK).collect();
    if blocks.is_empty() {
        for fallback in DAY_BLOCK_FALLBACKS.iter() {
            blocks = doc.select(fallback).collect();
            if !blocks.is_empty() {
                debug!("fallback day-block selector matched {} blocks", blocks.len());
                break;
            }
        }
    }
    debug!("located {} day blocks", blocks.len());

    let mut events = Vec::new();
    for block in blocks {
        events.extend(extract_day(block, week, clock));
    }
    info!(
        "extracted {} events for {}",
        events.len(),
        week.query_value()
    );
    events
}

/// Extract the events of one day block, resolving the block's date context
/// and feeding it to the row extractor.
pub fn extract_day(
    block: ElementRef<'_>,
    week: WeekSelector,
    clock: &dyn Clock,
) -> Vec<CalendarEvent> {
    let (month_name, day_label) = day_heading(block);

    // ISO week 1 can include trailing December days of the prior year;
    // those blocks are skipped outright.
    if week.week == 1 && month_name == "Dec" {
        debug!("skipping December block in week 1 ({day_label} {month_name})");
        return Vec::new();
    }

    let month = month_number(&month_name).unwrap_or(1);
    let day = day_label.parse::<u32>().unwrap_or(1);

    let rows: Vec<ElementRef<'_>> = match block.select(&TBODY).next() {
        Some(tbody) => tbody.select(&TR).collect(),
        None => block.select(&TR).collect(),
    };
    debug!("day {day_label} {month_name}: {} candidate rows", rows.len());

    rows.into_iter()
        .filter_map(|row| extract_event(row, week.year, month, day, clock))
        .collect()
}

/// Month name and day number of a block, via the structural markers when
/// present, else free-text matching, else the documented `"Jan"` / `"1"`
/// defaults. Always returns a value. The defaults are known-imprecise and
/// deliberately preserved: a block with no recognizable date still parses.
fn day_heading(block: ElementRef<'_>) -> (String, String) {
    let month = block.select(&MONTH).next().map(element_text);
    let day = block.select(&DAY_NUMBER).next().map(element_text);

    if let (Some(month), Some(day)) = (&month, &day) {
        return (month.clone(), day.clone());
    }

    let text: String = block.text().collect();
    let month = month
        .or_else(|| RE_MONTH_ABBR.find(&text).map(|m| m.as_str().to_string()))
        .unwrap_or_else(|| "Jan".to_string());
    let day = day
        .or_else(|| RE_DAY_NUMBER.find(&text).map(|m| m.as_str().to_string()))
        .unwrap_or_else(|| "1".to_string());
    (month, day)
}

/// Extract one canonical event from a row, or `None` when the row is not an
/// event. The only exclusion criterion is the name invariant: empty or
/// shorter than 3 characters. Individual field failures yield empty strings.
pub fn extract_event(
    row: ElementRef<'_>,
    year: i32,
    month: u32,
    day: u32,
    clock: &dyn Clock,
) -> Option<CalendarEvent> {
    let fields = match structural_fields(row) {
        Some(fields) => fields,
        None => positional_fields(row),
    };

    if fields.name.chars().count() < MIN_NAME_LEN {
        return None;
    }

    let now = clock.now();
    Some(CalendarEvent {
        date: format!("{year}-{month:02}-{day:02}"),
        timestamp: event_timestamp(year, month, day, &fields.time, now),
        time: fields.time,
        currency: fields.currency,
        event_name: fields.name,
        importance: normalize_impact(&fields.impact),
        actual: fields.actual,
        forecast: fields.forecast,
        previous: fields.previous,
        scraped_at: now.to_rfc3339(),
    })
}

#[derive(Debug, Default)]
struct RowFields {
    time: String,
    currency: String,
    name: String,
    impact: String,
    actual: String,
    forecast: String,
    previous: String,
}

/// Cells matched by their semantic markers. The time cell is the presence
/// probe: without it the row is assumed to use the positional layout.
fn structural_fields(row: ElementRef<'_>) -> Option<RowFields> {
    let time = row.select(&CELL_TIME).next()?;
    Some(RowFields {
        time: element_text(time),
        currency: cell_text(row, &CELL_CURRENCY),
        name: cell_text(row, &CELL_NAME),
        impact: cell_text(row, &CELL_IMPACT),
        actual: cell_text(row, &CELL_ACTUAL),
        forecast: cell_text(row, &CELL_FORECAST),
        previous: cell_text(row, &CELL_PREVIOUS),
    })
}

/// Positional fallback: the row's cells in document order, assigned as
/// (time, currency, name, impact, actual, forecast, previous). Assumes the
/// site's fixed 7-column order; fewer cells leave every field empty rather
/// than guessing.
fn positional_fields(row: ElementRef<'_>) -> RowFields {
    let mut cells: Vec<String> = row.select(&TD).map(element_text).collect();
    if cells.len() < POSITIONAL_CELL_COUNT {
        return RowFields::default();
    }
    cells.truncate(POSITIONAL_CELL_COUNT);
    let mut cells = cells.into_iter();
    RowFields {
        time: cells.next().unwrap_or_default(),
        currency: cells.next().unwrap_or_default(),
        name: cells.next().unwrap_or_default(),
        impact: cells.next().unwrap_or_default(),
        actual: cells.next().unwrap_or_default(),
        forecast: cells.next().unwrap_or_default(),
        previous: cells.next().unwrap_or_default(),
    }
}

fn cell_text(row: ElementRef<'_>, cell: &Selector) -> String {
    row.select(cell).next().map(element_text).unwrap_or_default()
}

fn element_text(el: ElementRef<'_>) -> String {
    el.text().map(str::trim).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::clock::FixedClock;
    use chrono::TimeZone;

    fn clock() -> FixedClock {
        FixedClock(chrono::Utc.with_ymd_and_hms(2025, 8, 6, 12, 0, 0).unwrap())
    }

    fn week() -> WeekSelector {
        WeekSelector::new(2025, 32)
    }

    fn structural_row(time: &str, currency: &str, name: &str, impact: &str) -> String {
        format!(
            r#"<tr>
                <td class="Table-module__time___IHBtp">{time}</td>
                <td class="Table-module__currency___gSAJ5">{currency}</td>
                <td class="Table-module__name___FugPe">{name}</td>
                <td class="Table-module__impact___kYuei">{impact}</td>
                <td class="Table-module__actual___kzVNq">1.2%</td>
                <td class="Table-module__forecast___WchYX">1.1%</td>
                <td class="Table-module__previous___F0PHu">1.0%</td>
            </tr>"#
        )
    }

    fn day_block(month: &str, day: &str, rows: &str) -> String {
        format!(
            r#"<div class="Section-module__container___WUPgM Table-module__day___As54H">
                <div class="Table-module__month___PGbXI">{month}</div>
                <div class="Table-module__dayNumber___dyJpm">{day}</div>
                <table><tbody>{rows}</tbody></table>
            </div>"#
        )
    }

    fn first_row(html: &str) -> Vec<CalendarEvent> {
        let doc = Html::parse_document(html);
        let tr = Selector::parse("tr").unwrap();
        doc.select(&tr)
            .filter_map(|row| extract_event(row, 2025, 8, 4, &clock()))
            .collect()
    }

    #[test]
    fn test_structural_row_extraction() {
        let html = format!(
            "<table>{}</table>",
            structural_row("14:30", "USD", "Non-Farm Payrolls", "High Impact")
        );
        let events = first_row(&html);
        assert_eq!(events.len(), 1);
        let event = &events[0];
        assert_eq!(event.date, "2025-08-04");
        assert_eq!(event.time, "14:30");
        assert_eq!(event.currency, "USD");
        assert_eq!(event.event_name, "Non-Farm Payrolls");
        assert_eq!(event.importance, "High");
        assert_eq!(event.actual, "1.2%");
        assert_eq!(event.forecast, "1.1%");
        assert_eq!(event.previous, "1.0%");
        assert_eq!(
            event.timestamp,
            chrono::Utc
                .with_ymd_and_hms(2025, 8, 4, 14, 30, 0)
                .unwrap()
                .timestamp()
        );
    }

    #[test]
    fn test_short_name_is_dropped() {
        for name in ["", "ab", "  "] {
            let html = format!(
                "<table>{}</table>",
                structural_row("14:30", "USD", name, "High")
            );
            assert!(first_row(&html).is_empty(), "name {name:?} should drop the row");
        }
    }

    #[test]
    fn test_positional_fallback_field_order() {
        // No structural time cell, but seven generic cells in document order.
        let html = "<table><tr>\
            <td>09:00</td><td>EUR</td><td>ECB Rate Decision</td><td>red</td>\
            <td>4.0%</td><td>4.0%</td><td>4.25%</td>\
            </tr></table>";
        let events = first_row(html);
        assert_eq!(events.len(), 1);
        let event = &events[0];
        assert_eq!(event.time, "09:00");
        assert_eq!(event.currency, "EUR");
        assert_eq!(event.event_name, "ECB Rate Decision");
        assert_eq!(event.importance, "High"); // "red" normalizes to High
        assert_eq!(event.actual, "4.0%");
        assert_eq!(event.forecast, "4.0%");
        assert_eq!(event.previous, "4.25%");
    }

    #[test]
    fn test_positional_fallback_needs_seven_cells() {
        // Six cells only: all fields stay empty, so the name invariant
        // drops the row.
        let html = "<table><tr>\
            <td>09:00</td><td>EUR</td><td>ECB Rate Decision</td>\
            <td>red</td><td>4.0%</td><td>4.0%</td>\
            </tr></table>";
        assert!(first_row(html).is_empty());
    }

    #[test]
    fn test_missing_structural_cells_yield_empty_fields() {
        // Time marker present, everything else absent except the name.
        let html = r#"<table><tr>
            <td class="Table-module__time___IHBtp">All Day</td>
            <td class="Table-module__name___FugPe">Bank Holiday</td>
        </tr></table>"#;
        let events = first_row(html);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].currency, "");
        assert_eq!(events[0].importance, "Unknown");
        assert_eq!(events[0].actual, "");
    }

    #[test]
    fn test_day_block_with_primary_markers() {
        let html = day_block(
            "Aug",
            "4",
            &structural_row("14:30", "USD", "Trade Balance", "Low"),
        );
        let events = extract_document(&html, week(), &clock());
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].date, "2025-08-04");
    }

    #[test]
    fn test_day_heading_free_text_fallback() {
        // No month/dayNumber markers; the heading must come from free text.
        let html = format!(
            r#"<div class="calendar-day"><span>Tue Aug 5</span>
               <table><tbody>{}</tbody></table></div>"#,
            structural_row("10:00", "GBP", "Services PMI", "medium")
        );
        let events = extract_document(&html, week(), &clock());
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].date, "2025-08-05");
    }

    #[test]
    fn test_day_heading_defaults_when_nothing_matches() {
        // No month abbreviation and no digits anywhere in the block.
        let html = r#"<div class="calendar-day"><table><tbody><tr>
            <td class="Table-module__time___IHBtp">All Day</td>
            <td class="Table-module__currency___gSAJ5">GBP</td>
            <td class="Table-module__name___FugPe">Bank Holiday</td>
            <td class="Table-module__impact___kYuei">medium</td>
        </tr></tbody></table></div>"#;
        let events = extract_document(html, week(), &clock());
        assert_eq!(events.len(), 1);
        // Documented imprecise defaults: month Jan, day 1.
        assert_eq!(events[0].date, "2025-01-01");
    }

    #[test]
    fn test_december_block_skipped_in_week_one() {
        let html = day_block(
            "Dec",
            "30",
            &structural_row("08:00", "JPY", "Industrial Production", "low"),
        );
        let events = extract_document(&html, WeekSelector::new(2025, 1), &clock());
        assert!(events.is_empty());

        // Same block outside week 1 contributes normally.
        let events = extract_document(&html, WeekSelector::new(2025, 52), &clock());
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_rows_outside_tbody_are_ignored_when_tbody_exists() {
        let html = r#"<div class="calendar-day">
            <div class="Table-module__month___PGbXI">Aug</div>
            <div class="Table-module__dayNumber___dyJpm">4</div>
            <table>
              <thead><tr><td>Time</td><td>Cur</td><td>Event name</td>
                <td>Impact</td><td>A</td><td>F</td><td>P</td></tr></thead>
              <tbody></tbody>
            </table></div>"#;
        let events = extract_document(html, week(), &clock());
        assert!(events.is_empty());
    }

    #[test]
    fn test_fallback_day_selector_section_variant() {
        let html = format!(
            r#"<section class="Day-container"><span>Aug 7</span>
               <table><tbody>{}</tbody></table></section>"#,
            structural_row("12:00", "CAD", "Employment Change", "High")
        );
        let events = extract_document(&html, week(), &clock());
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].date, "2025-08-07");
    }

    #[test]
    fn test_document_order_preserved() {
        let first = day_block(
            "Aug",
            "4",
            &[
                structural_row("01:00", "AUD", "Retail Sales", "low"),
                structural_row("09:00", "EUR", "Sentix Confidence", "med"),
                structural_row("14:00", "USD", "Factory Orders", "High"),
            ]
            .concat(),
        );
        let second = day_block("Aug", "5", &structural_row("02:00", "NZD", "x", "low"));
        let events = extract_document(&format!("{first}{second}"), week(), &clock());
        // The short-named row in the second block is dropped.
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].event_name, "Retail Sales");
        assert_eq!(events[1].event_name, "Sentix Confidence");
        assert_eq!(events[2].event_name, "Factory Orders");
    }
}
