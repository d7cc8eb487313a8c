use std::sync::LazyLock;

use anyhow::{Context, Result};
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::record::PartialRecord;

static TABLE_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("table.wikitable").unwrap());
static ROW_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr").unwrap());
static CELL_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td").unwrap());
static TITLE_LINK_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("th i a").unwrap());

/// Parse the listing page into partial records, one per admitted row.
///
/// Only the first `wikitable` on the page is read; everything after its
/// header row is a candidate. A row is admitted only when the title
/// link yields both a non-empty title and a non-empty href — anything
/// else is skipped without comment. A page with no wikitable at all
/// parses to zero records the same way.
pub fn parse_listing(html: &str, listing_url: &str) -> Result<Vec<PartialRecord>> {
    let base = Url::parse(listing_url).context("listing URL is not a valid base")?;
    let doc = Html::parse_document(html);

    let mut records = Vec::new();
    if let Some(table) = doc.select(&TABLE_SEL).next() {
        for row in table.select(&ROW_SEL).skip(1) {
            if let Some(record) = parse_row(row, &base) {
                records.push(record);
            }
        }
    }
    Ok(records)
}

fn parse_row(row: ElementRef, base: &Url) -> Option<PartialRecord> {
    let link = row.select(&TITLE_LINK_SEL).next()?;
    let title = link.text().collect::<String>().trim().to_string();
    let href = link.value().attr("href").unwrap_or("").trim();
    if title.is_empty() || href.is_empty() {
        return None;
    }
    let url = base.join(href).ok()?;

    let cells: Vec<ElementRef> = row.select(&CELL_SEL).collect();
    let rank = cells.first().and_then(first_text).map(|t| t.trim().to_string());
    let box_office = cells.get(2).and_then(first_text).map(|t| clean_box_office(&t));
    let year = cells.get(3).and_then(first_text).map(|t| t.trim().to_string());

    Some(PartialRecord {
        rank,
        title,
        url: url.to_string(),
        box_office,
        year,
    })
}

/// First direct text node of an element. Cell values sit in the first
/// text child; footnote sups that follow are never reached.
fn first_text(el: &ElementRef) -> Option<String> {
    el.children()
        .find_map(|node| node.value().as_text().map(|t| t.to_string()))
}

/// Strip everything that is not an ASCII digit or a decimal point.
/// Idempotent: an already-clean figure passes through unchanged.
pub fn clean_box_office(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect()
}

// ── Tests ──
