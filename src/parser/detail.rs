use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use super::text;
use crate::record::DetailFields;

static INFOBOX_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"table[class*="infobox"]"#).unwrap());
static TH_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("th").unwrap());

/// Pull director and country out of a detail page's infobox.
///
/// Absence never fails: no infobox, or an infobox without the labeled
/// row, normalizes to absent fields.
pub fn parse_detail(html: &str) -> DetailFields {
    let doc = Html::parse_document(html);
    let infobox = doc.select(&INFOBOX_SEL).next();

    DetailFields {
        director: labeled_field(infobox, &["Directed by"]),
        country: labeled_field(infobox, &["Country", "Countries"]),
    }
}

/// Find every infobox header whose text contains one of `labels` and
/// normalize the text fragments of its value cells.
fn labeled_field(infobox: Option<ElementRef>, labels: &[&str]) -> Option<String> {
    let fragments = infobox
        .map(|table| labeled_fragments(table, labels))
        .unwrap_or_default();
    text::normalize(&fragments)
}

fn labeled_fragments(infobox: ElementRef, labels: &[&str]) -> Vec<String> {
    let mut fragments = Vec::new();
    for th in infobox.select(&TH_SEL) {
        let header = th.text().collect::<String>();
        if !labels.iter().any(|label| header.contains(label)) {
            continue;
        }
        for sibling in th.next_siblings() {
            let Some(cell) = ElementRef::wrap(sibling) else {
                continue;
            };
            if cell.value().name() == "td" {
                collect_text(cell, &mut fragments);
            }
        }
    }
    fragments
}

/// Descendant text nodes of a value cell, skipping whitespace-only
/// nodes and anything under a `sup` (footnote markers).
fn collect_text(cell: ElementRef, out: &mut Vec<String>) {
    for node in cell.descendants() {
        let Some(fragment) = node.value().as_text() else {
            continue;
        };
        if fragment.trim().is_empty() {
            continue;
        }
        let in_sup = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|el| el.name() == "sup")
        });
        if !in_sup {
            out.push(fragment.to_string());
        }
    }
}

// ── Tests ──
