use std::sync::LazyLock;

use regex::Regex;

static WS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Substrings that mark a fragment as wiki-markup leakage rather than
/// content: the CSS class that bleeds out of styled infobox cells,
/// brace/bracket characters from templates and citations, and digits
/// 1-9 which only occur in footnote markers for these fields. The digit
/// rule is deliberately blunt: a fragment like "Studio 8" is dropped
/// whole, digits anywhere disqualify it.
const BLACKLIST: &[&str] = &[
    "mw-parser-output",
    "{",
    "}",
    "[",
    "]",
    "1",
    "2",
    "3",
    "4",
    "5",
    "6",
    "7",
    "8",
    "9",
];

/// Collapse a list of raw text fragments into one display string.
///
/// Each fragment is trimmed and internal whitespace runs shrink to a
/// single space; fragments that end up empty or contain a blacklisted
/// token are discarded. Survivors join with ", ". `None` when nothing
/// survives.
pub fn normalize(fragments: &[String]) -> Option<String> {
    let cleaned: Vec<String> = fragments
        .iter()
        .map(|raw| WS_RE.replace_all(raw.trim(), " ").into_owned())
        .filter(|text| !text.is_empty() && !BLACKLIST.iter().any(|token| text.contains(token)))
        .collect();

    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.join(", "))
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    fn frags(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn joins_clean_fragments() {
        let out = normalize(&frags(&["United States", "United Kingdom"]));
        assert_eq!(out.as_deref(), Some("United States, United Kingdom"));
    }

    #[test]
    fn trims_and_collapses_whitespace() {
        let out = normalize(&frags(&["  James\n  Cameron  "]));
        assert_eq!(out.as_deref(), Some("James Cameron"));
    }

    #[test]
    fn drops_markup_leakage() {
        let out = normalize(&frags(&[
            ".mw-parser-output .plainlist ol",
            "{display:inline}",
            "[a]",
            "James Cameron",
        ]));
        assert_eq!(out.as_deref(), Some("James Cameron"));
    }

    #[test]
    fn digit_anywhere_disqualifies_fragment() {
        // Footnote markers get dropped, but so does legitimate text
        // carrying a digit. Pinned: this is the documented behavior.
        assert_eq!(normalize(&frags(&["2", "United States"])).as_deref(), Some("United States"));
        assert_eq!(normalize(&frags(&["Studio 8"])), None);
    }

    #[test]
    fn zero_is_not_blacklisted() {
        let out = normalize(&frags(&["Studio 0"]));
        assert_eq!(out.as_deref(), Some("Studio 0"));
    }

    #[test]
    fn empty_input_is_absent() {
        assert_eq!(normalize(&[]), None);
        assert_eq!(normalize(&frags(&["   ", "\n"])), None);
    }
}
