use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::record::FilmRecord;

/// Serialize the completed records as a pretty-printed JSON array,
/// fully replacing any feed from a previous run.
pub fn write_feed(path: &Path, records: &[FilmRecord]) -> Result<()> {
    let json = serde_json::to_string_pretty(records)?;
    fs::write(path, json).with_context(|| format!("failed to write feed {}", path.display()))?;
    Ok(())
}

/// A feed element as the loader sees it. Sentinels come back as the
/// literal string "N/A"; only a missing key is absent. Rank and URL are
/// present in the feed but the films table has no column for them.
#[derive(Debug, Deserialize)]
pub struct FeedFilm {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Release Year")]
    pub release_year: Option<String>,
    #[serde(rename = "Directed by")]
    pub director: Option<String>,
    #[serde(rename = "Box Office Revenue")]
    pub box_office: Option<String>,
    #[serde(rename = "Country of origin")]
    pub country: Option<String>,
}

pub fn read_feed(path: &Path) -> Result<Vec<FeedFilm>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read feed {}", path.display()))?;
    let films: Vec<FeedFilm> =
        serde_json::from_str(&raw).context("feed is not a JSON array of film records")?;
    Ok(films)
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{DetailFields, PartialRecord};

    #[test]
    fn written_feed_reads_back() {
        let record = PartialRecord {
            rank: Some("1".to_string()),
            title: "Avatar".to_string(),
            url: "https://en.wikipedia.org/wiki/Avatar_(2009_film)".to_string(),
            box_office: Some("2923706026".to_string()),
            year: Some("2009".to_string()),
        }
        .complete(DetailFields {
            director: Some("James Cameron".to_string()),
            country: None,
        });

        let path = std::env::temp_dir().join("film_scraper_feed_test.json");
        write_feed(&path, &[record]).unwrap();
        let films = read_feed(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(films.len(), 1);
        assert_eq!(films[0].title, "Avatar");
        assert_eq!(films[0].box_office.as_deref(), Some("2923706026"));
        // The absent country came back as the display sentinel
        assert_eq!(films[0].country.as_deref(), Some("N/A"));
    }

    #[test]
    fn loader_view_ignores_rank_and_url() {
        let json = r#"[{
            "Rank": "1",
            "Title": "Avatar",
            "Release Year": "2009",
            "Box Office Revenue": "2923706026",
            "URL": "https://en.wikipedia.org/wiki/Avatar_(2009_film)",
            "Directed by": "James Cameron",
            "Country of origin": "United States, United Kingdom"
        }]"#;
        let films: Vec<FeedFilm> = serde_json::from_str(json).unwrap();
        assert_eq!(films[0].release_year.as_deref(), Some("2009"));
        assert_eq!(films[0].director.as_deref(), Some("James Cameron"));
    }
}
