use serde::ser::Serializer;
use serde::Serialize;

/// Row-level data extracted from the listing table, before the film's
/// detail page has been visited. Only built when both the title and the
/// detail link were present; rows without either never get this far.
#[derive(Debug, Clone)]
pub struct PartialRecord {
    pub rank: Option<String>,
    pub title: String,
    pub url: String,
    pub box_office: Option<String>,
    pub year: Option<String>,
}

/// Infobox fields pulled from a detail page. Absence is `None`, not an
/// error; a page with no infobox yields both fields absent.
#[derive(Debug, Default)]
pub struct DetailFields {
    pub director: Option<String>,
    pub country: Option<String>,
}

/// A completed film record. Immutable once built; its only destination
/// is the JSON feed.
///
/// Absent fields serialize as the literal string "N/A" — the sentinel
/// exists only at this boundary, never inside the pipeline.
#[derive(Debug, Clone, Serialize)]
pub struct FilmRecord {
    #[serde(rename = "Rank", serialize_with = "na_if_none")]
    pub rank: Option<String>,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Release Year", serialize_with = "na_if_none")]
    pub year: Option<String>,
    #[serde(rename = "Box Office Revenue", serialize_with = "na_if_none")]
    pub box_office: Option<String>,
    #[serde(rename = "URL")]
    pub url: String,
    #[serde(rename = "Directed by", serialize_with = "na_if_none")]
    pub director: Option<String>,
    #[serde(rename = "Country of origin", serialize_with = "na_if_none")]
    pub country: Option<String>,
}

impl PartialRecord {
    pub fn complete(self, details: DetailFields) -> FilmRecord {
        FilmRecord {
            rank: self.rank,
            title: self.title,
            year: self.year,
            box_office: self.box_office,
            url: self.url,
            director: details.director,
            country: details.country,
        }
    }
}

fn na_if_none<S: Serializer>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(value.as_deref().unwrap_or("N/A"))
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    fn partial() -> PartialRecord {
        PartialRecord {
            rank: Some("1".to_string()),
            title: "Avatar".to_string(),
            url: "https://en.wikipedia.org/wiki/Avatar_(2009_film)".to_string(),
            box_office: Some("2923706026".to_string()),
            year: Some("2009".to_string()),
        }
    }

    #[test]
    fn feed_keys_and_sentinels() {
        let record = partial().complete(DetailFields {
            director: Some("James Cameron".to_string()),
            country: None,
        });
        let json = serde_json::to_string(&record).unwrap();

        // Keys appear in the feed's documented order
        let keys = [
            "Rank",
            "Title",
            "Release Year",
            "Box Office Revenue",
            "URL",
            "Directed by",
            "Country of origin",
        ];
        let positions: Vec<usize> = keys
            .iter()
            .map(|k| json.find(&format!("\"{k}\"")).unwrap_or_else(|| panic!("missing key {k}")))
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "keys out of order: {json}");

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["Directed by"], "James Cameron");
        assert_eq!(value["Country of origin"], "N/A");
    }

    #[test]
    fn absent_fields_all_render_na() {
        let record = PartialRecord {
            rank: None,
            title: "Untitled".to_string(),
            url: "https://example.org/film".to_string(),
            box_office: None,
            year: None,
        }
        .complete(DetailFields::default());
        let value = serde_json::to_value(&record).unwrap();
        for key in ["Rank", "Release Year", "Box Office Revenue", "Directed by", "Country of origin"] {
            assert_eq!(value[key], "N/A", "{key} should fall back to the sentinel");
        }
    }
}
