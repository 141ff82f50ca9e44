//! Publication record model.
//!
//! Records are read once from the data source and never mutated afterwards.
//! No schema validation is performed: every field except `title` is optional,
//! and a missing title deserializes as an empty string.

use serde::{Deserialize, Deserializer, Serialize};

/// One publication entry from the data source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publication {
    /// Publication title (used for sorting and display).
    #[serde(default)]
    pub title: String,
    /// Author list as free text.
    #[serde(default)]
    pub authors: Option<String>,
    /// Abstract text.
    #[serde(default, rename = "abstract")]
    pub abstract_text: Option<String>,
    /// Journal, conference, or other venue.
    #[serde(default)]
    pub venue: Option<String>,
    /// Publication year.
    #[serde(default, deserialize_with = "deserialize_year")]
    pub year: Option<i32>,
    /// DOI, either bare (`10.1234/x`) or as a resolver URL.
    #[serde(default)]
    pub doi: Option<String>,
    /// External link to the paper.
    #[serde(default)]
    pub link: Option<String>,
    /// Preformatted BibTeX citation.
    #[serde(default)]
    pub bibtex: Option<String>,
}

impl Publication {
    /// Creates a record with only a title and year, as most tests need.
    #[must_use]
    pub fn new(title: impl Into<String>, year: Option<i32>) -> Self {
        Self {
            title: title.into(),
            year,
            ..Self::default()
        }
    }

    /// Returns the lowercased concatenation of the searchable text fields
    /// (title, authors, abstract, venue).
    #[must_use]
    pub fn search_text(&self) -> String {
        [
            Some(self.title.as_str()),
            non_empty(self.authors.as_deref()),
            non_empty(self.abstract_text.as_deref()),
            non_empty(self.venue.as_deref()),
        ]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
    }

    /// Authors, when present and non-blank.
    #[must_use]
    pub fn authors(&self) -> Option<&str> {
        non_empty(self.authors.as_deref())
    }

    /// Abstract, when present and non-blank.
    #[must_use]
    pub fn abstract_text(&self) -> Option<&str> {
        non_empty(self.abstract_text.as_deref())
    }

    /// Venue, when present and non-blank.
    #[must_use]
    pub fn venue(&self) -> Option<&str> {
        non_empty(self.venue.as_deref())
    }

    /// DOI, when present and non-blank.
    #[must_use]
    pub fn doi(&self) -> Option<&str> {
        non_empty(self.doi.as_deref())
    }

    /// External link, when present and non-blank.
    #[must_use]
    pub fn link(&self) -> Option<&str> {
        non_empty(self.link.as_deref())
    }

    /// Stored BibTeX, when present and non-blank.
    #[must_use]
    pub fn bibtex(&self) -> Option<&str> {
        non_empty(self.bibtex.as_deref())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Accepts `2021`, `"2021"`, `null`, or a missing field.
fn deserialize_year<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawYear {
        Number(i64),
        Text(String),
    }

    let raw = Option::<RawYear>::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawYear::Number(n)) => i32::try_from(n).ok(),
        Some(RawYear::Text(s)) => s.trim().parse::<i32>().ok(),
        None => None,
    })
}
