//! BibTeX citation text for the copy action.
//!
//! Stored citations are returned verbatim. Records without one get a minimal
//! entry synthesized from author, title, venue, and year.

use std::sync::LazyLock;

use regex::Regex;

use crate::record::Publication;

#[allow(clippy::expect_used)]
static AUTHOR_SPLIT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s+and\s+").expect("bibtex author split regex is valid"));

/// Title words skipped when picking the citation key suffix.
const KEY_STOP_WORDS: [&str; 6] = ["a", "an", "the", "on", "of", "towards"];

/// Fallback key stem when a record has no usable author.
const ANONYMOUS_KEY: &str = "anon";

/// Returns the text the copy action puts on the clipboard.
#[must_use]
pub fn citation_text(publication: &Publication) -> String {
    match publication.bibtex() {
        Some(stored) => stored.to_string(),
        None => synthesize_citation(publication),
    }
}

/// Builds a minimal BibTeX entry from the record's fields.
///
/// Uses `@article` with a `journal` field when a venue is known, `@misc`
/// otherwise. Absent fields are omitted.
#[must_use]
pub fn synthesize_citation(publication: &Publication) -> String {
    let entry_type = if publication.venue().is_some() {
        "article"
    } else {
        "misc"
    };

    let mut fields: Vec<(&str, String)> = Vec::new();
    if let Some(authors) = publication.authors() {
        fields.push(("author", authors.trim().to_string()));
    }
    fields.push(("title", publication.title.trim().to_string()));
    if let Some(venue) = publication.venue() {
        fields.push(("journal", venue.trim().to_string()));
    }
    if let Some(year) = publication.year {
        fields.push(("year", year.to_string()));
    }

    let body = fields
        .iter()
        .map(|(key, value)| format!("  {key} = {{{value}}}"))
        .collect::<Vec<_>>()
        .join(",\n");

    format!("@{entry_type}{{{},\n{body}\n}}", citation_key(publication))
}

/// Derives a citation key like `smith2021neural`.
#[must_use]
pub fn citation_key(publication: &Publication) -> String {
    let mut key = publication
        .authors()
        .and_then(first_author_surname)
        .unwrap_or_else(|| ANONYMOUS_KEY.to_string());

    if let Some(year) = publication.year {
        key.push_str(&year.to_string());
    }
    if let Some(word) = first_significant_word(&publication.title) {
        key.push_str(&word);
    }
    key
}

/// Surname of the first author for both `Smith, J. and Doe, A.` and
/// `Jane Smith, John Doe` styles.
fn first_author_surname(authors: &str) -> Option<String> {
    let first = AUTHOR_SPLIT_PATTERN.split(authors.trim()).next()?;
    let before_comma = first.split(',').next()?;
    let surname = before_comma.split_whitespace().last()?;
    let cleaned = key_fragment(surname);
    if cleaned.is_empty() { None } else { Some(cleaned) }
}

fn first_significant_word(title: &str) -> Option<String> {
    title
        .split_whitespace()
        .map(key_fragment)
        .find(|word| !word.is_empty() && !KEY_STOP_WORDS.contains(&word.as_str()))
}

fn key_fragment(word: &str) -> String {
    word.chars()
        .filter(char::is_ascii_alphanumeric)
        .collect::<String>()
        .to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_record() -> Publication {
        Publication {
            authors: Some("Smith, Jane and Doe, John".to_string()),
            venue: Some("Journal of Tests".to_string()),
            ..Publication::new("The Neural Shelf", Some(2021))
        }
    }

    #[test]
    fn test_citation_text_returns_stored_bibtex_verbatim() {
        let stored = "@article{key,\n  title = {Exact  Spacing}\n}\n";
        let record = Publication {
            bibtex: Some(stored.to_string()),
            ..full_record()
        };
        assert_eq!(citation_text(&record), stored);
    }

    #[test]
    fn test_synthesized_citation_contains_year_and_title() {
        let text = citation_text(&full_record());
        assert!(text.contains("2021"), "should contain year: {text}");
        assert!(text.contains("The Neural Shelf"), "should contain title: {text}");
    }

    #[test]
    fn test_synthesized_citation_layout() {
        let text = synthesize_citation(&full_record());
        assert_eq!(
            text,
            "@article{smith2021neural,\n  author = {Smith, Jane and Doe, John},\n  title = {The Neural Shelf},\n  journal = {Journal of Tests},\n  year = {2021}\n}"
        );
    }

    #[test]
    fn test_synthesized_citation_without_venue_is_misc() {
        let record = Publication::new("Notes", Some(2019));
        let text = synthesize_citation(&record);
        assert!(text.starts_with("@misc{anon2019notes,"), "{text}");
        assert!(!text.contains("journal"));
        assert!(!text.contains("author"));
    }

    #[test]
    fn test_citation_key_given_name_first_style() {
        let record = Publication {
            authors: Some("Ada Lovelace, Charles Babbage".to_string()),
            ..Publication::new("On Engines", Some(1843))
        };
        assert_eq!(citation_key(&record), "lovelace1843engines");
    }

    #[test]
    fn test_citation_key_without_year() {
        let record = Publication {
            authors: Some("Noether".to_string()),
            ..Publication::new("Invariants", None)
        };
        assert_eq!(citation_key(&record), "noetherinvariants");
    }

    #[test]
    fn test_blank_stored_bibtex_falls_back_to_synthesis() {
        let record = Publication {
            bibtex: Some("  ".to_string()),
            ..full_record()
        };
        assert!(citation_text(&record).starts_with("@article{"));
    }
}
