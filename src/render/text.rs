//! Plain-text shelf renderer for terminal listings.

use std::fmt::Write as _;

use crate::record::Publication;

use super::ShelfRenderer;

/// Renders one line per record: `[index] year  title / authors`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextShelfRenderer;

impl ShelfRenderer for TextShelfRenderer {
    type Output = String;

    fn render(&self, publications: &[&Publication]) -> String {
        if publications.is_empty() {
            return format!("{}\n", super::EMPTY_SHELF_MESSAGE);
        }

        let mut out = String::new();
        for (index, publication) in publications.iter().enumerate() {
            let year = publication
                .year
                .map_or_else(|| "----".to_string(), |y| y.to_string());
            let _ = write!(out, "[{index}] {year}  {}", publication.title);
            if let Some(authors) = publication.authors() {
                let _ = write!(out, " / {authors}");
            }
            out.push('\n');
        }
        out
    }

    fn render_unavailable(&self) -> String {
        format!("{}\n", super::LOAD_FAILED_MESSAGE)
    }
}
