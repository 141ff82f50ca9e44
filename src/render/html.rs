//! HTML shelf renderer.

use std::fmt::Write as _;

use crate::record::Publication;

use super::carousel::CarouselConfig;
use super::{ShelfRenderer, ShelfView};

/// Default abstract excerpt length on cards, in characters.
pub const DEFAULT_EXCERPT_CHARS: usize = 180;

/// Placeholder shown when the filters leave nothing to display.
pub const EMPTY_SHELF_MESSAGE: &str = "No publications match the current filters.";

/// Placeholder shown when the publication list could not be loaded.
pub const LOAD_FAILED_MESSAGE: &str = "Publications could not be loaded. Please try again later.";

/// Escapes text for safe interpolation into element content and quoted
/// attribute values.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Shortens `text` to at most `max_chars` characters, appending an ellipsis
/// when anything was cut.
#[must_use]
pub fn excerpt(text: &str, max_chars: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max_chars).collect();
    let trimmed_len = cut.trim_end().len();
    cut.truncate(trimmed_len);
    cut.push('…');
    cut
}

/// Renders cards as carousel slides.
#[derive(Debug, Clone, Copy)]
pub struct HtmlShelfRenderer {
    excerpt_chars: usize,
}

impl Default for HtmlShelfRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_EXCERPT_CHARS)
    }
}

impl HtmlShelfRenderer {
    #[must_use]
    pub fn new(excerpt_chars: usize) -> Self {
        Self { excerpt_chars }
    }

    /// Markup for one card. `index` is the card's position in the visible
    /// list and is what delegated activation events carry back.
    #[must_use]
    pub fn card(&self, index: usize, publication: &Publication) -> String {
        let title = escape_html(&publication.title);
        let mut card = String::new();
        let _ = write!(
            card,
            r#"<div class="swiper-slide"><article class="publication-card" role="button" tabindex="0" data-index="{index}" aria-label="Show details for {title}"><h3 class="publication-title">{title}</h3>"#
        );
        if let Some(authors) = publication.authors() {
            let _ = write!(
                card,
                r#"<p class="publication-authors">{}</p>"#,
                escape_html(authors)
            );
        }
        if let Some(abstract_text) = publication.abstract_text() {
            let _ = write!(
                card,
                r#"<p class="publication-excerpt">{}</p>"#,
                escape_html(&excerpt(abstract_text, self.excerpt_chars))
            );
        }
        if let Some(year) = publication.year {
            let _ = write!(card, r#"<span class="publication-year">{year}</span>"#);
        }
        card.push_str("</article></div>");
        card
    }

    fn placeholder(message: &str, class: &str) -> String {
        format!(
            r#"<p class="shelf-placeholder {class}">{}</p>"#,
            escape_html(message)
        )
    }
}

impl ShelfRenderer for HtmlShelfRenderer {
    type Output = ShelfView;

    fn render(&self, publications: &[&Publication]) -> ShelfView {
        if publications.is_empty() {
            return ShelfView {
                html: Self::placeholder(EMPTY_SHELF_MESSAGE, "shelf-empty"),
                carousel: None,
            };
        }

        let cards: String = publications
            .iter()
            .enumerate()
            .map(|(index, publication)| self.card(index, publication))
            .collect();

        let html = format!(
            concat!(
                r#"<div class="swiper"><div class="swiper-wrapper">{cards}</div>"#,
                r#"<div class="swiper-pagination"></div>"#,
                r#"<button type="button" class="swiper-button-prev" aria-label="Previous"></button>"#,
                r#"<button type="button" class="swiper-button-next" aria-label="Next"></button></div>"#
            ),
            cards = cards
        );

        ShelfView {
            html,
            carousel: Some(CarouselConfig::for_items(publications.len())),
        }
    }

    fn render_unavailable(&self) -> ShelfView {
        ShelfView {
            html: Self::placeholder(LOAD_FAILED_MESSAGE, "shelf-error"),
            carousel: None,
        }
    }
}
