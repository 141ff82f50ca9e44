//! Shelf rendering.
//!
//! Rendering sits behind [`ShelfRenderer`] so the sort/filter pipeline can be
//! exercised without any presentation layer. [`Shelf`] mounts an HTML view
//! into the page and owns the carousel lifecycle: every render tears the
//! previous widget down and initializes a fresh one.
//!
//! Card activation uses a single delegated handler on the shelf container.
//! Events carry the card's `data-index` and resolve against the visible list
//! of the most recent render.

pub mod carousel;
mod html;
mod page;
mod text;

pub use carousel::{CarouselConfig, CarouselInstance};
pub use html::{
    DEFAULT_EXCERPT_CHARS, EMPTY_SHELF_MESSAGE, HtmlShelfRenderer, LOAD_FAILED_MESSAGE,
    escape_html, excerpt,
};
pub use page::render_page;
pub use text::TextShelfRenderer;

use tracing::debug;

use crate::dom::{Document, ElementId, Key};
use crate::record::Publication;

/// Maps a visible list to a presentation.
pub trait ShelfRenderer {
    /// What a render produces.
    type Output;

    /// Renders the visible records, in order.
    fn render(&self, publications: &[&Publication]) -> Self::Output;

    /// Renders the placeholder for a failed load.
    fn render_unavailable(&self) -> Self::Output;
}

/// Output of [`HtmlShelfRenderer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShelfView {
    /// Shelf container markup. All record text is escaped.
    pub html: String,
    /// Carousel options; `None` when only a placeholder is shown.
    pub carousel: Option<CarouselConfig>,
}

/// Delegated event raised on the shelf container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShelfEvent {
    /// Pointer click on the card at `index`.
    Click { index: usize },
    /// Key press while the card at `index` has focus.
    KeyDown { index: usize, key: Key },
}

impl ShelfEvent {
    /// Index of the card to open, if this event activates one.
    #[must_use]
    pub fn activated_index(self) -> Option<usize> {
        match self {
            Self::Click { index }
            | Self::KeyDown {
                index,
                key: Key::Enter,
            } => Some(index),
            Self::KeyDown { .. } => None,
        }
    }
}

/// Host for the shelf container and its carousel widget.
#[derive(Debug, Default)]
pub struct Shelf {
    carousel: Option<CarouselInstance>,
    generation: u64,
}

impl Shelf {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently mounted carousel, if the last view had one.
    #[must_use]
    pub fn carousel(&self) -> Option<&CarouselInstance> {
        self.carousel.as_ref()
    }

    /// Number of carousel initializations so far.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Replaces the container content with `view` and re-initializes the
    /// carousel.
    pub fn mount(&mut self, view: &ShelfView, document: &mut dyn Document) {
        if let Some(previous) = self.carousel.take() {
            debug!(generation = previous.generation, "destroying carousel");
        }

        document.set_html(ElementId::Shelf, &view.html);

        let Some(config) = view.carousel.clone() else {
            document.set_attribute(ElementId::Shelf, "data-carousel", "");
            return;
        };

        self.generation += 1;
        document.set_attribute(ElementId::Shelf, "data-carousel", &config.to_json());
        debug!(
            generation = self.generation,
            items = config.item_count,
            "carousel initialized"
        );
        self.carousel = Some(CarouselInstance {
            generation: self.generation,
            config,
        });
    }
}
