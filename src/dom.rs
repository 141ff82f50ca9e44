//! Element contract between the pipeline and the surrounding page.
//!
//! The page markup supplies a fixed set of element identifiers. Every write
//! goes through [`Document`], and writes to elements the page does not
//! provide are silent no-ops.

use std::collections::BTreeMap;
use std::fmt;

use tracing::trace;

/// Identifiers the page is expected to provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ElementId {
    /// Footer year display.
    YearDisplay,
    /// Year selector control.
    YearFilter,
    /// Free-text search box.
    SearchInput,
    /// Carousel container holding the cards.
    Shelf,
    /// Modal overlay root.
    Modal,
    ModalTitle,
    ModalAuthors,
    ModalVenue,
    ModalAbstract,
    /// DOI anchor.
    ModalDoi,
    /// External link anchor.
    ModalLink,
    /// Close button in the modal header.
    ModalClose,
    /// Close button in the modal footer.
    ModalCloseFooter,
    /// Copy-citation button.
    CopyBibtex,
}

impl ElementId {
    /// Every identifier of the contract, in page order.
    pub const ALL: [ElementId; 14] = [
        Self::YearDisplay,
        Self::YearFilter,
        Self::SearchInput,
        Self::Shelf,
        Self::Modal,
        Self::ModalTitle,
        Self::ModalAuthors,
        Self::ModalVenue,
        Self::ModalAbstract,
        Self::ModalDoi,
        Self::ModalLink,
        Self::ModalClose,
        Self::ModalCloseFooter,
        Self::CopyBibtex,
    ];

    /// The HTML `id` attribute value.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::YearDisplay => "current-year",
            Self::YearFilter => "year-filter",
            Self::SearchInput => "search-input",
            Self::Shelf => "publication-shelf",
            Self::Modal => "publication-modal",
            Self::ModalTitle => "modal-title",
            Self::ModalAuthors => "modal-authors",
            Self::ModalVenue => "modal-venue",
            Self::ModalAbstract => "modal-abstract",
            Self::ModalDoi => "modal-doi",
            Self::ModalLink => "modal-link",
            Self::ModalClose => "modal-close",
            Self::ModalCloseFooter => "modal-close-footer",
            Self::CopyBibtex => "copy-bibtex",
        }
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keys the page reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Escape,
    Tab,
    /// Tab with Shift held.
    BackTab,
    /// Any other key; ignored.
    Other,
}

/// State of one element as written by the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementState {
    /// Plain text content (escaped when serialized).
    pub text: Option<String>,
    /// Trusted markup content, already escaped by the renderer.
    pub html: Option<String>,
    /// Link target for anchors.
    pub href: Option<String>,
    /// Whether the element is hidden.
    pub hidden: bool,
    /// Extra attributes such as `data-carousel` or `value`.
    pub attributes: BTreeMap<String, String>,
}

/// Write surface of the page.
///
/// Every method returns `false` when the element is absent; callers never
/// treat that as an error.
pub trait Document {
    /// Replaces an element's text content.
    fn set_text(&mut self, id: ElementId, text: &str) -> bool;
    /// Replaces an element's inner markup.
    fn set_html(&mut self, id: ElementId, html: &str) -> bool;
    /// Sets or clears an anchor target.
    fn set_href(&mut self, id: ElementId, href: Option<&str>) -> bool;
    /// Shows or hides an element.
    fn set_hidden(&mut self, id: ElementId, hidden: bool) -> bool;
    /// Sets an arbitrary attribute.
    fn set_attribute(&mut self, id: ElementId, name: &str, value: &str) -> bool;
    /// Locks or restores page scrolling while an overlay is open.
    fn set_scroll_locked(&mut self, locked: bool);
}

/// In-memory page used to assemble the static output and in tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageDocument {
    elements: BTreeMap<ElementId, ElementState>,
    scroll_locked: bool,
}

impl Default for PageDocument {
    fn default() -> Self {
        Self::with_elements(ElementId::ALL)
    }
}

impl PageDocument {
    /// A page that provides exactly `ids`.
    pub fn with_elements(ids: impl IntoIterator<Item = ElementId>) -> Self {
        Self {
            elements: ids
                .into_iter()
                .map(|id| (id, ElementState::default()))
                .collect(),
            scroll_locked: false,
        }
    }

    /// Element state, if the page provides `id`.
    #[must_use]
    pub fn element(&self, id: ElementId) -> Option<&ElementState> {
        self.elements.get(&id)
    }

    /// Text content shortcut.
    #[must_use]
    pub fn text(&self, id: ElementId) -> Option<&str> {
        self.element(id).and_then(|e| e.text.as_deref())
    }

    /// Inner markup shortcut.
    #[must_use]
    pub fn html(&self, id: ElementId) -> Option<&str> {
        self.element(id).and_then(|e| e.html.as_deref())
    }

    /// Anchor target shortcut.
    #[must_use]
    pub fn href(&self, id: ElementId) -> Option<&str> {
        self.element(id).and_then(|e| e.href.as_deref())
    }

    /// Hidden flag; absent elements report hidden.
    #[must_use]
    pub fn is_hidden(&self, id: ElementId) -> bool {
        self.element(id).is_none_or(|e| e.hidden)
    }

    /// Attribute shortcut.
    #[must_use]
    pub fn attribute(&self, id: ElementId, name: &str) -> Option<&str> {
        self.element(id)
            .and_then(|e| e.attributes.get(name))
            .map(String::as_str)
    }

    #[must_use]
    pub fn is_scroll_locked(&self) -> bool {
        self.scroll_locked
    }

    fn with_element<F>(&mut self, id: ElementId, update: F) -> bool
    where
        F: FnOnce(&mut ElementState),
    {
        if let Some(element) = self.elements.get_mut(&id) {
            update(element);
            true
        } else {
            trace!(element = %id, "element missing; write skipped");
            false
        }
    }
}

impl Document for PageDocument {
    fn set_text(&mut self, id: ElementId, text: &str) -> bool {
        self.with_element(id, |e| {
            e.text = Some(text.to_string());
            e.html = None;
        })
    }

    fn set_html(&mut self, id: ElementId, html: &str) -> bool {
        self.with_element(id, |e| {
            e.html = Some(html.to_string());
            e.text = None;
        })
    }

    fn set_href(&mut self, id: ElementId, href: Option<&str>) -> bool {
        self.with_element(id, |e| e.href = href.map(str::to_string))
    }

    fn set_hidden(&mut self, id: ElementId, hidden: bool) -> bool {
        self.with_element(id, |e| e.hidden = hidden)
    }

    fn set_attribute(&mut self, id: ElementId, name: &str, value: &str) -> bool {
        self.with_element(id, |e| {
            e.attributes.insert(name.to_string(), value.to_string());
        })
    }

    fn set_scroll_locked(&mut self, locked: bool) {
        self.scroll_locked = locked;
    }
}
