//! Owned application state for one page session.
//!
//! [`AppState`] is created once the startup load resolves, so controls have
//! nothing to act on before then. It holds the immutable catalog, the current
//! filter criteria, the shelf host, and the modal controller. Every page
//! event is routed through [`AppState::handle_event`] on a single thread.

use std::fmt::Write as _;

use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, trace};

use crate::catalog::Catalog;
use crate::dom::{Document, ElementId, Key};
use crate::filter::{FilterCriteria, YearSelection, filter_publications};
use crate::loader::LoadOutcome;
use crate::modal::{Clipboard, ConfirmationExpired, ModalController};
use crate::record::Publication;
use crate::render::{Shelf, ShelfEvent, ShelfRenderer, ShelfView, escape_html};

/// Something the user (or a timer) did on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    /// Year selector changed to this raw value.
    YearChanged(String),
    /// Search box text changed.
    QueryChanged(String),
    /// Delegated event from the shelf container.
    Shelf(ShelfEvent),
    /// Either modal close button.
    CloseClicked,
    /// Copy-citation button.
    CopyClicked,
    /// Key press anywhere on the page.
    KeyPressed(Key),
    /// Copy confirmation timer fired.
    ConfirmationExpired(ConfirmationExpired),
}

/// State of one page session.
#[derive(Debug)]
pub struct AppState {
    catalog: Catalog,
    criteria: FilterCriteria,
    load_failed: bool,
    shelf: Shelf,
    modal: ModalController,
}

impl AppState {
    /// Builds the session from the startup load. Records are sorted here,
    /// once, before any filtering.
    #[must_use]
    pub fn new(
        outcome: LoadOutcome,
        trap_focus: bool,
        timer_events: UnboundedSender<ConfirmationExpired>,
    ) -> Self {
        let load_failed = outcome.is_failed();
        Self {
            catalog: Catalog::new(outcome.publications),
            criteria: FilterCriteria::default(),
            load_failed,
            shelf: Shelf::new(),
            modal: ModalController::new(trap_focus, timer_events),
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Returns true when the startup load failed.
    #[must_use]
    pub fn load_failed(&self) -> bool {
        self.load_failed
    }

    #[must_use]
    pub fn shelf(&self) -> &Shelf {
        &self.shelf
    }

    #[must_use]
    pub fn modal(&self) -> &ModalController {
        &self.modal
    }

    pub fn modal_mut(&mut self) -> &mut ModalController {
        &mut self.modal
    }

    /// Records passing the current criteria, in display order.
    #[must_use]
    pub fn visible(&self) -> Vec<&Publication> {
        filter_publications(self.catalog.publications(), &self.criteria)
    }

    /// Replaces the filter criteria. The visible list is derived from the
    /// catalog again on next read.
    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        debug!(year = criteria.year.as_control_value(), query = %criteria.query, "filter changed");
        self.criteria = criteria;
    }

    /// Renders the visible list with `renderer`.
    pub fn render_with<R: ShelfRenderer>(&self, renderer: &R) -> R::Output {
        if self.load_failed {
            renderer.render_unavailable()
        } else {
            renderer.render(&self.visible())
        }
    }

    /// Renders the shelf into the page and re-initializes the carousel.
    pub fn render<R>(&mut self, renderer: &R, document: &mut dyn Document)
    where
        R: ShelfRenderer<Output = ShelfView>,
    {
        let view = self.render_with(renderer);
        self.shelf.mount(&view, document);
    }

    /// Writes the controls, footer year, and the initial shelf.
    pub fn initialize<R>(&mut self, renderer: &R, document: &mut dyn Document, current_year: i32)
    where
        R: ShelfRenderer<Output = ShelfView>,
    {
        document.set_text(ElementId::YearDisplay, &current_year.to_string());
        document.set_hidden(ElementId::Modal, true);
        let trap = if self.modal.trap_focus() { "true" } else { "false" };
        document.set_attribute(ElementId::Modal, "data-trap-focus", trap);
        self.sync_controls(document);
        self.render(renderer, document);
    }

    fn sync_controls(&self, document: &mut dyn Document) {
        let selected = self.criteria.year.as_control_value();
        let mut options = String::from(r#"<option value="">All years</option>"#);
        for year in self.catalog.years() {
            let year = year.to_string();
            let marker = if year == selected { " selected" } else { "" };
            let _ = write!(
                options,
                r#"<option value="{y}"{marker}>{y}</option>"#,
                y = escape_html(&year)
            );
        }
        document.set_html(ElementId::YearFilter, &options);
        document.set_attribute(ElementId::SearchInput, "value", &self.criteria.query);
    }

    /// Applies one page event.
    pub fn handle_event<R>(
        &mut self,
        event: PageEvent,
        renderer: &R,
        clipboard: &mut dyn Clipboard,
        document: &mut dyn Document,
    ) where
        R: ShelfRenderer<Output = ShelfView>,
    {
        trace!(?event, "page event");
        match event {
            PageEvent::YearChanged(value) => {
                self.set_criteria(FilterCriteria {
                    year: YearSelection::from_control(&value),
                    query: self.criteria.query.clone(),
                });
                self.render(renderer, document);
            }
            PageEvent::QueryChanged(query) => {
                self.set_criteria(FilterCriteria {
                    year: self.criteria.year.clone(),
                    query,
                });
                self.render(renderer, document);
            }
            PageEvent::Shelf(shelf_event) => {
                let Some(index) = shelf_event.activated_index() else {
                    return;
                };
                let selected = self.visible().get(index).map(|p| (*p).clone());
                match selected {
                    Some(publication) => self.modal.open(&publication, document),
                    None => debug!(index, "activation for unknown card ignored"),
                }
            }
            PageEvent::CloseClicked => {
                self.modal.close(document);
            }
            PageEvent::CopyClicked => {
                // The label stays put on failure; the controller already warned.
                if let Err(error) = self.modal.copy_citation(clipboard, document) {
                    debug!(error = %error, "copy click left label unchanged");
                }
            }
            PageEvent::KeyPressed(key) => {
                if self.modal.is_open() {
                    self.modal.handle_key(key, document);
                }
            }
            PageEvent::ConfirmationExpired(expired) => {
                self.modal.confirmation_expired(expired, document);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::PageDocument;
    use crate::loader::LoadError;
    use crate::modal::{COPIED_LABEL, COPY_LABEL, ClipboardError, MemoryClipboard};
    use crate::render::{HtmlShelfRenderer, LOAD_FAILED_MESSAGE};
    use tokio::sync::mpsc::{UnboundedReceiver, unbounded_channel};

    fn outcome() -> LoadOutcome {
        let mut neural = Publication::new("Neural Shelves", Some(2021));
        neural.abstract_text = Some("A neural approach".to_string());
        LoadOutcome {
            publications: vec![
                Publication::new("B", Some(2020)),
                Publication::new("A", Some(2020)),
                neural,
                Publication::new("C", Some(2021)),
            ],
            error: None,
        }
    }

    fn app(outcome: LoadOutcome) -> (AppState, UnboundedReceiver<ConfirmationExpired>) {
        let (tx, rx) = unbounded_channel();
        (AppState::new(outcome, false, tx), rx)
    }

    fn titles(app: &AppState) -> Vec<String> {
        app.visible().iter().map(|p| p.title.clone()).collect()
    }

    #[test]
    fn test_initial_visible_list_is_sorted_catalog() {
        let (app, _rx) = app(outcome());
        assert_eq!(titles(&app), vec!["C", "Neural Shelves", "A", "B"]);
    }

    #[test]
    fn test_initialize_writes_controls_and_shelf() {
        let (mut app, _rx) = app(outcome());
        let mut doc = PageDocument::default();
        app.initialize(&HtmlShelfRenderer::default(), &mut doc, 2026);

        assert_eq!(doc.text(ElementId::YearDisplay), Some("2026"));
        let options = doc.html(ElementId::YearFilter).unwrap_or_default();
        assert!(options.contains(r#"<option value="2021">2021</option>"#));
        assert!(options.find("2021") < options.find("2020"));
        assert!(doc.is_hidden(ElementId::Modal));
        assert_eq!(
            doc.attribute(ElementId::Modal, "data-trap-focus"),
            Some("false")
        );
        assert_eq!(app.shelf().generation(), 1);
    }

    #[test]
    fn test_filter_events_rerender() {
        let (mut app, _rx) = app(outcome());
        let renderer = HtmlShelfRenderer::default();
        let mut doc = PageDocument::default();
        let mut clipboard = MemoryClipboard::new();
        app.initialize(&renderer, &mut doc, 2026);

        app.handle_event(
            PageEvent::YearChanged("2021".to_string()),
            &renderer,
            &mut clipboard,
            &mut doc,
        );
        app.handle_event(
            PageEvent::QueryChanged("NEURAL".to_string()),
            &renderer,
            &mut clipboard,
            &mut doc,
        );

        assert_eq!(titles(&app), vec!["Neural Shelves"]);
        assert_eq!(app.shelf().generation(), 3);
        assert_eq!(app.catalog().len(), 4, "catalog is untouched by filtering");
    }

    #[test]
    fn test_card_activation_opens_visible_record() {
        let (mut app, _rx) = app(outcome());
        let renderer = HtmlShelfRenderer::default();
        let mut doc = PageDocument::default();
        let mut clipboard = MemoryClipboard::new();
        app.initialize(&renderer, &mut doc, 2026);
        app.handle_event(
            PageEvent::YearChanged("2020".to_string()),
            &renderer,
            &mut clipboard,
            &mut doc,
        );

        app.handle_event(
            PageEvent::Shelf(ShelfEvent::KeyDown {
                index: 1,
                key: Key::Enter,
            }),
            &renderer,
            &mut clipboard,
            &mut doc,
        );

        assert!(app.modal().is_open());
        assert_eq!(doc.text(ElementId::ModalTitle), Some("B"));
    }

    #[test]
    fn test_out_of_range_activation_ignored() {
        let (mut app, _rx) = app(outcome());
        let renderer = HtmlShelfRenderer::default();
        let mut doc = PageDocument::default();
        let mut clipboard = MemoryClipboard::new();
        app.handle_event(
            PageEvent::Shelf(ShelfEvent::Click { index: 99 }),
            &renderer,
            &mut clipboard,
            &mut doc,
        );
        assert!(!app.modal().is_open());
    }

    #[test]
    fn test_escape_only_acts_when_modal_open() {
        let (mut app, _rx) = app(outcome());
        let renderer = HtmlShelfRenderer::default();
        let mut doc = PageDocument::default();
        let mut clipboard = MemoryClipboard::new();
        app.initialize(&renderer, &mut doc, 2026);

        app.handle_event(
            PageEvent::KeyPressed(Key::Escape),
            &renderer,
            &mut clipboard,
            &mut doc,
        );
        assert!(doc.is_hidden(ElementId::Modal));

        app.handle_event(
            PageEvent::Shelf(ShelfEvent::Click { index: 0 }),
            &renderer,
            &mut clipboard,
            &mut doc,
        );
        assert!(!doc.is_hidden(ElementId::Modal));
        app.handle_event(
            PageEvent::KeyPressed(Key::Escape),
            &renderer,
            &mut clipboard,
            &mut doc,
        );
        assert!(doc.is_hidden(ElementId::Modal));
    }

    #[tokio::test]
    async fn test_copy_and_confirmation_round() {
        tokio::time::pause();
        let (mut app, mut rx) = app(outcome());
        let renderer = HtmlShelfRenderer::default();
        let mut doc = PageDocument::default();
        let mut clipboard = MemoryClipboard::new();
        app.initialize(&renderer, &mut doc, 2026);

        app.handle_event(
            PageEvent::Shelf(ShelfEvent::Click { index: 0 }),
            &renderer,
            &mut clipboard,
            &mut doc,
        );
        app.handle_event(PageEvent::CopyClicked, &renderer, &mut clipboard, &mut doc);
        assert_eq!(doc.text(ElementId::CopyBibtex), Some(COPIED_LABEL));
        let copied = clipboard.contents().unwrap_or_default();
        assert!(copied.contains("2021") && copied.contains("{C}"), "{copied}");

        if let Some(expired) = rx.recv().await {
            app.handle_event(
                PageEvent::ConfirmationExpired(expired),
                &renderer,
                &mut clipboard,
                &mut doc,
            );
        }
        assert_eq!(doc.text(ElementId::CopyBibtex), Some(COPY_LABEL));
    }

    #[tokio::test]
    async fn test_copy_failure_keeps_label() {
        let (mut app, _rx) = app(outcome());
        let renderer = HtmlShelfRenderer::default();
        let mut doc = PageDocument::default();
        let mut clipboard = MemoryClipboard::failing(ClipboardError::unavailable("no display"));
        app.initialize(&renderer, &mut doc, 2026);

        app.handle_event(
            PageEvent::Shelf(ShelfEvent::Click { index: 0 }),
            &renderer,
            &mut clipboard,
            &mut doc,
        );
        app.handle_event(PageEvent::CopyClicked, &renderer, &mut clipboard, &mut doc);

        assert!(app.modal().is_open());
        assert_eq!(doc.text(ElementId::CopyBibtex), Some(COPY_LABEL));
        assert_eq!(clipboard.writes(), 0);
    }

    #[test]
    fn test_failed_load_renders_error_placeholder() {
        let failed = LoadOutcome {
            publications: Vec::new(),
            error: Some(LoadError::http_status("https://example.com/p.json", 500)),
        };
        let (mut app, _rx) = app(failed);
        let mut doc = PageDocument::default();
        app.initialize(&HtmlShelfRenderer::default(), &mut doc, 2026);

        assert!(app.load_failed());
        assert!(app.visible().is_empty());
        assert!(
            doc.html(ElementId::Shelf)
                .is_some_and(|h| h.contains(LOAD_FAILED_MESSAGE))
        );
        assert!(app.shelf().carousel().is_none());
    }
}
