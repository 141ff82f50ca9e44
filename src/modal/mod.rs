//! Detail overlay for one publication.
//!
//! The controller is a two-state machine: closed, or open on exactly one
//! record. Opening always rebuilds every field from the record passed in, so
//! nothing from a previously shown record survives. Closing (button or
//! Escape) hides the overlay, restores page scroll, and cancels the pending
//! copy confirmation.

mod clipboard;
mod feedback;
mod focus;

pub use clipboard::{Clipboard, ClipboardError, MemoryClipboard, SystemClipboard};
pub use feedback::{
    CONFIRMATION_DELAY, COPIED_LABEL, COPY_LABEL, ConfirmationExpired, ConfirmationTimer,
};
pub use focus::FocusTrap;

use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, warn};

use crate::bibtex::citation_text;
use crate::doi::doi_url;
use crate::dom::{Document, ElementId, Key};
use crate::record::Publication;

/// Field values shown in the overlay, derived from one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalView {
    pub title: String,
    /// Empty when the record has no authors.
    pub authors: String,
    /// Venue and year joined for display, e.g. `NeurIPS, 2021`.
    pub venue_line: String,
    /// Empty when the record has no abstract.
    pub abstract_text: String,
    /// Resolved DOI link, shown only when present.
    pub doi_url: Option<String>,
    /// External link, shown only when present.
    pub link: Option<String>,
}

impl ModalView {
    /// Derives the view for `publication`.
    #[must_use]
    pub fn from_publication(publication: &Publication) -> Self {
        let year = publication.year.map(|y| y.to_string());
        let venue_line = [publication.venue().map(str::trim), year.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(", ");

        Self {
            title: publication.title.clone(),
            authors: publication.authors().unwrap_or_default().to_string(),
            venue_line,
            abstract_text: publication.abstract_text().unwrap_or_default().to_string(),
            doi_url: publication.doi().and_then(doi_url),
            link: publication.link().map(|l| l.trim().to_string()),
        }
    }

    /// Writes every field into the page, clearing the ones this record
    /// lacks.
    pub fn apply(&self, document: &mut dyn Document) {
        document.set_text(ElementId::ModalTitle, &self.title);
        set_optional_text(document, ElementId::ModalAuthors, &self.authors);
        set_optional_text(document, ElementId::ModalVenue, &self.venue_line);
        set_optional_text(document, ElementId::ModalAbstract, &self.abstract_text);
        set_optional_link(document, ElementId::ModalDoi, self.doi_url.as_deref());
        set_optional_link(document, ElementId::ModalLink, self.link.as_deref());
    }

    /// Terminal rendition used by the `show` command.
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut lines = vec![self.title.clone()];
        for value in [&self.authors, &self.venue_line] {
            if !value.is_empty() {
                lines.push(value.clone());
            }
        }
        if !self.abstract_text.is_empty() {
            lines.push(String::new());
            lines.push(self.abstract_text.clone());
        }
        if let Some(doi) = &self.doi_url {
            lines.push(format!("DOI:  {doi}"));
        }
        if let Some(link) = &self.link {
            lines.push(format!("Link: {link}"));
        }
        lines.join("\n")
    }
}

fn set_optional_text(document: &mut dyn Document, id: ElementId, value: &str) {
    document.set_text(id, value);
    document.set_hidden(id, value.is_empty());
}

fn set_optional_link(document: &mut dyn Document, id: ElementId, href: Option<&str>) {
    document.set_href(id, href);
    document.set_hidden(id, href.is_none());
}

/// Result of the copy-citation action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyOutcome {
    /// The citation was placed on the clipboard.
    Copied {
        /// Exact text copied.
        text: String,
    },
    /// The modal was closed; nothing to copy.
    NotOpen,
}

#[derive(Debug)]
struct OpenModal {
    publication: Publication,
    view: ModalView,
    focus: Option<FocusTrap>,
    confirmation: Option<ConfirmationTimer>,
}

/// Owns the overlay state and its page side effects.
#[derive(Debug)]
pub struct ModalController {
    open: Option<OpenModal>,
    trap_focus: bool,
    session: u64,
    copy_seq: u64,
    timer_events: UnboundedSender<ConfirmationExpired>,
}

impl ModalController {
    /// Creates a closed controller. Confirmation expiries are reported on
    /// `timer_events` and must be fed back through
    /// [`ModalController::confirmation_expired`].
    #[must_use]
    pub fn new(trap_focus: bool, timer_events: UnboundedSender<ConfirmationExpired>) -> Self {
        Self {
            open: None,
            trap_focus,
            session: 0,
            copy_seq: 0,
            timer_events,
        }
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// Whether Tab cycling is confined to the open modal.
    #[must_use]
    pub fn trap_focus(&self) -> bool {
        self.trap_focus
    }

    /// Record currently shown.
    #[must_use]
    pub fn publication(&self) -> Option<&Publication> {
        self.open.as_ref().map(|o| &o.publication)
    }

    /// View currently shown.
    #[must_use]
    pub fn view(&self) -> Option<&ModalView> {
        self.open.as_ref().map(|o| &o.view)
    }

    /// Counter incremented on every open.
    #[must_use]
    pub fn session(&self) -> u64 {
        self.session
    }

    /// Element holding focus when the trap is active.
    #[must_use]
    pub fn focused(&self) -> Option<ElementId> {
        self.open
            .as_ref()
            .and_then(|o| o.focus.as_ref())
            .map(FocusTrap::focused)
    }

    /// Shows the overlay for `publication`, replacing whatever was shown.
    pub fn open(&mut self, publication: &Publication, document: &mut dyn Document) {
        // Replacing the open state drops any pending confirmation timer.
        self.session += 1;
        let view = ModalView::from_publication(publication);
        view.apply(document);
        document.set_text(ElementId::CopyBibtex, COPY_LABEL);
        document.set_hidden(ElementId::Modal, false);
        document.set_scroll_locked(true);

        let focus = self
            .trap_focus
            .then(|| FocusTrap::new(view.doi_url.is_some(), view.link.is_some()));

        debug!(session = self.session, title = %publication.title, "modal opened");
        self.open = Some(OpenModal {
            publication: publication.clone(),
            view,
            focus,
            confirmation: None,
        });
    }

    /// Hides the overlay. Returns `false` when it was already closed.
    pub fn close(&mut self, document: &mut dyn Document) -> bool {
        if self.open.take().is_none() {
            return false;
        }
        document.set_hidden(ElementId::Modal, true);
        document.set_text(ElementId::CopyBibtex, COPY_LABEL);
        document.set_scroll_locked(false);
        debug!(session = self.session, "modal closed");
        true
    }

    /// Handles a key press while the page has focus. Escape closes; Tab and
    /// Shift+Tab cycle focus when the trap is enabled.
    ///
    /// Returns the newly focused element when focus moved.
    pub fn handle_key(&mut self, key: Key, document: &mut dyn Document) -> Option<ElementId> {
        match key {
            Key::Escape => {
                self.close(document);
                None
            }
            Key::Tab => self.focus_trap_mut().map(FocusTrap::next),
            Key::BackTab => self.focus_trap_mut().map(FocusTrap::prev),
            Key::Enter | Key::Other => None,
        }
    }

    fn focus_trap_mut(&mut self) -> Option<&mut FocusTrap> {
        self.open.as_mut().and_then(|o| o.focus.as_mut())
    }

    /// Copies the open record's citation to `clipboard` and shows the
    /// confirmation label until [`CONFIRMATION_DELAY`] elapses.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`ClipboardError`] when the clipboard write fails; the
    /// confirmation is not shown in that case.
    pub fn copy_citation(
        &mut self,
        clipboard: &mut dyn Clipboard,
        document: &mut dyn Document,
    ) -> Result<CopyOutcome, ClipboardError> {
        let session = self.session;
        let Some(open) = self.open.as_mut() else {
            return Ok(CopyOutcome::NotOpen);
        };

        let text = citation_text(&open.publication);
        if let Err(error) = clipboard.write_text(&text) {
            warn!(error = %error, "citation copy failed");
            return Err(error);
        }

        // Each copy gets its own sequence so an expiry already queued for an
        // earlier copy cannot revert this one.
        self.copy_seq += 1;
        document.set_text(ElementId::CopyBibtex, COPIED_LABEL);
        open.confirmation = Some(ConfirmationTimer::arm(
            session,
            self.copy_seq,
            CONFIRMATION_DELAY,
            self.timer_events.clone(),
        ));
        info!(
            session,
            seq = self.copy_seq,
            chars = text.len(),
            "citation copied"
        );
        Ok(CopyOutcome::Copied { text })
    }

    /// Reverts the copy label when `expired` belongs to the most recent copy
    /// of the session still showing. Returns `false` for stale expiries,
    /// which are ignored.
    pub fn confirmation_expired(
        &mut self,
        expired: ConfirmationExpired,
        document: &mut dyn Document,
    ) -> bool {
        let session = self.session;
        let Some(open) = self.open.as_mut() else {
            return false;
        };
        let current = expired.session == session
            && open
                .confirmation
                .as_ref()
                .is_some_and(|t| t.is_source_of(expired));
        if !current {
            debug!(
                session = expired.session,
                seq = expired.seq,
                "stale confirmation ignored"
            );
            return false;
        }
        open.confirmation = None;
        document.set_text(ElementId::CopyBibtex, COPY_LABEL);
        true
    }
}
