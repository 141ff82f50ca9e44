//! Line-driven interactive session for the `browse` command.
//!
//! Each input line is one user action on the page (pick a year, type a
//! query, activate a card, press a key, copy a citation). Actions become
//! [`PageEvent`]s and go through the same [`AppState::handle_event`] path a
//! page would use; copy confirmations arrive on the timer channel and are
//! fed back the same way.

use std::io::Write;

use anyhow::{Context, Result, bail};
use pubshelf_core::dom::{ElementId, Key};
use pubshelf_core::modal::{COPIED_LABEL, COPY_LABEL, ConfirmationExpired};
use pubshelf_core::render::TextShelfRenderer;
use pubshelf_core::{
    AppState, Clipboard, HtmlShelfRenderer, PageDocument, PageEvent, ShelfEvent,
};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::debug;

/// Usage shown by the `help` command.
pub const HELP: &str = "\
commands:
  year [YEAR]       filter by year (no value clears)
  search [TEXT]     filter by text (no value clears)
  list              print the visible publications
  open N            click card N
  enter N           press Enter on card N
  tab | backtab     move focus inside the open modal
  esc | close       close the modal
  copy              copy the open publication's BibTeX
  help              show this help
  quit              leave";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseCommand {
    /// An action routed through the page state.
    Page(PageEvent),
    /// Print the visible list.
    List,
    Help,
    Quit,
}

/// Parses one input line. Blank lines yield `None`.
pub fn parse_command(line: &str) -> Result<Option<BrowseCommand>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(w, r)| (w, r.trim()));

    let command = match word.to_ascii_lowercase().as_str() {
        "year" => BrowseCommand::Page(PageEvent::YearChanged(rest.to_string())),
        "search" | "query" => BrowseCommand::Page(PageEvent::QueryChanged(rest.to_string())),
        "open" => BrowseCommand::Page(PageEvent::Shelf(ShelfEvent::Click {
            index: parse_index(word, rest)?,
        })),
        "enter" => BrowseCommand::Page(PageEvent::Shelf(ShelfEvent::KeyDown {
            index: parse_index(word, rest)?,
            key: Key::Enter,
        })),
        "tab" => BrowseCommand::Page(PageEvent::KeyPressed(Key::Tab)),
        "backtab" | "shift-tab" => BrowseCommand::Page(PageEvent::KeyPressed(Key::BackTab)),
        "esc" | "escape" => BrowseCommand::Page(PageEvent::KeyPressed(Key::Escape)),
        "close" => BrowseCommand::Page(PageEvent::CloseClicked),
        "copy" => BrowseCommand::Page(PageEvent::CopyClicked),
        "list" | "ls" => BrowseCommand::List,
        "help" | "?" => BrowseCommand::Help,
        "quit" | "exit" | "q" => BrowseCommand::Quit,
        other => bail!("unknown command '{other}' (type `help`)"),
    };
    Ok(Some(command))
}

fn parse_index(word: &str, rest: &str) -> Result<usize> {
    rest.parse()
        .with_context(|| format!("`{word}` needs a card number, got '{rest}'"))
}

/// Interactive page session.
pub struct Browser {
    app: AppState,
    renderer: HtmlShelfRenderer,
    document: PageDocument,
    clipboard: Box<dyn Clipboard>,
}

impl Browser {
    #[must_use]
    pub fn new(app: AppState, renderer: HtmlShelfRenderer, clipboard: Box<dyn Clipboard>) -> Self {
        Self {
            app,
            renderer,
            document: PageDocument::default(),
            clipboard,
        }
    }

    /// Page state as last written.
    #[cfg(test)]
    pub fn document(&self) -> &PageDocument {
        &self.document
    }

    /// Builds the page and prints the initial shelf.
    pub fn start(&mut self, current_year: i32, out: &mut impl Write) -> Result<()> {
        self.app
            .initialize(&self.renderer, &mut self.document, current_year);
        self.print_list(out)
    }

    /// Reads commands from `input` until `quit` or end of input. A copy
    /// confirmation still showing at end of input is waited out.
    pub async fn run<R, W>(
        &mut self,
        input: R,
        timer_rx: &mut UnboundedReceiver<ConfirmationExpired>,
        out: &mut W,
    ) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let mut lines = input.lines();
        let mut input_open = true;

        loop {
            if !input_open && !self.confirmation_pending() {
                break;
            }

            tokio::select! {
                biased;
                Some(expired) = timer_rx.recv() => {
                    self.apply_event(PageEvent::ConfirmationExpired(expired), out)?;
                }
                line = lines.next_line(), if input_open => {
                    let Some(line) = line.context("Failed to read browse input")? else {
                        debug!("browse input closed");
                        input_open = false;
                        continue;
                    };
                    match parse_command(&line) {
                        Ok(Some(BrowseCommand::Quit)) => break,
                        Ok(Some(command)) => self.apply(command, out)?,
                        Ok(None) => {}
                        Err(error) => writeln!(out, "{error:#}")?,
                    }
                }
                else => break,
            }
        }
        Ok(())
    }

    fn confirmation_pending(&self) -> bool {
        self.document.text(ElementId::CopyBibtex) == Some(COPIED_LABEL)
    }

    fn apply(&mut self, command: BrowseCommand, out: &mut impl Write) -> Result<()> {
        match command {
            BrowseCommand::Page(event) => self.apply_event(event, out),
            BrowseCommand::List => self.print_list(out),
            BrowseCommand::Help => Ok(writeln!(out, "{HELP}")?),
            BrowseCommand::Quit => Ok(()),
        }
    }

    fn print_list(&self, out: &mut impl Write) -> Result<()> {
        write!(out, "{}", self.app.render_with(&TextShelfRenderer))?;
        Ok(())
    }

    /// Routes `event` through the page state and reports what changed.
    fn apply_event(&mut self, event: PageEvent, out: &mut impl Write) -> Result<()> {
        let was_open = self.app.modal().is_open();
        let label_before = self.document.text(ElementId::CopyBibtex).map(str::to_string);

        self.app.handle_event(
            event.clone(),
            &self.renderer,
            self.clipboard.as_mut(),
            &mut self.document,
        );

        let modal = self.app.modal();
        match event {
            PageEvent::YearChanged(_) | PageEvent::QueryChanged(_) => self.print_list(out)?,
            PageEvent::Shelf(shelf_event) => {
                let Some(index) = shelf_event.activated_index() else {
                    return Ok(());
                };
                match modal.view() {
                    Some(view) if index < self.app.visible().len() => {
                        writeln!(out, "{}", view.to_text())?;
                    }
                    _ => writeln!(
                        out,
                        "No publication at index {index} ({} visible)",
                        self.app.visible().len()
                    )?,
                }
            }
            PageEvent::CloseClicked | PageEvent::KeyPressed(Key::Escape) => {
                if was_open {
                    writeln!(out, "closed")?;
                }
            }
            PageEvent::KeyPressed(Key::Tab | Key::BackTab) => {
                if let Some(focused) = modal.focused() {
                    writeln!(out, "focus: {focused}")?;
                }
            }
            PageEvent::KeyPressed(_) => {}
            PageEvent::CopyClicked => {
                if !was_open {
                    writeln!(out, "Nothing to copy: no publication is open")?;
                } else if self.confirmation_pending() {
                    writeln!(out, "{COPIED_LABEL}")?;
                } else {
                    writeln!(out, "Copy failed; see log for details")?;
                }
            }
            PageEvent::ConfirmationExpired(_) => {
                let label_after = self.document.text(ElementId::CopyBibtex);
                if label_before.as_deref() == Some(COPIED_LABEL) && label_after == Some(COPY_LABEL)
                {
                    writeln!(out, "{COPY_LABEL}")?;
                }
            }
        }
        Ok(())
    }
}
