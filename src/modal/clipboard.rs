//! Clipboard boundary for the copy-citation action.

use thiserror::Error;
use tracing::debug;

/// Errors that can occur while writing to a clipboard.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClipboardError {
    /// No clipboard could be opened (headless session, missing display server).
    #[error("clipboard unavailable: {reason}\n  Suggestion: Print the citation instead of copying it")]
    Unavailable {
        /// Platform error text.
        reason: String,
    },

    /// The clipboard rejected the write.
    #[error("failed to write to clipboard: {reason}")]
    Write {
        /// Platform error text.
        reason: String,
    },
}

impl ClipboardError {
    /// Creates an `Unavailable` error.
    #[must_use]
    pub fn unavailable(reason: impl ToString) -> Self {
        Self::Unavailable {
            reason: reason.to_string(),
        }
    }

    /// Creates a `Write` error.
    #[must_use]
    pub fn write(reason: impl ToString) -> Self {
        Self::Write {
            reason: reason.to_string(),
        }
    }
}

/// Write access to a text clipboard.
pub trait Clipboard {
    /// Replaces the clipboard contents with `text`.
    ///
    /// # Errors
    ///
    /// Returns [`ClipboardError`] when the platform refuses the write.
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// The operating system clipboard.
///
/// The platform handle is opened on first use so that constructing the
/// controller never fails on headless machines.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl std::fmt::Debug for SystemClipboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemClipboard")
            .field("opened", &self.inner.is_some())
            .finish()
    }
}

impl SystemClipboard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clipboard for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.inner.is_none() {
            let clipboard = arboard::Clipboard::new().map_err(ClipboardError::unavailable)?;
            debug!("system clipboard opened");
            self.inner = Some(clipboard);
        }
        match self.inner.as_mut() {
            Some(clipboard) => clipboard
                .set_text(text.to_string())
                .map_err(ClipboardError::write),
            None => Err(ClipboardError::unavailable("clipboard handle missing")),
        }
    }
}

/// In-memory clipboard for tests and dry runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    contents: Option<String>,
    fail_with: Option<ClipboardError>,
    writes: usize,
}

impl MemoryClipboard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A clipboard whose every write fails with `error`.
    #[must_use]
    pub fn failing(error: ClipboardError) -> Self {
        Self {
            fail_with: Some(error),
            ..Self::default()
        }
    }

    /// Last successfully written text.
    #[must_use]
    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }

    /// Number of successful writes.
    #[must_use]
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if let Some(error) = &self.fail_with {
            return Err(error.clone());
        }
        self.contents = Some(text.to_string());
        self.writes += 1;
        Ok(())
    }
}
