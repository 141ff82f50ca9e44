//! Transient "Copied!" confirmation on the copy button.
//!
//! The revert is a timer owned by one copy within one modal session.
//! Dropping the timer aborts it, and an expiry that still slips through
//! carries its session and copy sequence so the controller can ignore it once
//! a newer copy or session is showing.

use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::trace;

/// Copy button label at rest.
pub const COPY_LABEL: &str = "Copy BibTeX";

/// Copy button label after a successful copy.
pub const COPIED_LABEL: &str = "Copied!";

/// How long the confirmation stays visible.
pub const CONFIRMATION_DELAY: Duration = Duration::from_secs(2);

/// Message delivered when a confirmation timer expires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmationExpired {
    /// Modal session that armed the timer.
    pub session: u64,
    /// Copy sequence number within the controller.
    pub seq: u64,
}

/// A pending label revert. Aborted on drop.
#[derive(Debug)]
pub struct ConfirmationTimer {
    session: u64,
    seq: u64,
    handle: JoinHandle<()>,
}

impl ConfirmationTimer {
    /// Arms a timer that reports `session` and `seq` on `notify` after
    /// `delay`.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn arm(
        session: u64,
        seq: u64,
        delay: Duration,
        notify: UnboundedSender<ConfirmationExpired>,
    ) -> Self {
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver gone means the page is shutting down.
            let _ = notify.send(ConfirmationExpired { session, seq });
        });
        trace!(session, seq, "confirmation timer armed");
        Self {
            session,
            seq,
            handle,
        }
    }

    /// Session this timer belongs to.
    #[must_use]
    pub fn session(&self) -> u64 {
        self.session
    }

    /// Returns true when `expired` was sent by this timer.
    #[must_use]
    pub fn is_source_of(&self, expired: ConfirmationExpired) -> bool {
        self.session == expired.session && self.seq == expired.seq
    }
}

impl Drop for ConfirmationTimer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
