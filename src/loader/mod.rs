//! One-shot loading of the publication list.
//!
//! The list is fetched exactly once per run. Any failure (transport error,
//! non-success status, unreadable file, malformed payload) is logged and
//! degrades to an empty list; callers always get a [`LoadOutcome`], never an
//! error. There is no retry and no cache: every load fetches fresh data.
//!
//! # Example
//!
//! ```no_run
//! use pubshelf_core::loader::{DataSource, load_publications};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let source = DataSource::parse("https://example.com/data/publications.json")?
//!     .into_source(30)?;
//! let outcome = load_publications(source.as_ref()).await;
//! println!("{} publications", outcome.publications.len());
//! # Ok(())
//! # }
//! ```

mod error;
mod source;

pub use error::LoadError;
pub use source::{CONNECT_TIMEOUT_SECS, DataSource, FileSource, HttpSource, PublicationSource};

use tracing::{info, warn};

use crate::record::Publication;

/// Default location of the publication list, relative to the site root.
pub const DEFAULT_SOURCE: &str = "data/publications.json";

/// Result of the startup load.
#[derive(Debug, Default)]
pub struct LoadOutcome {
    /// Records in source order; empty on failure.
    pub publications: Vec<Publication>,
    /// Why the load failed, if it did.
    pub error: Option<LoadError>,
}

impl LoadOutcome {
    /// Returns true when the load failed and the list was substituted.
    #[must_use]
    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }
}

/// Loads the publication list from `source`, degrading to an empty list on
/// failure.
pub async fn load_publications(source: &dyn PublicationSource) -> LoadOutcome {
    let origin = source.describe();
    match source.fetch().await {
        Ok(publications) => {
            info!(source = %origin, count = publications.len(), "publications loaded");
            LoadOutcome {
                publications,
                error: None,
            }
        }
        Err(error) => {
            warn!(source = %origin, error = %error, "failed to load publications; showing none");
            LoadOutcome {
                publications: Vec::new(),
                error: Some(error),
            }
        }
    }
}
