//! Publication Shelf Core Library
//!
//! This library provides the core functionality for the pubshelf tool,
//! which turns a static JSON list of publications into a filterable shelf
//! of cards with a citation detail view.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`record`] - Publication record model
//! - [`loader`] - One-shot fetch of the publication list (HTTP or file)
//! - [`catalog`] - Sorted, immutable full list
//! - [`filter`] - Year and free-text filtering
//! - [`render`] - Shelf rendering behind the [`ShelfRenderer`] trait
//! - [`modal`] - Detail view state machine, focus trap, and citation copy
//! - [`dom`] - Element contract of the surrounding page
//! - [`app`] - Owned application state tying the pipeline together

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod app;
pub mod bibtex;
pub mod catalog;
pub mod doi;
pub mod dom;
pub mod filter;
pub mod loader;
pub mod modal;
pub mod record;
pub mod render;
mod user_agent;

// Re-export commonly used types
pub use app::{AppState, PageEvent};
pub use catalog::{Catalog, sort_publications};
pub use dom::{Document, ElementId, PageDocument};
pub use filter::{FilterCriteria, YearSelection, filter_publications};
pub use loader::{
    DataSource, FileSource, HttpSource, LoadError, LoadOutcome, PublicationSource,
    load_publications,
};
pub use modal::{
    Clipboard, ClipboardError, CopyOutcome, MemoryClipboard, ModalController, ModalView,
    SystemClipboard,
};
pub use record::Publication;
pub use render::{HtmlShelfRenderer, Shelf, ShelfEvent, ShelfRenderer, ShelfView};
