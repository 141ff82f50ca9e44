//! Shared helpers for integration tests.

#![allow(dead_code)]

pub mod http;

use std::path::PathBuf;

use tempfile::TempDir;

/// A small list covering dated, undated, and DOI-bearing records.
pub const SAMPLE_JSON: &str = r#"[
  {
    "title": "Beta Networks",
    "authors": "Smith, Jane and Doe, John",
    "abstract": "Neural shelves for tests.",
    "venue": "Journal of Tests",
    "year": 2021,
    "doi": "10.1234/beta",
    "bibtex": "@article{beta2021,\n  title = {Beta Networks}\n}"
  },
  {
    "title": "Alpha Graphs",
    "authors": "Lee, Kim",
    "abstract": "Graph methods.",
    "venue": "Graph Conf",
    "year": 2021,
    "link": "https://example.com/alpha"
  },
  {
    "title": "Gamma Survey",
    "authors": "Park, Min",
    "year": 2019
  },
  {
    "title": "Undated Draft",
    "authors": "Anon"
  }
]"#;

/// Writes `contents` to `publications.json` in a fresh temp dir.
#[allow(clippy::unwrap_used)]
pub fn write_publications(contents: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("publications.json");
    std::fs::write(&path, contents).unwrap();
    (dir, path)
}
