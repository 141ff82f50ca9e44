//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Render a filterable shelf of publications with a citation detail view.
///
/// Pubshelf loads a JSON list of publications once, sorts it by year and
/// title, and renders it as a static page, a terminal listing, or a single
/// record's detail view and citation.
#[derive(Parser, Debug)]
#[command(name = "pubshelf")]
#[command(author, version, about)]
pub struct Cli {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Config file (default: $XDG_CONFIG_HOME/pubshelf/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write the full static page (shelf, controls, modal skeleton)
    Render(RenderArgs),
    /// Print the visible publications
    List(ShelfArgs),
    /// Print the detail view of one visible publication
    Show(ShowArgs),
    /// Print or copy the BibTeX citation of one visible publication
    Bibtex(BibtexArgs),
    /// Drive the page interactively with commands read from stdin
    Browse(BrowseArgs),
}

/// Source and filter options shared by every command.
#[derive(Args, Debug, Clone, Default)]
pub struct ShelfArgs {
    /// Publication list URL or file path (default: data/publications.json)
    #[arg(short, long)]
    pub source: Option<String>,

    /// Only show publications from this year
    #[arg(short, long, default_value = "")]
    pub year: String,

    /// Case-insensitive text matched against title, authors, abstract, venue
    #[arg(short = 'f', long = "query", default_value = "")]
    pub query: String,

    /// HTTP connect timeout in seconds (1-3600)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..=3600))]
    pub connect_timeout: Option<u64>,
}

#[derive(Args, Debug, Clone)]
pub struct RenderArgs {
    #[command(flatten)]
    pub shelf: ShelfArgs,

    /// Write the page here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Do not confine keyboard focus to the open modal
    #[arg(long)]
    pub no_focus_trap: bool,

    /// Abstract excerpt length on cards (1-2000)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..=2000))]
    pub excerpt_chars: Option<u64>,
}

#[derive(Args, Debug, Clone)]
pub struct BrowseArgs {
    #[command(flatten)]
    pub shelf: ShelfArgs,

    /// Do not confine keyboard focus to the open modal
    #[arg(long)]
    pub no_focus_trap: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ShowArgs {
    #[command(flatten)]
    pub shelf: ShelfArgs,

    /// Position in the visible list, as printed by `list`
    pub index: usize,
}

#[derive(Args, Debug, Clone)]
pub struct BibtexArgs {
    #[command(flatten)]
    pub shelf: ShelfArgs,

    /// Position in the visible list, as printed by `list`
    pub index: usize,

    /// Copy to the system clipboard instead of printing
    #[arg(short, long)]
    pub copy: bool,
}
