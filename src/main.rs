//! CLI entry point for the pubshelf tool.

use std::fs;
use std::io::{self, Write};

use anyhow::{Context, Result, bail};
use chrono::Datelike;
use clap::Parser;
use pubshelf_core::bibtex::citation_text;
use pubshelf_core::modal::ConfirmationExpired;
use pubshelf_core::render::{TextShelfRenderer, render_page};
use pubshelf_core::{
    AppState, DataSource, FilterCriteria, HtmlShelfRenderer, MemoryClipboard, PageDocument,
    PageEvent, ShelfEvent, SystemClipboard, load_publications,
};
use tokio::io::BufReader;
use tokio::sync::mpsc::{UnboundedReceiver, unbounded_channel};
use tracing::{debug, info};

mod browse;
mod cli;
mod config;

use browse::Browser;
use cli::{BibtexArgs, BrowseArgs, Cli, Command, RenderArgs, ShelfArgs, ShowArgs};
use config::{CliOverrides, FileConfig, Settings, load_config, resolve_settings};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let cli = Cli::parse();
    let loaded = load_config(cli.config.as_deref())?;

    init_tracing(&cli, loaded.config.as_ref());
    debug!(?cli, config = ?loaded.path, "CLI arguments parsed");

    let file = loaded.config.as_ref();
    match cli.command {
        Command::Render(args) => run_render(args, file).await,
        Command::List(args) => run_list(args, file).await,
        Command::Show(args) => run_show(args, file).await,
        Command::Bibtex(args) => run_bibtex(args, file).await,
        Command::Browse(args) => run_browse(args, file).await,
    }
}

/// Log level priority: RUST_LOG env var > quiet flag > verbose flag > config > default (info).
/// Logs go to stderr so page output on stdout stays clean.
fn init_tracing(cli: &Cli, file: Option<&FileConfig>) {
    let default_level = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => file
                .and_then(|c| c.verbosity)
                .map_or("info", config::VerbositySetting::as_filter),
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn overrides(shelf: &ShelfArgs) -> CliOverrides {
    CliOverrides {
        source: shelf.source.clone(),
        connect_timeout_secs: shelf.connect_timeout,
        ..CliOverrides::default()
    }
}

/// Loads the list once and builds the page session with the requested
/// filters applied.
async fn load_app(
    shelf: &ShelfArgs,
    settings: &Settings,
) -> Result<(AppState, UnboundedReceiver<ConfirmationExpired>)> {
    let source = DataSource::parse(&settings.source)
        .context("Invalid publication source")?
        .into_source(settings.connect_timeout_secs)?;

    let outcome = load_publications(source.as_ref()).await;
    let (timer_tx, timer_rx) = unbounded_channel();
    let mut app = AppState::new(outcome, settings.trap_focus, timer_tx);
    app.set_criteria(FilterCriteria::new(&shelf.year, shelf.query.clone()));

    info!(
        total = app.catalog().len(),
        visible = app.visible().len(),
        "shelf ready"
    );
    Ok((app, timer_rx))
}

async fn run_render(args: RenderArgs, file: Option<&FileConfig>) -> Result<()> {
    let mut cli_overrides = overrides(&args.shelf);
    cli_overrides.no_focus_trap = args.no_focus_trap;
    cli_overrides.excerpt_chars = args
        .excerpt_chars
        .map(usize::try_from)
        .transpose()
        .context("excerpt length out of range")?;
    let settings = resolve_settings(&cli_overrides, file);

    let (mut app, _timer_rx) = load_app(&args.shelf, &settings).await?;
    let renderer = HtmlShelfRenderer::new(settings.excerpt_chars);
    let mut document = PageDocument::default();
    app.initialize(&renderer, &mut document, chrono::Local::now().year());

    let page = render_page(&document);
    match &args.output {
        Some(path) => {
            fs::write(path, &page)
                .with_context(|| format!("Failed to write page to '{}'", path.display()))?;
            info!(path = %path.display(), bytes = page.len(), "page written");
        }
        None => io::stdout()
            .write_all(page.as_bytes())
            .context("Failed to write page to stdout")?,
    }
    Ok(())
}

async fn run_list(args: ShelfArgs, file: Option<&FileConfig>) -> Result<()> {
    let settings = resolve_settings(&overrides(&args), file);
    let (app, _timer_rx) = load_app(&args, &settings).await?;
    print!("{}", app.render_with(&TextShelfRenderer));
    Ok(())
}

/// Opens the modal on the `index`-th visible card, the same way a click on
/// the shelf does.
fn open_card(app: &mut AppState, index: usize, document: &mut PageDocument) -> Result<()> {
    let renderer = HtmlShelfRenderer::default();
    let mut clipboard = MemoryClipboard::new();
    app.handle_event(
        PageEvent::Shelf(ShelfEvent::Click { index }),
        &renderer,
        &mut clipboard,
        document,
    );
    if !app.modal().is_open() {
        bail!(
            "No publication at index {index} ({} visible). Run `pubshelf list` to see indices.",
            app.visible().len()
        );
    }
    Ok(())
}

async fn run_show(args: ShowArgs, file: Option<&FileConfig>) -> Result<()> {
    let settings = resolve_settings(&overrides(&args.shelf), file);
    let (mut app, _timer_rx) = load_app(&args.shelf, &settings).await?;
    let mut document = PageDocument::default();
    open_card(&mut app, args.index, &mut document)?;

    if let Some(view) = app.modal().view() {
        println!("{}", view.to_text());
    }
    Ok(())
}

async fn run_bibtex(args: BibtexArgs, file: Option<&FileConfig>) -> Result<()> {
    let settings = resolve_settings(&overrides(&args.shelf), file);
    let (mut app, mut timer_rx) = load_app(&args.shelf, &settings).await?;
    let mut document = PageDocument::default();
    open_card(&mut app, args.index, &mut document)?;

    if !args.copy {
        if let Some(publication) = app.modal().publication() {
            println!("{}", citation_text(publication));
        }
        return Ok(());
    }

    let mut clipboard = SystemClipboard::new();
    app.modal_mut()
        .copy_citation(&mut clipboard, &mut document)
        .context("Failed to copy citation")?;
    eprintln!("Copied!");

    // Some platforms drop clipboard contents when the owning process exits;
    // stay alive until the confirmation would revert.
    if let Some(expired) = timer_rx.recv().await {
        app.modal_mut().confirmation_expired(expired, &mut document);
    }
    Ok(())
}

async fn run_browse(args: BrowseArgs, file: Option<&FileConfig>) -> Result<()> {
    let mut cli_overrides = overrides(&args.shelf);
    cli_overrides.no_focus_trap = args.no_focus_trap;
    let settings = resolve_settings(&cli_overrides, file);

    let (app, mut timer_rx) = load_app(&args.shelf, &settings).await?;
    let mut browser = Browser::new(
        app,
        HtmlShelfRenderer::new(settings.excerpt_chars),
        Box::new(SystemClipboard::new()),
    );

    let mut stdout = io::stdout();
    browser.start(chrono::Local::now().year(), &mut stdout)?;
    browser
        .run(BufReader::new(tokio::io::stdin()), &mut timer_rx, &mut stdout)
        .await
}
