//! Command-line driver: search one book and print every hit as a JSON line.

use anyhow::{Context, Result, anyhow};
use ebup_search::config::load_config;
use ebup_search::epub_loader::{EpubArchiveStore, is_epub};
use ebup_search::search::{ResultSink, SearchCoordinator, SearchResult, SearchState};
use ebup_search::store::{DirectoryStore, DocumentStore};
use std::env;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*, reload};

type ReloadHandle = reload::Handle<EnvFilter, tracing_subscriber::Registry>;

const DEFAULT_CONFIG_PATH: &str = "conf/config.toml";
const USAGE: &str = "Usage: ebup-search <book.epub|book-dir> <query> [--config <path>]";

struct Args {
    book: PathBuf,
    query: String,
    config: PathBuf,
}

fn main() {
    let reload_handle = init_tracing();
    if let Err(err) = run(&reload_handle) {
        error!("{err:?}");
        std::process::exit(1);
    }
}

fn run(reload_handle: &ReloadHandle) -> Result<()> {
    let args = parse_args()?;
    let config = load_config(&args.config);
    set_log_level(reload_handle, config.log_level.as_filter_str());
    info!(
        path = %args.book.display(),
        converter = %config.converter,
        level = %config.log_level,
        "Starting search"
    );

    let store = open_store(&args.book)?;
    let mut search = SearchCoordinator::new(store)
        .with_converter(Arc::from(config.converter.build()))
        .with_highlight(config.highlight_style());

    let mut printer = JsonLinePrinter::new(config.max_results);
    if !search.submit_query(&args.query, &mut printer)? {
        return Err(anyhow!("Query must not be blank\n{USAGE}"));
    }

    if let Some(token) = search.cancellation_token() {
        if let Err(err) = ctrlc::set_handler(move || {
            info!("Received Ctrl+C; cancelling search");
            token.cancel();
        }) {
            warn!("Failed to install Ctrl+C signal handler: {err}");
        }
    }

    let state = search.wait(&mut printer);
    printer.flush()?;
    info!(
        %state,
        found = search.results().len(),
        printed = printer.printed,
        "Search finished"
    );
    if state == SearchState::Cancelled {
        warn!("Search was cancelled; results are partial");
    }
    Ok(())
}

fn open_store(path: &Path) -> Result<Arc<dyn DocumentStore>> {
    if path.is_dir() {
        let store = DirectoryStore::open(path)?;
        info!(
            root = %store.root().display(),
            pages = store.page_count(),
            "Searching unpacked book"
        );
        return Ok(Arc::new(store));
    }
    if !is_epub(path) {
        warn!(path = %path.display(), "No .epub extension; trying to open as EPUB anyway");
    }
    let store = EpubArchiveStore::open(path)
        .with_context(|| format!("Failed to load book {}", path.display()))?;
    info!(
        archive = %store.path().display(),
        pages = store.page_count(),
        "Searching EPUB archive"
    );
    Ok(Arc::new(store))
}

/// Prints results as they arrive; `on_batch` hands over the full list, so
/// only the tail past `printed` is new.
struct JsonLinePrinter {
    out: io::BufWriter<io::Stdout>,
    printed: usize,
    limit: usize,
    write_failed: bool,
}

impl JsonLinePrinter {
    fn new(limit: usize) -> Self {
        Self {
            out: io::BufWriter::new(io::stdout()),
            printed: 0,
            limit,
            write_failed: false,
        }
    }

    fn flush(&mut self) -> Result<()> {
        self.out.flush().context("Failed to flush stdout")
    }

    fn print(&mut self, result: &SearchResult) -> Result<()> {
        let line = serde_json::to_string(result).context("Failed to encode result")?;
        writeln!(self.out, "{line}").context("Failed to write result")
    }
}

impl ResultSink for JsonLinePrinter {
    fn on_search_started(&mut self) {
        info!("Scanning book");
    }

    fn on_batch(&mut self, results: &[SearchResult]) {
        let end = if self.limit == 0 {
            results.len()
        } else {
            results.len().min(self.limit)
        };
        for result in results.get(self.printed..end).unwrap_or_default() {
            if self.write_failed {
                break;
            }
            if let Err(err) = self.print(result) {
                warn!("{err:#}");
                self.write_failed = true;
            }
        }
        self.printed = self.printed.max(end);
    }

    fn on_search_complete(&mut self) {
        info!(results = self.printed, "All chapters scanned");
    }
}

fn parse_args() -> Result<Args> {
    let mut positional = Vec::new();
    let mut config = PathBuf::from(DEFAULT_CONFIG_PATH);
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--config" {
            let path = args
                .next()
                .ok_or_else(|| anyhow!("--config needs a path\n{USAGE}"))?;
            config = PathBuf::from(path);
        } else {
            positional.push(arg);
        }
    }

    let mut positional = positional.into_iter();
    let (Some(book), Some(query), None) = (positional.next(), positional.next(), positional.next())
    else {
        return Err(anyhow!(USAGE));
    };

    let book = PathBuf::from(book);
    if !book.exists() {
        return Err(anyhow!("File not found: {}", book.display()));
    }
    Ok(Args {
        book,
        query,
        config,
    })
}

fn init_tracing() -> ReloadHandle {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    let (filter_layer, handle) = reload::Layer::new(env_filter);
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_filter(filter_layer),
        )
        .init();
    handle
}

fn set_log_level(handle: &ReloadHandle, level: &str) {
    if env::var_os("RUST_LOG").is_some() {
        return;
    }
    let parsed = EnvFilter::builder()
        .parse(level)
        .unwrap_or_else(|_| EnvFilter::new("debug"));
    if let Err(err) = handle.modify(|filter| *filter = parsed.clone()) {
        warn!(%level, "Failed to update log level from config: {err}");
    } else {
        info!(%level, "Applied log level from config");
    }
}
