//! `sidx`: inspect and query rustdoc `search-index.js` files from the terminal.

mod catalog;
mod cli;
mod color;
mod docfetch;
mod fmt;
pub mod logging;
mod source;
mod workspace;

use anyhow::{Context, bail};
use clap::Parser;
use searchindex::{IndexStats, ItemKind, Query, SearchIndex, hand_off, match_items, search};
use tracing::debug;

use catalog::Catalog;
use cli::{Cli, Command};
use docfetch::clear_cache;
use source::Source;
use workspace::Workspace;

pub use color::Color;

/// Run the CLI with the given arguments and return the output as a string.
///
/// # Arguments
/// * `args` - Command line arguments (excluding program name)
///
/// # Returns
/// * `Ok(String)` - Successful output (stdout)
/// * `Err(String)` - Error message (stderr)
pub fn run_cli(args: &[&str]) -> Result<String, String> {
    match run_cli_impl(args) {
        Ok(output) => Ok(output),
        Err(e) => Err(format!("{:#}", e)),
    }
}

fn run_cli_impl(args: &[&str]) -> anyhow::Result<String> {
    let cli = match Cli::try_parse_from(std::iter::once("sidx").chain(args.iter().copied())) {
        Ok(cli) => cli,
        Err(e) => {
            // Handle --help and --version as successful outputs
            if e.kind() == clap::error::ErrorKind::DisplayHelp
                || e.kind() == clap::error::ErrorKind::DisplayVersion
            {
                return Ok(e.to_string());
            }
            // clap's message already includes the value parser's error
            return Err(anyhow::Error::msg(e.to_string()));
        }
    };

    cli.color.apply();

    let index = cli.index.as_ref();
    let use_cache = !cli.no_cache;
    match cli.command {
        Command::ClearCache => {
            let mut output = clear_cache()?;
            output.push('\n');
            Ok(output)
        }
        Command::Check => {
            let (source, text) = read_index(index, use_cache)?;
            check(&source, &text)
        }
        Command::List { krate, kind } => {
            list(&load_catalog(index, use_cache)?, krate.as_deref(), kind)
        }
        Command::Search { query, limit } => {
            run_search(&load_catalog(index, use_cache)?, &query, limit)
        }
        Command::Show { symbol } => show(&load_catalog(index, use_cache)?, &symbol),
        Command::Stats => {
            let catalog = load_catalog(index, use_cache)?;
            Ok(fmt::format_stats(&IndexStats::collect(indexed(&catalog)?)))
        }
        Command::Dump { js } => {
            let catalog = load_catalog(index, use_cache)?;
            let table = indexed(&catalog)?;
            let mut output = if js {
                searchindex::render(table)?
            } else {
                searchindex::to_json_pretty(table)?
            };
            if !output.ends_with('\n') {
                output.push('\n');
            }
            Ok(output)
        }
    }
}

/// Resolve the source (the workspace's own index by default) and read it.
fn read_index(index: Option<&Source>, use_cache: bool) -> anyhow::Result<(Source, String)> {
    let source = match index {
        Some(source) => source.clone(),
        None => Source::Path(Workspace::discover()?.index_path()),
    };
    debug!(%source, "reading search index");
    let text = source.read(use_cache)?;
    Ok((source, text))
}

fn load_catalog(index: Option<&Source>, use_cache: bool) -> anyhow::Result<Catalog> {
    let (source, text) = read_index(index, use_cache)?;
    let index = searchindex::load_str(&text)
        .with_context(|| format!("Failed to load search index from {}", source))?;
    let mut catalog = Catalog::default();
    hand_off(index, &mut catalog);
    Ok(catalog)
}

fn indexed(catalog: &Catalog) -> anyhow::Result<&SearchIndex> {
    catalog.index().context("No search index loaded")
}

/// Parse without rejecting invalid tables so every problem gets reported.
fn check(source: &Source, text: &str) -> anyhow::Result<String> {
    let index = searchindex::parse(text)
        .with_context(|| format!("Failed to parse search index from {}", source))?;
    let report = searchindex::validate(&index);
    let mut output = fmt::format_report(&report);

    if !report.is_ok() {
        bail!(
            "{}{}: {} error(s), {} warning(s)",
            output,
            source,
            report.error_count(),
            report.warning_count()
        );
    }

    output.push_str(&format!(
        "OK: {} crate(s), {} items, {} warning(s)\n",
        index.len(),
        index.item_count(),
        report.warning_count()
    ));
    Ok(output)
}

fn list(catalog: &Catalog, krate: Option<&str>, kind: Option<ItemKind>) -> anyhow::Result<String> {
    if let Some(name) = krate {
        if indexed(catalog)?.get(name).is_none() {
            bail!("Crate '{}' is not in the index", name);
        }
    }
    let items: Vec<_> = catalog
        .items(krate)
        .into_iter()
        .filter(|item| kind.is_none_or(|kind| item.kind == kind))
        .collect();
    Ok(fmt::format_list(&items))
}

fn run_search(catalog: &Catalog, query: &str, limit: Option<usize>) -> anyhow::Result<String> {
    let parsed = Query::parse(query)?;
    let items = catalog.items(None);
    let mut hits = search(&items, &parsed);
    if hits.is_empty() {
        return Ok(format!("No items found matching '{}'\n", query));
    }
    let total = hits.len();
    if let Some(limit) = limit {
        hits.truncate(limit);
    }
    let mut output = fmt::format_list(&hits);
    if hits.len() < total {
        output.push_str(&format!("... and {} more\n", total - hits.len()));
    }
    Ok(output)
}

fn show(catalog: &Catalog, symbol: &str) -> anyhow::Result<String> {
    let matches = match_items(catalog.items(None), symbol);
    match matches.as_slice() {
        [] => bail!("No items found matching '{}'", symbol),
        [item] => Ok(fmt::format_detail(item)),
        items => Ok(fmt::format_ambiguous(items)),
    }
}
