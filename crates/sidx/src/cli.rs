use clap::{Parser, Subcommand};

use crate::color::Color;
use crate::source::Source;

/// Inspect and query a rustdoc search index
#[derive(Parser, Debug)]
#[command(name = "sidx")]
#[command(version)]
#[command(about = "Inspect and query a rustdoc search index (search-index.js)", long_about = None)]
#[command(after_help = "\
EXAMPLES:
  sidx check                           Validate target/doc/search-index.js
  sidx --index docs/ list --kind struct
  sidx search 'fn:probability'         Search by kind and name
  sidx search 'material, point -> f64' Search by signature
  sidx show Material::energy           Show one item")]
#[command(after_long_help = "\
INDEX SOURCE:
  --index accepts a file, a documentation directory (search-index.js is
  appended) or an http(s) URL. Downloads are cached zstd-compressed in the
  user cache directory; use --no-cache to bypass and clear-cache to reset.
  Without --index (or SIDX_INDEX), the index cargo doc writes for the
  current workspace is used: <target dir>/doc/search-index.js.

QUERIES:
  name                 Case-insensitive substring of the item name
  module::Type::name   Exact name below contiguous parent segments
  in, in -> out        Items whose signature takes and returns these types
  kind:query           Restrict any of the above to one kind (struct:, fn:, ...)

EXAMPLES:
  sidx check                           Validate target/doc/search-index.js
  sidx --index docs/ list --kind struct
  sidx search 'fn:probability'         Search by kind and name
  sidx search 'material, point -> f64' Search by signature
  sidx show Material::energy           Show one item")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Index to read: path, documentation directory or http(s) URL
    #[arg(long, global = true, value_name = "SOURCE", env = "SIDX_INDEX")]
    pub index: Option<Source>,

    /// Skip cache and download a fresh index
    #[arg(long, global = true)]
    pub no_cache: bool,

    /// When to use colors in output.
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    pub color: Color,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate the index and report problems
    Check,

    /// List items
    List {
        /// Only items of this crate
        #[arg(long = "crate", value_name = "NAME")]
        krate: Option<String>,

        /// Only items of this kind (struct, fn, method, ...)
        #[arg(long)]
        kind: Option<searchindex::ItemKind>,
    },

    /// Search items by name, path or signature
    Search {
        /// Query, e.g. `energy`, `struct:Particle`, `f64 -> f64`
        #[arg(allow_hyphen_values = true)]
        query: String,

        /// Show at most this many results
        #[arg(long, short = 'n')]
        limit: Option<usize>,
    },

    /// Show one item by (partially) qualified name
    Show {
        /// Symbol, e.g. `Material::energy`
        symbol: String,
    },

    /// Print item counts per kind and crate
    Stats,

    /// Write the index back out
    Dump {
        /// Write the `search-index.js` form instead of pretty JSON
        #[arg(long)]
        js: bool,
    },

    /// Clear the download cache
    ClearCache,
}
