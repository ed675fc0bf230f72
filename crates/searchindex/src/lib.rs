//! Typed model of the legacy rustdoc `search-index.js` artifact.
//!
//! The artifact registers one table per crate on a global `searchIndex`
//! object and hands it to `initSearch`. This crate loads that artifact into
//! an immutable [`SearchIndex`], validates its structural invariants,
//! expands the compressed item paths and answers queries the way the
//! documentation browser's client-side search does.

mod builder;
mod error;
mod kind;
mod load;
mod matcher;
mod model;
mod query;
mod registry;
mod render;
mod resolve;
mod stats;
mod validate;

pub use builder::{CrateIndexBuilder, SearchIndexBuilder};
pub use error::{Error, Result};
pub use kind::{ItemKind, UnknownKind};
pub use load::{load_file, load_str, parse};
pub use matcher::match_items;
pub use model::{CrateIndex, IndexItem, PathEntry, SearchIndex, Signature, TypeRef};
pub use query::{Query, Target, search};
pub use registry::{SearchConsumer, hand_off, install, installed};
pub use render::{render, to_json_pretty};
pub use resolve::{ResolvedItem, resolve, resolve_all};
pub use stats::{CrateStats, IndexStats};
pub use validate::{Problem, Report, Severity, validate};

#[cfg(test)]
pub(crate) mod test_support {
    use crate::{SearchIndex, parse};

    pub const FIXTURE: &str = include_str!("../tests/fixtures/search-index.js");
    pub const CRATE: &str = "electron_phonon_scattering_2d";

    pub fn fixture() -> SearchIndex {
        parse(FIXTURE).unwrap()
    }
}
