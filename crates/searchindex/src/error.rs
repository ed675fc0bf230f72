use std::path::PathBuf;

use thiserror::Error;

use crate::validate::Report;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Parse error at byte {offset}: {message}")]
    Parse { offset: usize, message: String },

    #[error("Invalid table for crate '{krate}' at byte {offset}: {source}")]
    Json {
        krate: String,
        offset: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Crate '{0}' is registered more than once")]
    DuplicateCrate(String),

    #[error("initSearch(searchIndex) must be called exactly once: {0}")]
    InitSearch(&'static str),

    #[error("Invalid query '{query}': {reason}")]
    Query { query: String, reason: String },

    #[error("Search index failed validation with {} error(s)", .0.error_count())]
    Invalid(Report),

    #[error("Failed to serialize search index: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("A search index has already been installed")]
    AlreadyInstalled,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
