use anyhow::{Context, Result, bail};
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use crate::docfetch::fetch_index;

/// File name rustdoc gives the index inside a documentation root.
pub const INDEX_FILE: &str = "search-index.js";

/// Where to read a search index from.
///
/// Syntax:
/// - `https://host/doc/search-index.js` → remote file
/// - `https://host/doc/` → remote documentation root, `search-index.js` appended
/// - `target/doc` → local documentation root, `search-index.js` appended
/// - `target/doc/search-index.js` → local file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Path(PathBuf),
    Url(String),
}

impl Source {
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        if input.is_empty() {
            bail!("Index source cannot be empty");
        }

        let lower = input.to_lowercase();
        let remote = ["http://", "https://"]
            .iter()
            .find_map(|scheme| lower.strip_prefix(scheme).map(|rest| (scheme, rest)));
        if let Some((scheme, rest)) = remote {
            if rest.trim_matches('/').is_empty() {
                bail!("URL has no host after '{}'", scheme);
            }
            let url = if input.ends_with('/') {
                format!("{}{}", input, INDEX_FILE)
            } else {
                input.to_string()
            };
            return Ok(Source::Url(url));
        }

        Ok(Source::Path(PathBuf::from(input)))
    }

    /// Read the artifact text, downloading remote sources through the cache.
    pub fn read(&self, use_cache: bool) -> Result<String> {
        match self {
            Source::Path(path) => {
                let path = if path.is_dir() {
                    path.join(INDEX_FILE)
                } else {
                    path.clone()
                };
                fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read search index at {}", path.display()))
            }
            Source::Url(url) => fetch_index(url, use_cache),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Path(path) => write!(f, "{}", path.display()),
            Source::Url(url) => f.write_str(url),
        }
    }
}

impl FromStr for Source {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_path() {
        let source = Source::parse("target/doc/search-index.js").unwrap();
        assert_eq!(
            source,
            Source::Path(PathBuf::from("target/doc/search-index.js"))
        );
    }

    #[test]
    fn test_parse_url() {
        let source = Source::parse("https://example.org/doc/search-index.js").unwrap();
        assert_eq!(
            source,
            Source::Url("https://example.org/doc/search-index.js".to_string())
        );
    }

    #[test]
    fn test_parse_url_directory() {
        let source = Source::parse("HTTP://example.org/doc/").unwrap();
        assert_eq!(
            source,
            Source::Url("HTTP://example.org/doc/search-index.js".to_string())
        );
    }

    #[test]
    fn test_parse_empty_fails() {
        let err = Source::parse("  ").unwrap_err();
        assert_eq!(err.to_string(), "Index source cannot be empty");
    }

    #[test]
    fn test_parse_url_without_host_fails() {
        let err = Source::parse("https://").unwrap_err();
        assert_eq!(err.to_string(), "URL has no host after 'https://'");
    }

    #[test]
    fn test_read_directory_appends_file_name() {
        let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../searchindex/tests/fixtures");
        let text = Source::Path(dir).read(true).unwrap();
        assert!(text.starts_with("var searchIndex = {};"));
    }

    #[test]
    fn test_read_missing_file() {
        let err = Source::Path(PathBuf::from("/no/such/dir/search-index.js"))
            .read(true)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to read search index at /no/such/dir/search-index.js"
        );
    }
}
