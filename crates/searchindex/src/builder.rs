use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::kind::ItemKind;
use crate::model::{CrateIndex, IndexItem, PathEntry, SearchIndex, Signature};
use crate::validate::validate;

/// Populates the global table one crate at a time.
///
/// Each crate may be registered once. [`SearchIndexBuilder::build`] checks
/// the structural invariants and freezes the result.
#[derive(Debug, Default)]
pub struct SearchIndexBuilder {
    crates: Vec<(String, CrateIndex)>,
}

impl SearchIndexBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: impl Into<String>, index: CrateIndex) -> Result<&mut Self> {
        let name = name.into();
        if self.crates.iter().any(|(existing, _)| *existing == name) {
            return Err(Error::DuplicateCrate(name));
        }
        debug!(
            krate = %name,
            items = index.items.len(),
            paths = index.paths.len(),
            "registered crate"
        );
        self.crates.push((name, index));
        Ok(self)
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.crates.iter().any(|(existing, _)| existing == name)
    }

    /// Validate and freeze the table. Warnings are logged, errors reject it.
    pub fn build(self) -> Result<SearchIndex> {
        let index = self.build_unchecked();
        let report = validate(&index);
        for problem in report.warnings() {
            warn!("{}", problem);
        }
        if !report.is_ok() {
            return Err(Error::Invalid(report));
        }
        Ok(index)
    }

    /// Freeze the table without checking it, e.g. to report every problem later.
    pub fn build_unchecked(self) -> SearchIndex {
        SearchIndex::from_parts(self.crates)
    }
}

/// Builds one crate's table the way rustdoc emits it.
///
/// Owner types are interned into `paths`, and an item whose module path equals
/// the previous item's is stored with an empty path.
#[derive(Debug)]
pub struct CrateIndexBuilder {
    name: String,
    index: CrateIndex,
    last_path: Option<String>,
}

impl CrateIndexBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            index: CrateIndex::default(),
            last_path: None,
        }
    }

    /// Intern an owner type and return its position in `paths`.
    pub fn path(&mut self, kind: ItemKind, name: &str) -> usize {
        if let Some(pos) = self
            .index
            .paths
            .iter()
            .position(|entry| entry.kind == kind && entry.name == name)
        {
            return pos;
        }
        self.index.paths.push(PathEntry::new(kind, name));
        self.index.paths.len() - 1
    }

    pub fn item(
        &mut self,
        kind: ItemKind,
        name: &str,
        module_path: &str,
        summary: Option<&str>,
        owner: Option<usize>,
        signature: Option<Signature>,
    ) -> &mut Self {
        let path = if self.last_path.as_deref() == Some(module_path) {
            String::new()
        } else {
            self.last_path = Some(module_path.to_string());
            module_path.to_string()
        };
        self.index.items.push(IndexItem {
            kind,
            name: name.to_string(),
            path,
            summary: summary.map(str::to_string),
            owner,
            signature,
        });
        self
    }

    pub fn finish(self) -> (String, CrateIndex) {
        (self.name, self.index)
    }
}
