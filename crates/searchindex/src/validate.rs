use std::fmt;

use crate::kind::ItemKind;
use crate::model::{CrateIndex, SearchIndex};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Warning,
    Error,
}

/// A structural problem found in the table. `item` and `path` are positions
/// in the crate's `items` and `paths` sequences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Problem {
    OwnerOutOfRange {
        krate: String,
        item: usize,
        name: String,
        owner: usize,
        paths_len: usize,
    },
    EmptyName {
        krate: String,
        item: usize,
    },
    OwnerIsNotType {
        krate: String,
        item: usize,
        name: String,
        owner: usize,
        owner_kind: ItemKind,
    },
    OrphanMember {
        krate: String,
        item: usize,
        name: String,
        kind: ItemKind,
    },
    UnusedPath {
        krate: String,
        path: usize,
        name: String,
    },
}

impl Problem {
    pub fn severity(&self) -> Severity {
        match self {
            Problem::OwnerOutOfRange { .. } | Problem::EmptyName { .. } => Severity::Error,
            Problem::OwnerIsNotType { .. }
            | Problem::OrphanMember { .. }
            | Problem::UnusedPath { .. } => Severity::Warning,
        }
    }

    pub fn krate(&self) -> &str {
        match self {
            Problem::OwnerOutOfRange { krate, .. }
            | Problem::EmptyName { krate, .. }
            | Problem::OwnerIsNotType { krate, .. }
            | Problem::OrphanMember { krate, .. }
            | Problem::UnusedPath { krate, .. } => krate,
        }
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Problem::OwnerOutOfRange {
                krate,
                item,
                name,
                owner,
                paths_len,
            } => write!(
                f,
                "{krate}: item #{item} `{name}` refers to owner {owner}, but paths has {paths_len} entries"
            ),
            Problem::EmptyName { krate, item } => write!(f, "{krate}: item #{item} has an empty name"),
            Problem::OwnerIsNotType {
                krate,
                item,
                name,
                owner,
                owner_kind,
            } => write!(
                f,
                "{krate}: item #{item} `{name}` is owned by paths[{owner}], a {owner_kind}"
            ),
            Problem::OrphanMember {
                krate,
                item,
                name,
                kind,
            } => write!(f, "{krate}: {kind} #{item} `{name}` has no owner"),
            Problem::UnusedPath { krate, path, name } => {
                write!(f, "{krate}: paths[{path}] `{name}` is never referenced")
            }
        }
    }
}

/// Outcome of [`validate`]: every problem found, in table order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    problems: Vec<Problem>,
}

impl Report {
    /// True when no problem is an error. Warnings are allowed.
    pub fn is_ok(&self) -> bool {
        self.error_count() == 0
    }

    pub fn problems(&self) -> &[Problem] {
        &self.problems
    }

    pub fn errors(&self) -> impl Iterator<Item = &Problem> {
        self.problems
            .iter()
            .filter(|p| p.severity() == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Problem> {
        self.problems
            .iter()
            .filter(|p| p.severity() == Severity::Warning)
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for problem in &self.problems {
            let label = match problem.severity() {
                Severity::Error => "error",
                Severity::Warning => "warning",
            };
            writeln!(f, "{}: {}", label, problem)?;
        }
        Ok(())
    }
}

/// Check every crate table for referential integrity and related invariants.
pub fn validate(index: &SearchIndex) -> Report {
    let mut problems = Vec::new();
    for (name, krate) in index.crates() {
        validate_crate(name, krate, &mut problems);
    }
    Report { problems }
}

fn validate_crate(name: &str, krate: &CrateIndex, problems: &mut Vec<Problem>) {
    let mut referenced = vec![false; krate.paths.len()];

    for (i, item) in krate.items.iter().enumerate() {
        if item.name.trim().is_empty() {
            problems.push(Problem::EmptyName {
                krate: name.to_string(),
                item: i,
            });
        }

        match item.owner {
            Some(owner) => match krate.paths.get(owner) {
                Some(entry) => {
                    referenced[owner] = true;
                    if !entry.kind.is_type_like() {
                        problems.push(Problem::OwnerIsNotType {
                            krate: name.to_string(),
                            item: i,
                            name: item.name.clone(),
                            owner,
                            owner_kind: entry.kind,
                        });
                    }
                }
                None => problems.push(Problem::OwnerOutOfRange {
                    krate: name.to_string(),
                    item: i,
                    name: item.name.clone(),
                    owner,
                    paths_len: krate.paths.len(),
                }),
            },
            None if item.kind.is_member() => problems.push(Problem::OrphanMember {
                krate: name.to_string(),
                item: i,
                name: item.name.clone(),
                kind: item.kind,
            }),
            None => {}
        }
    }

    for (path, used) in referenced.into_iter().enumerate() {
        if !used {
            problems.push(Problem::UnusedPath {
                krate: name.to_string(),
                path,
                name: krate.paths[path].name.clone(),
            });
        }
    }
}
