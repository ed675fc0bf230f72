use std::cmp::Ordering;

use crate::error::{Error, Result};
use crate::kind::ItemKind;
use crate::resolve::ResolvedItem;

/// What a query looks for, after the optional `kind:` filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Empty query: every item (subject to the kind filter).
    All,
    /// Case-insensitive substring of the item name.
    Name(String),
    /// `a::b::name`: the name matches exactly, `a::b` appears contiguously
    /// in the parent path.
    Path { parents: Vec<String>, name: String },
    /// `in1, in2 -> out`: signature inputs contain every listed type and the
    /// output matches. Either side may be empty.
    Signature {
        inputs: Vec<String>,
        output: Option<String>,
    },
}

/// A parsed search query, e.g. `fn:probability`, `material::energy` or
/// `material, point -> f64`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub kind: Option<ItemKind>,
    pub target: Target,
}

impl Query {
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        let (kind, rest) = match split_kind_filter(input) {
            Some((filter, rest)) => {
                let kind = filter.parse::<ItemKind>().map_err(|reason| Error::Query {
                    query: input.to_string(),
                    reason,
                })?;
                (Some(kind), rest.trim())
            }
            None => (None, input),
        };

        let target = if let Some((inputs, output)) = rest.split_once("->") {
            let inputs: Vec<String> = inputs
                .split(',')
                .map(|t| t.trim().to_lowercase())
                .filter(|t| !t.is_empty())
                .collect();
            let output = Some(output.trim().to_lowercase()).filter(|t| !t.is_empty());
            if inputs.is_empty() && output.is_none() {
                return Err(Error::Query {
                    query: input.to_string(),
                    reason: "signature query names no types".to_string(),
                });
            }
            Target::Signature { inputs, output }
        } else if rest.contains("::") {
            let mut parts: Vec<String> = rest
                .split("::")
                .map(|p| p.trim().to_lowercase())
                .filter(|p| !p.is_empty())
                .collect();
            match parts.pop() {
                Some(name) => Target::Path {
                    parents: parts,
                    name,
                },
                None => Target::All,
            }
        } else if rest.is_empty() {
            Target::All
        } else {
            Target::Name(rest.to_lowercase())
        };

        Ok(Self { kind, target })
    }

    pub fn matches(&self, item: &ResolvedItem<'_>) -> bool {
        if self.kind.is_some_and(|kind| kind != item.kind) {
            return false;
        }
        self.rank(item).is_some()
    }

    /// Lower is better; `None` means no match. Ignores the kind filter.
    fn rank(&self, item: &ResolvedItem<'_>) -> Option<u8> {
        match &self.target {
            Target::All => Some(0),
            Target::Name(query) => {
                let name = item.name.to_lowercase();
                if name == *query {
                    Some(0)
                } else if name.starts_with(query.as_str()) {
                    Some(1)
                } else if name.contains(query.as_str()) {
                    Some(2)
                } else {
                    None
                }
            }
            Target::Path { parents, name } => {
                if !item.name.eq_ignore_ascii_case(name) {
                    return None;
                }
                if parents.is_empty() {
                    return Some(0);
                }
                let segments: Vec<String> = item
                    .segments()
                    .iter()
                    .map(|s| s.to_lowercase())
                    .collect();
                let parent_segments = &segments[..segments.len() - 1];
                parent_segments
                    .windows(parents.len())
                    .any(|window| window == parents.as_slice())
                    .then_some(0)
            }
            Target::Signature { inputs, output } => {
                let signature = item.signature?;
                let inputs_match = inputs.iter().all(|t| signature.has_input(t));
                let output_match = output.as_deref().is_none_or(|t| signature.returns(t));
                (inputs_match && output_match).then_some(0)
            }
        }
    }
}

/// Split a leading `kind:` filter, leaving `a::b` paths alone.
fn split_kind_filter(input: &str) -> Option<(&str, &str)> {
    let colon = input.find(':')?;
    if input[colon..].starts_with("::") {
        return None;
    }
    let filter = &input[..colon];
    if filter.is_empty() || !filter.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    Some((filter, &input[colon + 1..]))
}

/// Run `query` over resolved items.
///
/// Results are ordered by match quality (exact name, prefix, substring), then
/// by kind code, then by qualified name, so output is deterministic.
pub fn search<'a>(items: &[ResolvedItem<'a>], query: &Query) -> Vec<ResolvedItem<'a>> {
    let mut hits: Vec<(u8, String, ResolvedItem<'a>)> = items
        .iter()
        .filter(|item| query.kind.is_none_or(|kind| kind == item.kind))
        .filter_map(|item| {
            query
                .rank(item)
                .map(|rank| (rank, item.qualified_name(), *item))
        })
        .collect();

    hits.sort_by(|(rank_a, name_a, a), (rank_b, name_b, b)| {
        let ord = rank_a.cmp(rank_b).then_with(|| a.kind.cmp(&b.kind));
        if ord != Ordering::Equal {
            return ord;
        }
        name_a.cmp(name_b)
    });

    hits.into_iter().map(|(_, _, item)| item).collect()
}
