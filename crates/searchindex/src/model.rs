use std::fmt;

use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, SerializeTuple, Serializer};
use serde::{Deserialize, Serialize};

use crate::kind::ItemKind;

/// A type mentioned in a signature. Names are stored lowercased, as emitted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeRef {
    pub name: String,
}

impl TypeRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Signature descriptor of a function or method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    #[serde(default)]
    pub inputs: Vec<TypeRef>,
    #[serde(default)]
    pub output: Option<TypeRef>,
}

impl Signature {
    pub fn new<'s>(inputs: impl IntoIterator<Item = &'s str>, output: Option<&str>) -> Self {
        Self {
            inputs: inputs.into_iter().map(TypeRef::new).collect(),
            output: output.map(TypeRef::new),
        }
    }

    /// Whether any input type is named `name` (case-insensitive).
    pub fn has_input(&self, name: &str) -> bool {
        self.inputs.iter().any(|t| t.name.eq_ignore_ascii_case(name))
    }

    pub fn returns(&self, name: &str) -> bool {
        self.output
            .as_ref()
            .is_some_and(|t| t.name.eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inputs = self
            .inputs
            .iter()
            .map(|t| t.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "({})", inputs)?;
        if let Some(output) = &self.output {
            write!(f, " -> {}", output.name)?;
        }
        Ok(())
    }
}

/// One documented symbol.
///
/// On the wire this is the positional tuple
/// `[kind, name, path, summary, owner, signature]`; the trailing signature
/// is optional when reading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexItem {
    pub kind: ItemKind,
    pub name: String,
    /// Module path, or empty when it equals the previous item's path.
    pub path: String,
    pub summary: Option<String>,
    /// Position in the crate's `paths` of the owning type or trait.
    pub owner: Option<usize>,
    pub signature: Option<Signature>,
}

impl IndexItem {
    pub fn has_docs(&self) -> bool {
        self.summary.as_deref().is_some_and(|s| !s.trim().is_empty())
    }
}

impl Serialize for IndexItem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(6)?;
        tuple.serialize_element(&self.kind)?;
        tuple.serialize_element(&self.name)?;
        tuple.serialize_element(&self.path)?;
        tuple.serialize_element(&self.summary)?;
        tuple.serialize_element(&self.owner)?;
        tuple.serialize_element(&self.signature)?;
        tuple.end()
    }
}

impl<'de> Deserialize<'de> for IndexItem {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ItemVisitor;

        impl<'de> Visitor<'de> for ItemVisitor {
            type Value = IndexItem;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an item tuple [kind, name, path, summary, owner, signature]")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<IndexItem, A::Error> {
                let kind = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                let name = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(1, &self))?;
                let path = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(2, &self))?;
                let summary = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(3, &self))?;
                let owner = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(4, &self))?;
                // Older emitters stop after the owner index.
                let signature = seq.next_element::<Option<Signature>>()?.flatten();

                Ok(IndexItem {
                    kind,
                    name,
                    path,
                    summary,
                    owner,
                    signature,
                })
            }
        }

        deserializer.deserialize_seq(ItemVisitor)
    }
}

/// Entry of the `paths` lookup table: a type or trait that owns items.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(ItemKind, String)", into = "(ItemKind, String)")]
pub struct PathEntry {
    pub kind: ItemKind,
    pub name: String,
}

impl PathEntry {
    pub fn new(kind: ItemKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }
}

impl From<(ItemKind, String)> for PathEntry {
    fn from((kind, name): (ItemKind, String)) -> Self {
        Self { kind, name }
    }
}

impl From<PathEntry> for (ItemKind, String) {
    fn from(entry: PathEntry) -> Self {
        (entry.kind, entry.name)
    }
}

/// The table registered for a single crate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrateIndex {
    pub items: Vec<IndexItem>,
    pub paths: Vec<PathEntry>,
}

impl CrateIndex {
    /// The `paths` entry owning `item`, if its owner index resolves.
    pub fn owner_of(&self, item: &IndexItem) -> Option<&PathEntry> {
        item.owner.and_then(|owner| self.paths.get(owner))
    }
}

/// The whole search index: crate name to table, in registration order.
///
/// Immutable once built. Construct it with [`crate::SearchIndexBuilder`] or
/// [`crate::parse`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchIndex {
    crates: Vec<(String, CrateIndex)>,
}

impl SearchIndex {
    pub(crate) fn from_parts(crates: Vec<(String, CrateIndex)>) -> Self {
        Self { crates }
    }

    /// Registered crates in registration order.
    pub fn crates(&self) -> impl ExactSizeIterator<Item = (&str, &CrateIndex)> {
        self.crates.iter().map(|(name, index)| (name.as_str(), index))
    }

    pub fn crate_names(&self) -> impl Iterator<Item = &str> {
        self.crates.iter().map(|(name, _)| name.as_str())
    }

    pub fn get(&self, name: &str) -> Option<&CrateIndex> {
        self.crates
            .iter()
            .find(|(crate_name, _)| crate_name == name)
            .map(|(_, index)| index)
    }

    pub fn len(&self) -> usize {
        self.crates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.crates.is_empty()
    }

    pub fn item_count(&self) -> usize {
        self.crates.iter().map(|(_, index)| index.items.len()).sum()
    }
}

impl Serialize for SearchIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.crates.len()))?;
        for (name, index) in &self.crates {
            map.serialize_entry(name, index)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for SearchIndex {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TableVisitor;

        impl<'de> Visitor<'de> for TableVisitor {
            type Value = SearchIndex;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of crate names to search tables")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<SearchIndex, A::Error> {
                let mut crates: Vec<(String, CrateIndex)> = Vec::new();
                while let Some((name, index)) = map.next_entry::<String, CrateIndex>()? {
                    if crates.iter().any(|(existing, _)| *existing == name) {
                        return Err(de::Error::custom(format!(
                            "crate '{}' is registered more than once",
                            name
                        )));
                    }
                    crates.push((name, index));
                }
                Ok(SearchIndex { crates })
            }
        }

        deserializer.deserialize_map(TableVisitor)
    }
}
