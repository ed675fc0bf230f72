use std::collections::BTreeMap;

use crate::kind::ItemKind;
use crate::model::{CrateIndex, SearchIndex};

/// Statistics for a single crate
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct CrateStats {
    pub items: usize,
    pub paths: usize,
    pub documented: usize,
    pub with_signature: usize,
}

/// Aggregate statistics across all registered crates
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct IndexStats {
    pub crates: usize,
    pub items: usize,
    pub paths: usize,
    pub documented: usize,
    pub with_signature: usize,
    pub per_kind: BTreeMap<ItemKind, usize>,
    pub per_crate: BTreeMap<String, CrateStats>,
}

impl IndexStats {
    pub fn collect(index: &SearchIndex) -> Self {
        let mut stats = IndexStats::default();
        for (name, krate) in index.crates() {
            let crate_stats = Self::collect_crate(krate, &mut stats.per_kind);
            stats.crates += 1;
            stats.items += crate_stats.items;
            stats.paths += crate_stats.paths;
            stats.documented += crate_stats.documented;
            stats.with_signature += crate_stats.with_signature;
            stats.per_crate.insert(name.to_string(), crate_stats);
        }
        stats
    }

    fn collect_crate(krate: &CrateIndex, per_kind: &mut BTreeMap<ItemKind, usize>) -> CrateStats {
        for item in &krate.items {
            *per_kind.entry(item.kind).or_default() += 1;
        }
        CrateStats {
            items: krate.items.len(),
            paths: krate.paths.len(),
            documented: krate.items.iter().filter(|i| i.has_docs()).count(),
            with_signature: krate.items.iter().filter(|i| i.signature.is_some()).count(),
        }
    }

    /// Share of items with a non-empty summary, in `0.0..=1.0`.
    pub fn documented_ratio(&self) -> f64 {
        if self.items == 0 {
            return 0.0;
        }
        self.documented as f64 / self.items as f64
    }
}
