use std::sync::Arc;

use searchindex::{ResolvedItem, SearchConsumer, SearchIndex, resolve, resolve_all};

/// The CLI's view of a loaded table: receives it once through
/// [`SearchConsumer`] and answers lookups from then on.
#[derive(Default)]
pub struct Catalog {
    index: Option<Arc<SearchIndex>>,
}

impl SearchConsumer for Catalog {
    fn init_search(&mut self, index: Arc<SearchIndex>) {
        tracing::debug!(crates = index.len(), "catalog initialised");
        self.index = Some(index);
    }
}

impl Catalog {
    pub fn index(&self) -> Option<&SearchIndex> {
        self.index.as_deref()
    }

    /// Resolved items, optionally restricted to one crate.
    pub fn items(&self, krate: Option<&str>) -> Vec<ResolvedItem<'_>> {
        let Some(index) = self.index() else {
            return Vec::new();
        };
        match krate {
            Some(name) => index
                .crates()
                .find(|(key, _)| *key == name)
                .map(|(key, crate_index)| resolve(key, crate_index))
                .unwrap_or_default(),
            None => resolve_all(index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use searchindex::{hand_off, parse};

    const INDEX: &str = r#"var searchIndex = {};
searchIndex['a'] = {"items":[[0,"a","",null,null],[3,"Thing","a",null,null]],"paths":[]};
searchIndex['b'] = {"items":[[5,"run","b",null,null]],"paths":[]};
initSearch(searchIndex);
"#;

    #[test]
    fn empty_before_hand_off() {
        let catalog = Catalog::default();
        assert!(catalog.index().is_none());
        assert!(catalog.items(None).is_empty());
    }

    #[test]
    fn items_by_crate() {
        let mut catalog = Catalog::default();
        hand_off(parse(INDEX).unwrap(), &mut catalog);
        assert_eq!(catalog.items(None).len(), 3);
        let names: Vec<String> = catalog
            .items(Some("b"))
            .iter()
            .map(ResolvedItem::qualified_name)
            .collect();
        assert_eq!(names, ["b::run"]);
        assert!(catalog.items(Some("c")).is_empty());
    }
}
