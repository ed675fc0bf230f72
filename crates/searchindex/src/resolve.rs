use tracing::debug;

use crate::kind::ItemKind;
use crate::model::{CrateIndex, PathEntry, SearchIndex, Signature};

/// An item with its compressed path and owner index expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedItem<'a> {
    pub krate: &'a str,
    /// Position in the crate's `items`.
    pub position: usize,
    pub kind: ItemKind,
    pub name: &'a str,
    pub module_path: &'a str,
    pub owner: Option<&'a PathEntry>,
    pub summary: Option<&'a str>,
    pub signature: Option<&'a Signature>,
}

impl<'a> ResolvedItem<'a> {
    /// Path segments from the crate root down to the item itself.
    pub fn segments(&self) -> Vec<&'a str> {
        let mut segments: Vec<&'a str> = self.module_path.split("::").collect();
        if let Some(owner) = self.owner {
            segments.push(&owner.name);
        }
        segments.push(self.name);
        segments
    }

    /// `module::Owner::name`
    pub fn qualified_name(&self) -> String {
        self.segments().join("::")
    }

    /// Everything before the last segment.
    pub fn parent_path(&self) -> String {
        let segments = self.segments();
        segments[..segments.len() - 1].join("::")
    }

    pub fn has_docs(&self) -> bool {
        self.summary.is_some_and(|s| !s.trim().is_empty())
    }
}

/// Expand one crate's table.
///
/// An empty item path repeats the previous item's path; before any path has
/// been seen it means the crate root. Owner indexes that do not resolve are
/// dropped here and reported by [`crate::validate`].
pub fn resolve<'a>(krate: &'a str, index: &'a CrateIndex) -> Vec<ResolvedItem<'a>> {
    let mut current: &'a str = krate;
    index
        .items
        .iter()
        .enumerate()
        .map(|(position, item)| {
            if !item.path.is_empty() {
                current = &item.path;
            }
            let owner = index.owner_of(item);
            if owner.is_none() && item.owner.is_some() {
                debug!(krate, item = %item.name, owner = ?item.owner, "dangling owner index");
            }
            ResolvedItem {
                krate,
                position,
                kind: item.kind,
                name: &item.name,
                module_path: current,
                owner,
                summary: item.summary.as_deref(),
                signature: item.signature.as_ref(),
            }
        })
        .collect()
}

/// Expand every crate, in registration order.
pub fn resolve_all(index: &SearchIndex) -> Vec<ResolvedItem<'_>> {
    index
        .crates()
        .flat_map(|(name, krate)| resolve(name, krate))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{CRATE, fixture};

    fn qualified(index: &SearchIndex) -> Vec<String> {
        resolve_all(index)
            .iter()
            .map(ResolvedItem::qualified_name)
            .collect()
    }

    #[test]
    fn first_items_use_explicit_paths() {
        let index = fixture();
        let names = qualified(&index);
        assert_eq!(names[0], format!("{CRATE}::create_ensemble"));
        assert_eq!(names[1], format!("{CRATE}::material"));
    }

    #[test]
    fn empty_paths_inherit_previous() {
        let index = fixture();
        let names = qualified(&index);
        assert!(names.contains(&format!("{CRATE}::material::BrillouinZone")));
        assert!(names.contains(&format!("{CRATE}::material::BrillouinZone::dual_basis")));
        assert!(names.contains(&format!("{CRATE}::material::Material::momentums")));
        assert!(names.contains(&format!("{CRATE}::particle::Particle::run")));
        assert!(names.contains(&format!("{CRATE}::stats::MeanStd::Output")));
        assert!(names.contains(&format!("{CRATE}::probability::probability")));
    }

    #[test]
    fn owner_and_parent() {
        let index = fixture();
        let items = resolve_all(&index);
        let pmax = items.iter().find(|i| i.name == "pmax").unwrap();
        assert_eq!(pmax.kind, ItemKind::Method);
        assert_eq!(pmax.owner.map(|o| o.name.as_str()), Some("BrillouinZone"));
        assert_eq!(pmax.parent_path(), format!("{CRATE}::material::BrillouinZone"));
        assert!(pmax.has_docs());
    }

    #[test]
    fn leading_empty_path_is_crate_root() {
        let krate = CrateIndex {
            items: vec![crate::IndexItem {
                kind: ItemKind::Function,
                name: "go".to_string(),
                path: String::new(),
                summary: None,
                owner: Some(4),
                signature: None,
            }],
            paths: vec![],
        };
        let items = resolve("root", &krate);
        assert_eq!(items[0].qualified_name(), "root::go");
        assert_eq!(items[0].owner, None);
        assert_eq!(items[0].segments(), ["root", "go"]);
    }
}
