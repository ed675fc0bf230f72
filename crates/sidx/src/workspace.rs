use anyhow::{Context, Result};
use cargo_metadata::{Metadata, MetadataCommand};
use std::env;
use std::path::PathBuf;

use crate::source::INDEX_FILE;

/// The cargo workspace around the current directory, used to locate the
/// index rustdoc writes by default.
pub struct Workspace {
    metadata: Metadata,
}

impl Workspace {
    /// Find the nearest Cargo.toml and load its metadata.
    pub fn discover() -> Result<Self> {
        let manifest_path = Self::find_cargo_toml()
            .context("No Cargo.toml found in current directory or parent directories")?;

        let metadata = MetadataCommand::new()
            .manifest_path(&manifest_path)
            .no_deps()
            .exec()
            .context("Failed to execute cargo metadata")?;

        Ok(Self { metadata })
    }

    fn find_cargo_toml() -> Option<PathBuf> {
        let mut current_dir = env::current_dir().ok()?;

        loop {
            let manifest_path = current_dir.join("Cargo.toml");
            if manifest_path.exists() {
                return Some(manifest_path);
            }

            if !current_dir.pop() {
                return None;
            }
        }
    }

    /// `<target dir>/doc/search-index.js`, whether or not it exists yet.
    pub fn index_path(&self) -> PathBuf {
        self.metadata
            .target_directory
            .join("doc")
            .join(INDEX_FILE)
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_cargo_toml_in_current_project() {
        let path = Workspace::find_cargo_toml().unwrap();
        assert!(path.exists());
        assert!(path.ends_with("Cargo.toml"));
    }

    #[test]
    fn test_index_path_is_under_target_doc() {
        let workspace = Workspace::discover().unwrap();
        let path = workspace.index_path();
        assert!(path.ends_with("doc/search-index.js"));
    }
}
