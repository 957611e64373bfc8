//! Generated artifact storage.
//!
//! Layout: `<root>/<contract_id>/contract.html`, with `contract.pdf` beside
//! it when a converter succeeded. Regeneration overwrites in place.

use std::path::{Path, PathBuf};

use contract_core_api::error::{CoreError, CoreResult};
use uuid::Uuid;

pub const HTML_FILE: &str = "contract.html";
pub const PDF_FILE: &str = "contract.pdf";

#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn contract_dir(&self, contract_id: Uuid) -> PathBuf {
        self.root.join(contract_id.to_string())
    }

    pub fn html_path(&self, contract_id: Uuid) -> PathBuf {
        self.contract_dir(contract_id).join(HTML_FILE)
    }

    pub fn pdf_path(&self, contract_id: Uuid) -> PathBuf {
        self.contract_dir(contract_id).join(PDF_FILE)
    }

    /// Write the HTML artifact, creating the contract's directory on first
    /// use, and return where it landed.
    pub fn write_html(&self, contract_id: Uuid, html: &str) -> CoreResult<PathBuf> {
        let dir = self.contract_dir(contract_id);
        std::fs::create_dir_all(&dir).map_err(|e| {
            CoreError::Storage(format!(
                "could not create artifact directory {}: {e}",
                dir.display()
            ))
        })?;

        let path = dir.join(HTML_FILE);
        std::fs::write(&path, html)
            .map_err(|e| CoreError::Storage(format!("could not write {}: {e}", path.display())))?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_html_creates_the_contract_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path());
        let contract_id = Uuid::new_v4();

        let path = store.write_html(contract_id, "<html></html>").unwrap();

        assert_eq!(path, dir.path().join(contract_id.to_string()).join(HTML_FILE));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<html></html>");
    }

    #[test]
    fn artifact_paths_share_the_contract_directory() {
        let store = ArtifactStore::new("/var/lib/contracts");
        let contract_id = Uuid::new_v4();

        assert_eq!(
            store.html_path(contract_id).parent(),
            store.pdf_path(contract_id).parent()
        );
    }

    #[test]
    fn regeneration_overwrites_the_previous_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path());
        let contract_id = Uuid::new_v4();

        store.write_html(contract_id, "first").unwrap();
        let path = store.write_html(contract_id, "second").unwrap();

        assert_eq!(std::fs::read_to_string(path).unwrap(), "second");
    }
}
