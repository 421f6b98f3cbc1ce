//! Filesystem drive: folders are directories under a root, documents are
//! JSON region files, PDF export produces real PDF bytes.
//!
//! Ids (template, folder, file) are paths relative to the root. There is
//! no trash on a plain filesystem, so [`FileStore::trash`] deletes.

use std::fs;
use std::path::{Path, PathBuf};

use crate::document::{DocumentStore, Region, RegionText};
use crate::error::StoreError;
use crate::file::{FileStore, StoredFile};
use crate::pdf;

pub struct FsDrive {
    root: PathBuf,
}

impl FsDrive {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, id: &str) -> PathBuf {
        self.root.join(id)
    }

    fn read_regions(&self, id: &str) -> Result<RegionText, StoreError> {
        let path = self.resolve(id);
        if !path.is_file() {
            return Err(StoreError::NotFound {
                name: id.to_string(),
            });
        }
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    fn write_regions(&self, id: &str, text: &RegionText) -> Result<(), StoreError> {
        let raw = serde_json::to_string_pretty(text)?;
        fs::write(self.resolve(id), raw)?;
        Ok(())
    }

    fn file_url(&self, path: &Path) -> String {
        let absolute = path
            .canonicalize()
            .unwrap_or_else(|_| path.to_path_buf());
        format!("file://{}", absolute.display())
    }
}

impl FileStore for FsDrive {
    fn folder_exists(&self, folder_id: &str) -> Result<bool, StoreError> {
        Ok(self.resolve(folder_id).is_dir())
    }

    fn template_exists(&self, template_id: &str) -> Result<bool, StoreError> {
        Ok(self.resolve(template_id).is_file())
    }

    fn name_exists(&self, folder_id: &str, name: &str) -> Result<bool, StoreError> {
        let folder = self.resolve(folder_id);
        if !folder.is_dir() {
            return Err(StoreError::List(format!("no such folder: {folder_id}")));
        }
        Ok(folder.join(name).exists())
    }

    fn copy_template(
        &self,
        template_id: &str,
        folder_id: &str,
        name: &str,
    ) -> Result<StoredFile, StoreError> {
        let text = self.read_regions(template_id)?;
        let id = format!("{folder_id}/{name}");
        self.write_regions(&id, &text)
            .map_err(|e| StoreError::Copy(e.to_string()))?;
        tracing::debug!("copied {template_id} to {id}");
        Ok(StoredFile {
            url: self.file_url(&self.resolve(&id)),
            name: name.to_string(),
            id,
        })
    }

    fn write_pdf(
        &self,
        folder_id: &str,
        name: &str,
        bytes: &[u8],
    ) -> Result<StoredFile, StoreError> {
        let id = format!("{folder_id}/{name}");
        fs::write(self.resolve(&id), bytes).map_err(|e| StoreError::Write(e.to_string()))?;
        Ok(StoredFile {
            url: self.file_url(&self.resolve(&id)),
            name: name.to_string(),
            id,
        })
    }

    fn trash(&self, file_id: &str) -> Result<(), StoreError> {
        let path = self.resolve(file_id);
        if !path.is_file() {
            return Err(StoreError::NotFound {
                name: file_id.to_string(),
            });
        }
        tracing::debug!("deleting {file_id}");
        fs::remove_file(path).map_err(|e| StoreError::Trash(e.to_string()))
    }
}

impl DocumentStore for FsDrive {
    fn regions(&self, doc_id: &str) -> Result<Vec<Region>, StoreError> {
        let text = self.read_regions(doc_id)?;
        Ok(Region::ALL
            .into_iter()
            .filter(|r| text.get(*r).is_some())
            .collect())
    }

    fn replace_text(
        &self,
        doc_id: &str,
        region: Region,
        needle: &str,
        replacement: &str,
    ) -> Result<(), StoreError> {
        let mut text = self.read_regions(doc_id)?;
        if let Some(content) = text.get_mut(region) {
            *content = content.replace(needle, replacement);
        }
        self.write_regions(doc_id, &text)
            .map_err(|e| StoreError::Replace(e.to_string()))
    }

    fn save_and_close(&self, _doc_id: &str) -> Result<(), StoreError> {
        // edits are write-through on this backend; nothing is buffered
        Ok(())
    }

    fn export_pdf(&self, doc_id: &str) -> Result<Vec<u8>, StoreError> {
        let text = self.read_regions(doc_id)?;
        pdf::render(&text)
    }
}
