//! In-memory drive: the test double for the file and document services.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use uuid::Uuid;

use crate::document::{DocumentStore, Region, RegionText};
use crate::error::StoreError;
use crate::file::{FileStore, StoredFile};

#[derive(Default)]
struct FileEntry {
    id: String,
    name: String,
    bytes: Vec<u8>,
    trashed: bool,
}

#[derive(Default)]
struct DocEntry {
    text: RegionText,
    closed: bool,
}

#[derive(Default)]
struct Inner {
    templates: HashMap<String, RegionText>,
    documents: HashMap<String, DocEntry>,
    folders: HashMap<String, Vec<FileEntry>>,
}

/// An in-memory file/document service.
///
/// Folders and templates are registered up front; everything else behaves
/// like the real services: copies land in a folder and count toward name
/// collisions, trashed files stop counting, exports require a closed
/// document.
#[derive(Default)]
pub struct MemoryDrive {
    inner: Mutex<Inner>,
}

impl MemoryDrive {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn add_folder(&self, folder_id: impl Into<String>) {
        self.lock().folders.insert(folder_id.into(), Vec::new());
    }

    pub fn add_template(&self, template_id: impl Into<String>, text: RegionText) {
        self.lock().templates.insert(template_id.into(), text);
    }

    /// Names of live files in a folder, in creation order.
    pub fn file_names(&self, folder_id: &str) -> Vec<String> {
        let inner = self.lock();
        inner
            .folders
            .get(folder_id)
            .map(|files| {
                files
                    .iter()
                    .filter(|f| !f.trashed)
                    .map(|f| f.name.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn file_bytes(&self, folder_id: &str, name: &str) -> Option<Vec<u8>> {
        let inner = self.lock();
        inner.folders.get(folder_id).and_then(|files| {
            files
                .iter()
                .find(|f| !f.trashed && f.name == name)
                .map(|f| f.bytes.clone())
        })
    }

    /// Id of the live file carrying `name`, if any.
    pub fn file_id(&self, folder_id: &str, name: &str) -> Option<String> {
        let inner = self.lock();
        inner.folders.get(folder_id).and_then(|files| {
            files
                .iter()
                .find(|f| !f.trashed && f.name == name)
                .map(|f| f.id.clone())
        })
    }

    pub fn document_text(&self, doc_id: &str) -> Option<RegionText> {
        let inner = self.lock();
        inner.documents.get(doc_id).map(|d| d.text.clone())
    }

    pub fn is_trashed(&self, file_id: &str) -> bool {
        let inner = self.lock();
        inner
            .folders
            .values()
            .flatten()
            .any(|f| f.id == file_id && f.trashed)
    }
}

impl FileStore for MemoryDrive {
    fn folder_exists(&self, folder_id: &str) -> Result<bool, StoreError> {
        Ok(self.lock().folders.contains_key(folder_id))
    }

    fn template_exists(&self, template_id: &str) -> Result<bool, StoreError> {
        Ok(self.lock().templates.contains_key(template_id))
    }

    fn name_exists(&self, folder_id: &str, name: &str) -> Result<bool, StoreError> {
        let inner = self.lock();
        let files = inner.folders.get(folder_id).ok_or_else(|| StoreError::NotFound {
            name: folder_id.to_string(),
        })?;
        Ok(files.iter().any(|f| !f.trashed && f.name == name))
    }

    fn copy_template(
        &self,
        template_id: &str,
        folder_id: &str,
        name: &str,
    ) -> Result<StoredFile, StoreError> {
        let mut inner = self.lock();
        let text = inner
            .templates
            .get(template_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                name: template_id.to_string(),
            })?;

        let id = Uuid::new_v4().to_string();
        let entry = FileEntry {
            id: id.clone(),
            name: name.to_string(),
            bytes: Vec::new(),
            trashed: false,
        };
        inner
            .folders
            .get_mut(folder_id)
            .ok_or_else(|| StoreError::NotFound {
                name: folder_id.to_string(),
            })?
            .push(entry);
        inner.documents.insert(
            id.clone(),
            DocEntry {
                text,
                closed: false,
            },
        );

        Ok(StoredFile {
            url: format!("memory://doc/{id}"),
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
        let mut inner = self.lock();
        let id = Uuid::new_v4().to_string();
        inner
            .folders
            .get_mut(folder_id)
            .ok_or_else(|| StoreError::NotFound {
                name: folder_id.to_string(),
            })?
            .push(FileEntry {
                id: id.clone(),
                name: name.to_string(),
                bytes: bytes.to_vec(),
                trashed: false,
            });

        Ok(StoredFile {
            url: format!("memory://file/{id}"),
            name: name.to_string(),
            id,
        })
    }

    fn trash(&self, file_id: &str) -> Result<(), StoreError> {
        let mut inner = self.lock();
        for files in inner.folders.values_mut() {
            if let Some(file) = files.iter_mut().find(|f| f.id == file_id) {
                file.trashed = true;
                return Ok(());
            }
        }
        Err(StoreError::NotFound {
            name: file_id.to_string(),
        })
    }
}

impl DocumentStore for MemoryDrive {
    fn regions(&self, doc_id: &str) -> Result<Vec<Region>, StoreError> {
        let inner = self.lock();
        let doc = inner.documents.get(doc_id).ok_or_else(|| StoreError::NotFound {
            name: doc_id.to_string(),
        })?;
        Ok(Region::ALL
            .into_iter()
            .filter(|r| doc.text.get(*r).is_some())
            .collect())
    }

    fn replace_text(
        &self,
        doc_id: &str,
        region: Region,
        needle: &str,
        replacement: &str,
    ) -> Result<(), StoreError> {
        let mut inner = self.lock();
        let doc = inner
            .documents
            .get_mut(doc_id)
            .ok_or_else(|| StoreError::NotFound {
                name: doc_id.to_string(),
            })?;
        if doc.closed {
            return Err(StoreError::Replace(format!(
                "document {doc_id} is already closed"
            )));
        }
        if let Some(text) = doc.text.get_mut(region) {
            *text = text.replace(needle, replacement);
        }
        Ok(())
    }

    fn save_and_close(&self, doc_id: &str) -> Result<(), StoreError> {
        let mut inner = self.lock();
        let doc = inner
            .documents
            .get_mut(doc_id)
            .ok_or_else(|| StoreError::NotFound {
                name: doc_id.to_string(),
            })?;
        doc.closed = true;
        Ok(())
    }

    fn export_pdf(&self, doc_id: &str) -> Result<Vec<u8>, StoreError> {
        let inner = self.lock();
        let doc = inner.documents.get(doc_id).ok_or_else(|| StoreError::NotFound {
            name: doc_id.to_string(),
        })?;
        if !doc.closed {
            return Err(StoreError::Export(format!(
                "document {doc_id} has not been saved and closed"
            )));
        }
        crate::pdf::render(&doc.text)
    }
}
