use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Independently addressable text regions of a document.
///
/// Substitution always visits regions in this order: body, header, footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Body,
    Header,
    Footer,
}

impl Region {
    pub const ALL: [Region; 3] = [Region::Body, Region::Header, Region::Footer];
}

/// The textual content of a document: a body plus optional header and
/// footer. Doubles as the on-disk JSON format of the filesystem backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegionText {
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub header: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub footer: Option<String>,
}

impl RegionText {
    pub fn get(&self, region: Region) -> Option<&str> {
        match region {
            Region::Body => Some(&self.body),
            Region::Header => self.header.as_deref(),
            Region::Footer => self.footer.as_deref(),
        }
    }

    pub fn get_mut(&mut self, region: Region) -> Option<&mut String> {
        match region {
            Region::Body => Some(&mut self.body),
            Region::Header => self.header.as_mut(),
            Region::Footer => self.footer.as_mut(),
        }
    }
}

/// The document service: per-region text replacement on a working copy,
/// persistence, and PDF conversion. Working copies are addressed by the id
/// handed out by [`crate::file::FileStore::copy_template`].
pub trait DocumentStore {
    /// Regions present in the document. Body is always present; header and
    /// footer only when the template defines them.
    fn regions(&self, doc_id: &str) -> Result<Vec<Region>, StoreError>;

    /// Replace all literal occurrences of `needle` in one region.
    fn replace_text(
        &self,
        doc_id: &str,
        region: Region,
        needle: &str,
        replacement: &str,
    ) -> Result<(), StoreError>;

    /// Persist pending edits and end the editing session. Must be called
    /// before [`DocumentStore::export_pdf`].
    fn save_and_close(&self, doc_id: &str) -> Result<(), StoreError>;

    /// Convert the persisted document to PDF bytes.
    fn export_pdf(&self, doc_id: &str) -> Result<Vec<u8>, StoreError>;
}
