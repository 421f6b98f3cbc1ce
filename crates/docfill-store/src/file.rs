use crate::error::StoreError;

/// A file created in a destination folder.
#[derive(Debug, Clone)]
pub struct StoredFile {
    pub id: String,
    pub name: String,
    pub url: String,
}

/// The file service: template copies, name-existence checks, PDF writes,
/// and trashing, all scoped to folder-like collections.
///
/// Name uniqueness is only ever checked here, at resolution time; there is
/// no atomic reserve-and-create.
pub trait FileStore {
    fn folder_exists(&self, folder_id: &str) -> Result<bool, StoreError>;

    fn template_exists(&self, template_id: &str) -> Result<bool, StoreError>;

    /// Whether any live (non-trashed) file in the folder carries `name`.
    fn name_exists(&self, folder_id: &str, name: &str) -> Result<bool, StoreError>;

    /// Copy the template into the folder under `name`, returning the
    /// working copy's handle.
    fn copy_template(
        &self,
        template_id: &str,
        folder_id: &str,
        name: &str,
    ) -> Result<StoredFile, StoreError>;

    /// Create a PDF file in the folder under `name`.
    fn write_pdf(
        &self,
        folder_id: &str,
        name: &str,
        bytes: &[u8],
    ) -> Result<StoredFile, StoreError>;

    /// Move a file to the trash. Trashed files no longer count for
    /// [`FileStore::name_exists`].
    fn trash(&self, file_id: &str) -> Result<(), StoreError>;
}
