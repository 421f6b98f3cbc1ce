//! The export pipeline, one synchronous pass per invocation.
//!
//! Steps run strictly in sequence: validate, locate, prepare, render,
//! export, link back, clean up. Link-back and cleanup are best-effort;
//! everything before them fails the run with the original message intact.
//! When export fails after the working copy was created and cleanup is
//! enabled, the copy is trashed before the error propagates.

use docfill_core::filename::resolve_unique_name;
use docfill_core::invocation::Invocation;
use docfill_core::placeholders::PlaceholderMap;
use docfill_locator::RecordSource;
use docfill_store::document::DocumentStore;
use docfill_store::error::StoreError;
use docfill_store::file::{FileStore, StoredFile};

use crate::error::ExportError;
use crate::naming;

/// Fill the configured template with the record matching the invocation's
/// key and export it as a uniquely named PDF in the destination folder.
///
/// Returns the final artifact's name (not its URL).
pub fn generate_pdf<S, D, F>(
    invocation: &Invocation,
    source: &S,
    documents: &D,
    files: &F,
) -> Result<String, ExportError>
where
    S: RecordSource,
    D: DocumentStore,
    F: FileStore,
{
    invocation.validate()?;

    let record = source.locate(&invocation.key_column, &invocation.record_key)?;
    tracing::info!(
        "located record {:?} with {} fields",
        record.key(),
        record.fields().len()
    );
    let placeholders = PlaceholderMap::from_record(&record);

    ensure_reachable(
        files.template_exists(&invocation.template_id),
        "template",
        &invocation.template_id,
    )?;
    ensure_reachable(
        files.folder_exists(&invocation.destination_folder_id),
        "destination folder",
        &invocation.destination_folder_id,
    )?;

    let desired = naming::working_copy_name(&invocation.filename_template, &placeholders);
    let temp_name = resolve_unique_name(&desired, |name| {
        files.name_exists(&invocation.destination_folder_id, name)
    });
    let working_copy = files
        .copy_template(
            &invocation.template_id,
            &invocation.destination_folder_id,
            &temp_name,
        )
        .map_err(ExportError::Render)?;
    tracing::info!("working copy created: {temp_name}");

    match render_and_export(invocation, &placeholders, documents, files, &working_copy.id) {
        Ok(exported) => {
            if let Some(link_column) = &invocation.link_column
                && let Err(e) = source.write_back(
                    &invocation.key_column,
                    &invocation.record_key,
                    link_column,
                    &exported.url,
                )
            {
                tracing::warn!("link-back to column {link_column:?} failed: {e}");
            }

            if invocation.delete_working_copy {
                trash_working_copy(files, &working_copy.id);
            }

            tracing::info!("exported {} ({})", exported.name, exported.url);
            Ok(exported.name)
        }
        Err(e) => {
            if invocation.delete_working_copy {
                trash_working_copy(files, &working_copy.id);
            }
            tracing::error!("pdf generation for key {:?} failed: {e}", invocation.record_key);
            Err(e)
        }
    }
}

fn render_and_export<D, F>(
    invocation: &Invocation,
    placeholders: &PlaceholderMap,
    documents: &D,
    files: &F,
    doc_id: &str,
) -> Result<StoredFile, ExportError>
where
    D: DocumentStore,
    F: FileStore,
{
    // outer loop over keys, inner loop over regions; one key's failure
    // must not abort the others
    let regions = documents.regions(doc_id).map_err(ExportError::Render)?;
    for (key, value) in placeholders.iter() {
        for region in &regions {
            if let Err(e) = documents.replace_text(doc_id, *region, key, value) {
                tracing::warn!("replacing {key:?} in {region:?} failed: {e}");
            }
        }
    }
    documents.save_and_close(doc_id).map_err(ExportError::Render)?;

    let bytes = documents.export_pdf(doc_id).map_err(ExportError::Export)?;
    let desired = naming::final_pdf_name(
        &invocation.filename_template,
        placeholders,
        &invocation.record_key,
    );
    let final_name = resolve_unique_name(&desired, |name| {
        files.name_exists(&invocation.destination_folder_id, name)
    });
    files
        .write_pdf(&invocation.destination_folder_id, &final_name, &bytes)
        .map_err(ExportError::Export)
}

fn ensure_reachable(
    check: Result<bool, StoreError>,
    what: &str,
    id: &str,
) -> Result<(), ExportError> {
    match check {
        Ok(true) => Ok(()),
        Ok(false) => Err(ExportError::Resource {
            resource: format!("{what} {id}"),
            cause: "not found".to_string(),
        }),
        Err(e) => Err(ExportError::Resource {
            resource: format!("{what} {id}"),
            cause: e.to_string(),
        }),
    }
}

fn trash_working_copy<F: FileStore>(files: &F, file_id: &str) {
    if let Err(e) = files.trash(file_id) {
        tracing::warn!("failed to trash working copy {file_id}: {e}");
    }
}
