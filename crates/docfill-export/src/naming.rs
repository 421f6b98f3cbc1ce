//! Working-copy and final artifact naming.
//!
//! Both names render the same filename template against the same
//! placeholder map, then go through the sanitizer; uniqueness against the
//! destination folder is resolved separately for each.

use docfill_core::filename::sanitize;
use docfill_core::placeholders::PlaceholderMap;

/// Desired working-copy name: `Temp_` plus the filename template with a
/// trailing `.pdf` stripped case-insensitively, placeholders applied.
pub fn working_copy_name(filename_template: &str, placeholders: &PlaceholderMap) -> String {
    let stem = strip_pdf_extension(filename_template);
    sanitize(&placeholders.apply(&format!("Temp_{stem}")))
}

/// Desired final PDF name. When the rendered template comes out empty or
/// without its `.pdf` extension, fall back to a name derived from the
/// record key.
pub fn final_pdf_name(
    filename_template: &str,
    placeholders: &PlaceholderMap,
    record_key: &str,
) -> String {
    let name = sanitize(&placeholders.apply(filename_template));
    if name.trim().is_empty() || !has_pdf_extension(&name) {
        sanitize(&format!("Document_{record_key}.pdf"))
    } else {
        name
    }
}

fn strip_pdf_extension(name: &str) -> &str {
    if has_pdf_extension(name) {
        &name[..name.len() - 4]
    } else {
        name
    }
}

fn has_pdf_extension(name: &str) -> bool {
    name.len() >= 4
        && name.is_char_boundary(name.len() - 4)
        && name[name.len() - 4..].eq_ignore_ascii_case(".pdf")
}
