//! End-to-end pipeline behavior over the in-memory drive.

use std::cell::RefCell;

use docfill_core::invocation::{DataSource, Invocation};
use docfill_core::record::Record;
use docfill_export::error::ExportError;
use docfill_export::pipeline::generate_pdf;
use docfill_locator::RecordSource;
use docfill_locator::error::LocatorError;
use docfill_locator::sheet::{SheetSource, SheetStore};
use docfill_store::document::{DocumentStore, Region, RegionText};
use docfill_store::error::StoreError;
use docfill_store::file::{FileStore, StoredFile};
use docfill_store::memory::MemoryDrive;

/// In-memory sheet backing the tabular source.
struct FakeSheet {
    rows: RefCell<Vec<Vec<String>>>,
}

impl FakeSheet {
    fn new(rows: &[&[&str]]) -> Self {
        Self {
            rows: RefCell::new(
                rows.iter()
                    .map(|row| row.iter().map(|c| c.to_string()).collect())
                    .collect(),
            ),
        }
    }
}

impl SheetStore for FakeSheet {
    fn read_all(&self) -> Result<Vec<Vec<String>>, LocatorError> {
        Ok(self.rows.borrow().clone())
    }

    fn write_cell(&self, row: usize, column: usize, value: &str) -> Result<(), LocatorError> {
        self.rows.borrow_mut()[row - 1][column - 1] = value.to_string();
        Ok(())
    }
}

/// Record source with canned data and a controllable link-back.
struct StubSource {
    record: Record,
    fail_write_back: bool,
    links: RefCell<Vec<String>>,
}

impl StubSource {
    fn with_fields(key: &str, fields: &[(&str, &str)]) -> Self {
        let mut record = Record::new(key);
        for (name, value) in fields {
            record.push_field(name, value.to_string());
        }
        Self {
            record,
            fail_write_back: false,
            links: RefCell::new(Vec::new()),
        }
    }
}

impl RecordSource for StubSource {
    fn locate(&self, _key_column: &str, _key: &str) -> Result<Record, LocatorError> {
        Ok(self.record.clone())
    }

    fn write_back(
        &self,
        _key_column: &str,
        _key: &str,
        _link_column: &str,
        value: &str,
    ) -> Result<(), LocatorError> {
        if self.fail_write_back {
            return Err(LocatorError::WriteBackUnsupported);
        }
        self.links.borrow_mut().push(value.to_string());
        Ok(())
    }
}

fn drive() -> MemoryDrive {
    let drive = MemoryDrive::new();
    drive.add_folder("dest");
    drive.add_template(
        "tpl",
        RegionText {
            body: "Order {{ID}} for {{Name}}".to_string(),
            header: Some("Ref {{ID}}".to_string()),
            footer: Some("Generated for {{Name}}".to_string()),
        },
    );
    drive
}

fn invocation() -> Invocation {
    Invocation {
        record_key: "42".to_string(),
        source: DataSource::Sheet {
            spreadsheet_id: "sheet".to_string(),
            sheet_name: "Orders".to_string(),
        },
        template_id: "tpl".to_string(),
        destination_folder_id: "dest".to_string(),
        key_column: "ID".to_string(),
        link_column: None,
        filename_template: "BL-{{ID}}.pdf".to_string(),
        delete_working_copy: false,
    }
}

#[test]
fn returns_the_rendered_final_name() {
    let drive = drive();
    let source = StubSource::with_fields("42", &[("ID", "42"), ("Name", "Bob")]);

    let name = generate_pdf(&invocation(), &source, &drive, &drive).unwrap();
    assert_eq!(name, "BL-42.pdf");
    assert!(drive.file_bytes("dest", "BL-42.pdf").unwrap().starts_with(b"%PDF-"));
}

#[test]
fn second_run_gets_a_counter_suffix() {
    let drive = drive();
    let source = StubSource::with_fields("42", &[("ID", "42")]);

    assert_eq!(generate_pdf(&invocation(), &source, &drive, &drive).unwrap(), "BL-42.pdf");
    assert_eq!(
        generate_pdf(&invocation(), &source, &drive, &drive).unwrap(),
        "BL-42 (1).pdf"
    );
}

#[test]
fn working_copy_is_fully_substituted_across_regions() {
    let drive = drive();
    let source = StubSource::with_fields("42", &[("ID", "42"), ("Name", "Bob")]);

    generate_pdf(&invocation(), &source, &drive, &drive).unwrap();

    let names = drive.file_names("dest");
    assert_eq!(names, vec!["Temp_BL-42", "BL-42.pdf"]);

    let copy_id = drive.file_id("dest", "Temp_BL-42").unwrap();
    let text = drive.document_text(&copy_id).unwrap();
    assert_eq!(text.body, "Order 42 for Bob");
    assert_eq!(text.header.as_deref(), Some("Ref 42"));
    assert_eq!(text.footer.as_deref(), Some("Generated for Bob"));
}

#[test]
fn delete_flag_trashes_the_working_copy() {
    let drive = drive();
    let source = StubSource::with_fields("42", &[("ID", "42")]);
    let mut invocation = invocation();
    invocation.delete_working_copy = true;

    generate_pdf(&invocation, &source, &drive, &drive).unwrap();
    assert_eq!(drive.file_names("dest"), vec!["BL-42.pdf"]);
}

#[test]
fn link_back_writes_the_url_into_the_sheet() {
    let drive = drive();
    let sheet = FakeSheet::new(&[
        &["ID", "Name", "LienPDF"],
        &["42", "Bob", ""],
    ]);
    let source = SheetSource::new(sheet);
    let mut invocation = invocation();
    invocation.link_column = Some("LienPDF".to_string());

    generate_pdf(&invocation, &source, &drive, &drive).unwrap();

    let rows = source.store().read_all().unwrap();
    assert!(rows[1][2].starts_with("memory://file/"), "got {:?}", rows[1][2]);
}

#[test]
fn link_back_failure_is_non_fatal() {
    let drive = drive();
    let mut source = StubSource::with_fields("42", &[("ID", "42")]);
    source.fail_write_back = true;
    let mut invocation = invocation();
    invocation.link_column = Some("LienPDF".to_string());

    let name = generate_pdf(&invocation, &source, &drive, &drive).unwrap();
    assert_eq!(name, "BL-42.pdf");
    assert!(source.links.borrow().is_empty());
}

#[test]
fn blank_configuration_fails_before_any_io() {
    let drive = MemoryDrive::new(); // no folder, no template
    let source = StubSource::with_fields("42", &[("ID", "42")]);
    let mut invocation = invocation();
    invocation.template_id = "  ".to_string();

    let err = generate_pdf(&invocation, &source, &drive, &drive).unwrap_err();
    assert!(matches!(err, ExportError::Config(_)));
    assert!(err.to_string().contains("templateId"));
}

#[test]
fn locate_failure_keeps_the_locator_message() {
    let drive = drive();
    let sheet = FakeSheet::new(&[&["ID"], &["1"]]);
    let source = SheetSource::new(sheet);

    let err = generate_pdf(&invocation(), &source, &drive, &drive).unwrap_err();
    assert!(matches!(err, ExportError::Locate(_)));
    assert!(err.to_string().contains("\"42\""), "got {err}");
}

#[test]
fn unreachable_template_names_the_resource() {
    let drive = MemoryDrive::new();
    drive.add_folder("dest");
    let source = StubSource::with_fields("42", &[("ID", "42")]);

    let err = generate_pdf(&invocation(), &source, &drive, &drive).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("template tpl"), "got {message}");
}

#[test]
fn empty_rendered_name_falls_back_to_the_record_key() {
    let drive = drive();
    let source = StubSource::with_fields("42", &[("ID", "42"), ("Name", "")]);
    let mut invocation = invocation();
    invocation.filename_template = "{{Name}}".to_string();

    let name = generate_pdf(&invocation, &source, &drive, &drive).unwrap();
    assert_eq!(name, "Document_42.pdf");
}

/// File store that always fails PDF writes, delegating everything else.
struct FailingWrites<'a>(&'a MemoryDrive);

impl FileStore for FailingWrites<'_> {
    fn folder_exists(&self, folder_id: &str) -> Result<bool, StoreError> {
        self.0.folder_exists(folder_id)
    }

    fn template_exists(&self, template_id: &str) -> Result<bool, StoreError> {
        self.0.template_exists(template_id)
    }

    fn name_exists(&self, folder_id: &str, name: &str) -> Result<bool, StoreError> {
        self.0.name_exists(folder_id, name)
    }

    fn copy_template(
        &self,
        template_id: &str,
        folder_id: &str,
        name: &str,
    ) -> Result<StoredFile, StoreError> {
        self.0.copy_template(template_id, folder_id, name)
    }

    fn write_pdf(&self, _: &str, _: &str, _: &[u8]) -> Result<StoredFile, StoreError> {
        Err(StoreError::Write("folder quota exceeded".to_string()))
    }

    fn trash(&self, file_id: &str) -> Result<(), StoreError> {
        self.0.trash(file_id)
    }
}

#[test]
fn failed_export_still_cleans_up_the_working_copy() {
    let drive = drive();
    let files = FailingWrites(&drive);
    let source = StubSource::with_fields("42", &[("ID", "42")]);
    let mut invocation = invocation();
    invocation.delete_working_copy = true;

    let err = generate_pdf(&invocation, &source, &drive, &files).unwrap_err();
    assert!(matches!(err, ExportError::Export(_)));
    assert!(err.to_string().contains("folder quota exceeded"));
    // the temp copy was created, then trashed on the failure path
    assert!(drive.file_names("dest").is_empty());
}

/// Document store that fails replacements of one specific key.
struct FlakyReplace<'a> {
    inner: &'a MemoryDrive,
    poison: &'static str,
}

impl DocumentStore for FlakyReplace<'_> {
    fn regions(&self, doc_id: &str) -> Result<Vec<Region>, StoreError> {
        self.inner.regions(doc_id)
    }

    fn replace_text(
        &self,
        doc_id: &str,
        region: Region,
        needle: &str,
        replacement: &str,
    ) -> Result<(), StoreError> {
        if needle == self.poison {
            return Err(StoreError::Replace("service hiccup".to_string()));
        }
        self.inner.replace_text(doc_id, region, needle, replacement)
    }

    fn save_and_close(&self, doc_id: &str) -> Result<(), StoreError> {
        self.inner.save_and_close(doc_id)
    }

    fn export_pdf(&self, doc_id: &str) -> Result<Vec<u8>, StoreError> {
        self.inner.export_pdf(doc_id)
    }
}

#[test]
fn one_failed_replacement_does_not_abort_the_rest() {
    let drive = drive();
    let documents = FlakyReplace {
        inner: &drive,
        poison: "{{ID}}",
    };
    let source = StubSource::with_fields("42", &[("ID", "42"), ("Name", "Bob")]);

    let name = generate_pdf(&invocation(), &source, &documents, &drive).unwrap();
    assert_eq!(name, "BL-42.pdf");
}
