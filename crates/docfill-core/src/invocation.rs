use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Where the record comes from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DataSource {
    /// A sheet grid; the first row holds the column headers.
    Sheet {
        spreadsheet_id: String,
        sheet_name: String,
    },
    /// The AppSheet REST API.
    AppSheet {
        app_id: String,
        access_key: String,
        table: String,
    },
}

/// Immutable per-call parameters.
///
/// Every invocation is fully parameterized and independent; there is no
/// process-wide configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invocation {
    pub record_key: String,
    pub source: DataSource,
    pub template_id: String,
    pub destination_folder_id: String,
    pub key_column: String,
    /// Column to receive the exported file's URL, if configured.
    pub link_column: Option<String>,
    pub filename_template: String,
    pub delete_working_copy: bool,
}

impl Invocation {
    /// Parse the platform's positional, order-significant argument vector.
    ///
    /// Nine arguments select the sheet-backed source:
    /// `recordKey spreadsheetId sheetName templateId destinationFolderId
    /// keyColumn linkColumnOrEmpty filenameTemplate deleteWorkingCopyFlag`
    ///
    /// Ten arguments select the AppSheet API source, with
    /// `appId accessKey tableName` in place of the sheet coordinates.
    ///
    /// The delete flag arrives as a string; `"true"` (case-insensitive)
    /// enables working-copy cleanup, anything else disables it.
    pub fn from_args(args: &[String]) -> Result<Self, CoreError> {
        let invocation = match args.len() {
            9 => Self {
                record_key: required(args, 0, "recordKey")?,
                source: DataSource::Sheet {
                    spreadsheet_id: required(args, 1, "spreadsheetId")?,
                    sheet_name: required(args, 2, "sheetName")?,
                },
                template_id: required(args, 3, "templateId")?,
                destination_folder_id: required(args, 4, "destinationFolderId")?,
                key_column: required(args, 5, "keyColumn")?,
                link_column: optional(args, 6),
                filename_template: required(args, 7, "filenameTemplate")?,
                delete_working_copy: flag(args, 8),
            },
            10 => Self {
                record_key: required(args, 0, "recordKey")?,
                source: DataSource::AppSheet {
                    app_id: required(args, 1, "appId")?,
                    access_key: required(args, 2, "accessKey")?,
                    table: required(args, 3, "tableName")?,
                },
                template_id: required(args, 4, "templateId")?,
                destination_folder_id: required(args, 5, "destinationFolderId")?,
                key_column: required(args, 6, "keyColumn")?,
                link_column: optional(args, 7),
                filename_template: required(args, 8, "filenameTemplate")?,
                delete_working_copy: flag(args, 9),
            },
            n => {
                return Err(CoreError::ArgumentCount {
                    expected: "9 (sheet) or 10 (AppSheet API)",
                    actual: n,
                });
            }
        };
        Ok(invocation)
    }

    /// Fail fast on the first required field that is empty after trimming.
    pub fn validate(&self) -> Result<(), CoreError> {
        check(&self.record_key, "recordKey")?;
        match &self.source {
            DataSource::Sheet {
                spreadsheet_id,
                sheet_name,
            } => {
                check(spreadsheet_id, "spreadsheetId")?;
                check(sheet_name, "sheetName")?;
            }
            DataSource::AppSheet {
                app_id,
                access_key,
                table,
            } => {
                check(app_id, "appId")?;
                check(access_key, "accessKey")?;
                check(table, "tableName")?;
            }
        }
        check(&self.template_id, "templateId")?;
        check(&self.destination_folder_id, "destinationFolderId")?;
        check(&self.key_column, "keyColumn")?;
        check(&self.filename_template, "filenameTemplate")?;
        Ok(())
    }
}

fn check(value: &str, name: &'static str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::MissingArgument(name));
    }
    Ok(())
}

fn required(args: &[String], index: usize, name: &'static str) -> Result<String, CoreError> {
    let value = args[index].trim();
    if value.is_empty() {
        return Err(CoreError::MissingArgument(name));
    }
    Ok(value.to_string())
}

fn optional(args: &[String], index: usize) -> Option<String> {
    let value = args[index].trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn flag(args: &[String], index: usize) -> bool {
    args[index].trim().eq_ignore_ascii_case("true")
}
