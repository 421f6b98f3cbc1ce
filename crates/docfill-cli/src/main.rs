//! docfill: fill a document template with one record's fields and export
//! it as a uniquely named PDF.
//!
//! Arguments are positional and order-significant, mirroring the
//! platform's invocation signature; the final PDF name is printed on
//! stdout. Folders, templates, and spreadsheets resolve as paths under
//! `DOCFILL_ROOT` (default: the current directory).

use std::path::Path;

use eyre::Result;

use docfill_core::invocation::{DataSource, Invocation};
use docfill_export::pipeline::generate_pdf;
use docfill_locator::appsheet::AppSheetSource;
use docfill_locator::sheet::SheetSource;
use docfill_store::fs::FsDrive;

mod sheet;

use sheet::JsonSheet;

const USAGE: &str = "\
usage (sheet source, 9 args):
  docfill <recordKey> <spreadsheetPath> <sheetName> <templatePath> \\
          <destinationFolder> <keyColumn> <linkColumnOrEmpty> \\
          <filenameTemplate> <deleteWorkingCopyFlag>

usage (AppSheet source, 10 args):
  docfill <recordKey> <appId> <accessKey> <tableName> <templatePath> \\
          <destinationFolder> <keyColumn> <linkColumnOrEmpty> \\
          <filenameTemplate> <deleteWorkingCopyFlag>";

fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let invocation =
        Invocation::from_args(&args).map_err(|e| eyre::eyre!("{e}\n\n{USAGE}"))?;

    let root = std::env::var("DOCFILL_ROOT").unwrap_or_else(|_| ".".to_string());
    tracing::debug!("resolving ids under {root:?}");
    let drive = FsDrive::new(&root);

    let name = match &invocation.source {
        DataSource::Sheet {
            spreadsheet_id,
            sheet_name,
        } => {
            let sheet = JsonSheet::new(Path::new(&root).join(spreadsheet_id), sheet_name.as_str());
            generate_pdf(&invocation, &SheetSource::new(sheet), &drive, &drive)
        }
        DataSource::AppSheet {
            app_id,
            access_key,
            table,
        } => {
            let source =
                AppSheetSource::new(app_id.as_str(), access_key.as_str(), table.as_str());
            generate_pdf(&invocation, &source, &drive, &drive)
        }
    }
    .map_err(|e| eyre::eyre!("pdf generation failed: {e}"))?;

    println!("{name}");
    Ok(())
}
