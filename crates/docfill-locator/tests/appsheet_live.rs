//! Live integration tests against the real AppSheet API.
//!
//! These require valid credentials in the environment:
//! `DOCFILL_APPSHEET_APP_ID`, `DOCFILL_APPSHEET_ACCESS_KEY`,
//! `DOCFILL_APPSHEET_TABLE`, `DOCFILL_APPSHEET_KEY_COLUMN`,
//! `DOCFILL_APPSHEET_KEY`.
//!
//! Run with: `cargo test -p docfill-locator --test appsheet_live -- --ignored`

use docfill_locator::RecordSource;
use docfill_locator::appsheet::AppSheetSource;

fn env(name: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| panic!("set {name} env var"))
}

fn source_from_env() -> AppSheetSource {
    AppSheetSource::new(
        env("DOCFILL_APPSHEET_APP_ID"),
        env("DOCFILL_APPSHEET_ACCESS_KEY"),
        env("DOCFILL_APPSHEET_TABLE"),
    )
}

#[test]
#[ignore]
fn locates_an_existing_record() {
    let source = source_from_env();
    let record = source
        .locate(&env("DOCFILL_APPSHEET_KEY_COLUMN"), &env("DOCFILL_APPSHEET_KEY"))
        .expect("locate should succeed");

    assert!(!record.is_empty(), "record came back with no fields");
    for (name, value) in record.fields() {
        println!("  {name} = {value:?}");
    }
}

#[test]
#[ignore]
fn unknown_key_is_record_not_found() {
    let source = source_from_env();
    let err = source
        .locate(
            &env("DOCFILL_APPSHEET_KEY_COLUMN"),
            "docfill-no-such-key-00000000",
        )
        .expect_err("locate should fail for a fabricated key");
    println!("error: {err}");
}
