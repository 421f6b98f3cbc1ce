//! Minimal single-page PDF rendering of filled region text.
//!
//! The managed platform converts documents to PDF natively; this backend
//! only needs bytes that are a real, openable PDF. One A4 page, built-in
//! Helvetica, header then body then footer as plain lines.

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};

use crate::document::RegionText;
use crate::error::StoreError;

const PAGE_WIDTH: f32 = 595.28;
const PAGE_HEIGHT: f32 = 841.89;
const MARGIN: f32 = 56.0;
const FONT_SIZE: f32 = 11.0;
const LEADING: f32 = 14.0;

pub fn render(text: &RegionText) -> Result<Vec<u8>, StoreError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut operations = vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F1".into(), Object::Real(FONT_SIZE)]),
        Operation::new("TL", vec![Object::Real(LEADING)]),
        Operation::new(
            "Td",
            vec![Object::Real(MARGIN), Object::Real(PAGE_HEIGHT - MARGIN)],
        ),
    ];
    for line in lines(text) {
        operations.push(Operation::new("Tj", vec![Object::string_literal(line)]));
        operations.push(Operation::new("T*", vec![]));
    }
    operations.push(Operation::new("ET", vec![]));

    let content = Content { operations };
    let encoded = content
        .encode()
        .map_err(|e| StoreError::Export(e.to_string()))?;
    let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => resources_id,
        "MediaBox" => vec![
            Object::Real(0.0),
            Object::Real(0.0),
            Object::Real(PAGE_WIDTH),
            Object::Real(PAGE_HEIGHT),
        ],
    });
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![Object::Reference(page_id)],
        "Count" => 1,
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut buf = Vec::new();
    doc.save_to(&mut buf)
        .map_err(|e| StoreError::Export(e.to_string()))?;
    Ok(buf)
}

fn lines(text: &RegionText) -> Vec<String> {
    let mut out = Vec::new();
    if let Some(header) = &text.header {
        out.extend(header.lines().map(str::to_string));
        out.push(String::new());
    }
    out.extend(text.body.lines().map(str::to_string));
    if let Some(footer) = &text.footer {
        out.push(String::new());
        out.extend(footer.lines().map(str::to_string));
    }
    out
}
