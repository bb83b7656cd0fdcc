mod common;

use common::TestFixture;
use tabula_cli::document::{load_attachment, load_context, render_dataset, write_dataset};
use tabula_core::contracts::{Dataset, Record};

fn sample_rows() -> Dataset {
    let mut first = Record::new();
    first.insert("S.No".to_string(), "1".to_string());
    first.insert("Question".to_string(), "What is 2+2?".to_string());
    let mut second = Record::new();
    second.insert("S.No".to_string(), "2".to_string());
    second.insert("Question".to_string(), "Name a prime".to_string());
    vec![first, second]
}

#[test]
fn test_load_attachment_names_it_after_the_file() {
    let fixture = TestFixture::new();
    let path = fixture.create_file("papers/exam.pdf", b"%PDF-1.7 body");

    let attachment = load_attachment(&path).unwrap();

    assert_eq!(attachment.data, b"%PDF-1.7 body");
    assert_eq!(attachment.name.as_deref(), Some("exam.pdf"));
    assert_eq!(attachment.resolved_mime_type(), "application/pdf");
}

#[test]
fn test_load_attachment_missing_file() {
    let fixture = TestFixture::new();
    let err = load_attachment(&fixture.path().join("nope.pdf")).unwrap_err();
    assert!(err.to_string().contains("nope.pdf"));
}

#[test]
fn test_load_attachment_rejects_empty_file() {
    let fixture = TestFixture::new();
    let path = fixture.create_file("empty.png", b"");

    let err = load_attachment(&path).unwrap_err();
    assert!(err.to_string().contains("is empty"));
}

#[test]
fn test_load_context() {
    let fixture = TestFixture::new();
    let path = fixture.create_file("notes.txt", "Photosynthesis needs light.".as_bytes());

    assert_eq!(load_context(&path).unwrap(), "Photosynthesis needs light.");
    assert!(load_context(&fixture.path().join("missing.txt")).is_err());
}

#[test]
fn test_render_dataset_keeps_column_order() {
    let rendered = render_dataset(&sample_rows()).unwrap();

    let sno = rendered.find("\"S.No\"").unwrap();
    let question = rendered.find("\"Question\"").unwrap();
    assert!(sno < question);
    assert!(rendered.find("What is 2+2?").unwrap() < rendered.find("Name a prime").unwrap());
}

#[test]
fn test_write_dataset() {
    let fixture = TestFixture::new();
    let path = fixture.path().join("rows.json");

    write_dataset(&path, &sample_rows()).unwrap();

    assert!(fixture.file_exists("rows.json"));
    let written: serde_json::Value = serde_json::from_str(&fixture.read_file("rows.json")).unwrap();
    assert_eq!(written[1]["Question"], "Name a prime");
    assert_eq!(written.as_array().unwrap().len(), 2);
}

#[test]
fn test_render_empty_dataset() {
    assert_eq!(render_dataset(&vec![]).unwrap(), "[]");
}
