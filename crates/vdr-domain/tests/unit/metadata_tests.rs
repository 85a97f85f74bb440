//! Unit tests for metadata records

use serde_json::json;
use vdr_domain::value_objects::MetadataRecord;

#[test]
fn test_page_metadata_view() {
    let record = MetadataRecord::new(
        "images/handbook_page_2.png",
        json!({
            "text_book_name": "Network Security",
            "volume": "II",
            "page_number": 2,
            "image_location_path": "images/handbook_page_2.png",
            "textbook_location_path": "books/handbook.pdf",
            "unrelated": true
        }),
    );

    let page = record.page_metadata().expect("object document");
    assert_eq!(page.text_book_name.as_deref(), Some("Network Security"));
    assert_eq!(page.volume.as_deref(), Some("II"));
    assert_eq!(page.page_number, Some(2));
    assert_eq!(page.textbook_location_path.as_deref(), Some("books/handbook.pdf"));
}

#[test]
fn test_page_metadata_none_for_scalar_document() {
    let record = MetadataRecord::new("k", json!("plain"));
    assert!(record.page_metadata().is_none());
}

#[test]
fn test_content_bytes_decoding() {
    let record = MetadataRecord::new("k", json!({"content": "aGVsbG8="}));
    assert_eq!(record.content_bytes().unwrap(), Some(b"hello".to_vec()));

    let empty = MetadataRecord::new("k", json!({}));
    assert_eq!(empty.content_bytes().unwrap(), None);

    let broken = MetadataRecord::new("k", json!({"content": "***"}));
    assert!(broken.content_bytes().is_err());
}
