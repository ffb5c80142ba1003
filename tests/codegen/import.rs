//! Integration tests for snapshot import

use mudmap_codegen::{import_all, import_file};
use mudmap_foundation::{Coord, ErrorKind};

const DOC: &str = r#"{
    "rooms": [
        {"id": "0,0", "name": "/d/a/hall", "title": "Hall", "description": "",
         "exits": [{"direction": "north", "destination": "/d/a/plaza"}],
         "x": 0, "y": 0, "tags": ["start"], "lit": true, "ghost": true},
        {"id": "0,-1", "name": "/d/a/plaza", "x": 0, "y": -1}
    ],
    "attributeTemplates": [{"id": "lit", "name": "Lit"}]
}"#;

#[test]
fn reads_rooms_and_registry() {
    let data = import_all(DOC).unwrap();
    assert_eq!(data.rooms.len(), 2);
    assert_eq!(data.attribute_templates.len(), 1);

    let store = data.room_store();
    let hall = store.at(Coord::new(0, 0)).unwrap();
    assert_eq!(hall.exits[0].destination, "/d/a/plaza");
    assert_eq!(hall.tags, ["start"]);
    assert!(hall.has_attribute("lit"));
}

#[test]
fn unregistered_flags_are_dropped() {
    let data = import_all(DOC).unwrap();
    assert!(!data.rooms[0].has_attribute("ghost"));
}

#[test]
fn missing_optional_fields_default() {
    let data = import_all(DOC).unwrap();
    let plaza = &data.rooms[1];
    assert!(plaza.title.is_empty());
    assert!(plaza.exits.is_empty());
}

#[test]
fn bad_documents_are_malformed() {
    for doc in [
        "not json",
        r#"{"rooms": []}"#,
        r#"{"attributeTemplates": []}"#,
        r#"{"rooms": [{"name": "a"}], "attributeTemplates": []}"#,
    ] {
        let err = import_all(doc).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::MalformedImport(_)), "{doc}");
    }
}

#[test]
fn file_errors_name_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.json");
    let err = import_file(&missing).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::IoError(_)));
    assert!(err.context.unwrap().source.unwrap().ends_with("missing.json"));

    let broken = dir.path().join("broken.json");
    std::fs::write(&broken, "{").unwrap();
    let err = import_file(&broken).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::MalformedImport(_)));
    assert!(err.context.is_some());
}
