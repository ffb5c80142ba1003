//! Integration tests for archive export

use std::io::{Cursor, Read};

use mudmap_codegen::{CodeGenerator, MAP_DATA_FILE, export_all, import_all};
use mudmap_foundation::{Coord, ErrorKind};
use mudmap_storage::{AttributeRegistry, RoomStore};

fn two_rooms() -> RoomStore {
    let mut store = RoomStore::new();
    let mut hall = store.create(Coord::new(0, 0)).unwrap();
    hall.name = "/d/city/hall".to_string();
    store.update(&hall);
    store.create(Coord::new(1, 0)).unwrap();
    store
}

#[test]
fn one_script_per_room_plus_snapshot() {
    let archive = export_all(
        &two_rooms(),
        &AttributeRegistry::default(),
        &CodeGenerator::new(),
    )
    .unwrap();

    let paths: Vec<_> = archive.entries().iter().map(|e| e.path.as_str()).collect();
    assert_eq!(paths, ["d/city/hall.c", "room_1_0.c", MAP_DATA_FILE]);
    assert!(archive.get("d/city/hall.c").unwrap().starts_with("// /d/city/hall.c\n"));
}

#[test]
fn zip_container_holds_every_entry() {
    let archive = export_all(
        &two_rooms(),
        &AttributeRegistry::default(),
        &CodeGenerator::new(),
    )
    .unwrap();
    let bytes = archive.to_zip_bytes().unwrap();

    let mut zip = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    assert_eq!(zip.len(), 3);
    let mut json = String::new();
    zip.by_name(MAP_DATA_FILE)
        .unwrap()
        .read_to_string(&mut json)
        .unwrap();

    let data = import_all(&json).unwrap();
    assert_eq!(data.room_store(), two_rooms());
    assert_eq!(data.attribute_templates, AttributeRegistry::default());
}

#[test]
fn snapshot_uses_camel_case_registry_key() {
    let archive = export_all(
        &RoomStore::new(),
        &AttributeRegistry::default(),
        &CodeGenerator::new(),
    )
    .unwrap();
    let value: serde_json::Value =
        serde_json::from_str(archive.get(MAP_DATA_FILE).unwrap()).unwrap();
    assert_eq!(value["rooms"], serde_json::json!([]));
    assert_eq!(value["attributeTemplates"][3]["id"], "outdoors");
}

#[test]
fn writing_to_missing_directory_fails_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("no/such/dir/map.zip");
    let archive = export_all(
        &two_rooms(),
        &AttributeRegistry::default(),
        &CodeGenerator::new(),
    )
    .unwrap();

    let err = archive.write_zip(&target).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::IoError(_)));
    assert!(!target.exists());
}
