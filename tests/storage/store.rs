//! Integration tests for the room store

use mudmap_foundation::{Coord, ErrorKind};
use mudmap_storage::{Room, RoomStore};

fn store_with(coords: &[(i32, i32)]) -> RoomStore {
    let mut store = RoomStore::new();
    for &(x, y) in coords {
        store.create(Coord::new(x, y)).unwrap();
    }
    store
}

#[test]
fn create_refuses_occupied_cell() {
    let mut store = store_with(&[(0, 0)]);
    let err = store.create(Coord::new(0, 0)).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::DuplicateCoordinate { x: 0, y: 0 }));
    assert_eq!(store.len(), 1);
}

#[test]
fn lookups_by_id_and_cell() {
    let store = store_with(&[(0, 0), (3, -2)]);
    let room = store.at(Coord::new(3, -2)).unwrap();
    assert_eq!(store.get(&room.id()), Some(room));
    assert!(store.at(Coord::new(1, 1)).is_none());
}

#[test]
fn update_replaces_by_id() {
    let mut store = store_with(&[(0, 0)]);
    let mut room = store.at(Coord::new(0, 0)).unwrap().clone();
    room.title = "Gate".to_string();
    assert!(store.update(&room));
    assert_eq!(store.at(Coord::new(0, 0)).unwrap().title, "Gate");

    assert!(!store.update(&Room::new(Coord::new(9, 9))));
    assert_eq!(store.len(), 1);
}

#[test]
fn delete_leaves_dangling_exits() {
    let mut store = store_with(&[(0, 0), (1, 0)]);
    let mut west = store.at(Coord::new(0, 0)).unwrap().clone();
    west.exits.push(mudmap_storage::Exit::new(
        mudmap_foundation::Direction::East,
        "room_1_0",
    ));
    store.update(&west);

    assert!(store.delete(&Coord::new(1, 0).room_id()));
    assert!(!store.delete(&Coord::new(1, 0).room_id()));
    assert_eq!(store.at(Coord::new(0, 0)).unwrap().exits[0].destination, "room_1_0");
}

#[test]
fn copy_goes_south_east_without_checking() {
    let mut store = store_with(&[(0, 0), (1, 1)]);
    let source = store.at(Coord::new(0, 0)).unwrap().clone();

    let copy = store.copy(&source).unwrap();
    assert_eq!(copy.coord(), Coord::new(1, 1));
    assert_eq!(copy.name, "room_0_0_copy");
    assert_eq!(store.len(), 3);
    // Lookups return the first room at the cell.
    assert_eq!(store.at(Coord::new(1, 1)).unwrap().name, "room_1_1");
}

#[test]
fn search_ignores_case_and_reads_tags() {
    let mut store = store_with(&[(0, 0), (1, 0), (2, 0)]);
    let mut room = store.at(Coord::new(2, 0)).unwrap().clone();
    room.tags.push("Dark Forest".to_string());
    store.update(&room);

    let hits: Vec<_> = store.search("forest").map(Room::id).collect();
    assert_eq!(hits, [Coord::new(2, 0).room_id()]);
    assert_eq!(store.search("ROOM_").count(), 3);
    assert_eq!(store.search("").count(), 3);
}

#[test]
fn snapshot_survives_later_edits() {
    let mut store = store_with(&[(0, 0)]);
    let snapshot = store.snapshot();
    store.create(Coord::new(1, 0)).unwrap();
    store.clear();

    assert_eq!(snapshot.len(), 1);
    store.restore(&snapshot);
    assert_eq!(store, snapshot);
}

#[test]
fn store_serializes_as_array() {
    let store = store_with(&[(0, 0), (1, 0)]);
    let json = serde_json::to_value(&store).unwrap();
    assert_eq!(json.as_array().unwrap().len(), 2);
    let back: RoomStore = serde_json::from_value(json).unwrap();
    assert_eq!(back, store);
}
