//! Persistence across sessions

use mudmap_foundation::{Coord, ErrorKind};
use mudmap_runtime::persist::{PREFIXES_KEY, ROOMS_KEY, backup_key};
use mudmap_runtime::{FileStore, KeyValueStore, Persistence, Session, SessionConfig};

fn open(dir: &std::path::Path) -> Session {
    let config = SessionConfig::new().with_data_dir(dir);
    Session::open(config, Persistence::new(FileStore::new(dir))).unwrap()
}

#[test]
fn rooms_templates_and_prefixes_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut session = open(dir.path());
        session.create(Coord::new(2, 3)).unwrap();
        session.set_title("Well").unwrap();
        session.save_room().unwrap();
        session.save_template().unwrap();
        session.add_prefix("/d/cave/");
        session.save().unwrap();
    }

    let session = open(dir.path());
    assert_eq!(session.rooms().at(Coord::new(2, 3)).unwrap().title, "Well");
    assert_eq!(session.templates().len(), 1);
    assert!(session.prefixes().contains("/d/cave/"));
    // The first listed prefix is selected on open.
    assert_eq!(session.selected_prefix(), "/d/city/");
    // History starts fresh at the loaded state.
    assert_eq!(session.history().len(), 1);
}

#[test]
fn records_are_plain_json_files() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = open(dir.path());
    session.create(Coord::new(0, 0)).unwrap();
    session.save().unwrap();

    let store = FileStore::new(dir.path());
    assert!(store.path_for(ROOMS_KEY).exists());
    assert!(store.get(PREFIXES_KEY).unwrap().is_none());

    let rooms: serde_json::Value =
        serde_json::from_str(&store.get(ROOMS_KEY).unwrap().unwrap()).unwrap();
    assert_eq!(rooms[0]["id"], "0,0");
}

#[test]
fn corrupt_record_falls_back_to_default() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FileStore::new(dir.path());
    store.set(ROOMS_KEY, "[{broken").unwrap();
    store.set(PREFIXES_KEY, r#"["/d/moon/"]"#).unwrap();

    let mut session = open(dir.path());
    assert!(session.rooms().is_empty());
    assert_eq!(session.selected_prefix(), "/d/moon/");

    session.create(Coord::new(0, 0)).unwrap();
    session.save().unwrap();
    let store = FileStore::new(dir.path());
    assert_eq!(
        store.get(&backup_key(ROOMS_KEY)).unwrap().as_deref(),
        Some("[{broken")
    );
    assert!(store.path_for(&backup_key(ROOMS_KEY)).exists());
}

#[test]
fn flag_named_like_a_room_field_cannot_corrupt_the_record() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut session = open(dir.path());
        let err = session.register_attribute("x", "X").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::InvalidAttribute(_)));
        session.register_attribute("lit", "Lit").unwrap();
        session.create(Coord::new(0, 0)).unwrap();
        session.set_flag("lit", true).unwrap();
        session.create(Coord::new(1, 0)).unwrap();
        session.save().unwrap();
    }

    let session = open(dir.path());
    assert_eq!(session.rooms().len(), 2);
    assert!(session.rooms().at(Coord::new(0, 0)).unwrap().has_attribute("lit"));
}

#[test]
fn registry_is_not_persisted() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut session = open(dir.path());
        session.register_attribute("no_magic", "禁止魔法").unwrap();
        session.create(Coord::new(0, 0)).unwrap();
        session.save().unwrap();
    }
    let session = open(dir.path());
    assert!(!session.registry().contains("no_magic"));
}
