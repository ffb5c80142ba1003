//! Integration tests for HistoryStack

use mudmap_foundation::Coord;
use mudmap_history::{HistoryConfig, HistoryStack};
use mudmap_storage::RoomStore;
use proptest::prelude::*;

fn commit_create(history: &mut HistoryStack, store: &mut RoomStore, x: i32) {
    store.create(Coord::new(x, 0)).unwrap();
    history.commit(store.snapshot(), format!("create {x}"));
}

#[test]
fn undo_redo_walk_the_snapshots() {
    let mut store = RoomStore::new();
    let mut history = HistoryStack::new(store.snapshot());
    commit_create(&mut history, &mut store, 0);
    commit_create(&mut history, &mut store, 1);

    assert_eq!(history.undo().unwrap().store().len(), 1);
    assert_eq!(history.undo().unwrap().store().len(), 0);
    assert!(history.undo().is_none());
    assert_eq!(history.cursor(), 0);

    assert_eq!(history.redo().unwrap().label(), "create 0");
    assert_eq!(history.redo().unwrap().store().len(), 2);
    assert!(history.redo().is_none());
}

#[test]
fn commit_after_undo_drops_the_redo_branch() {
    let mut store = RoomStore::new();
    let mut history = HistoryStack::new(store.snapshot());
    commit_create(&mut history, &mut store, 0);
    commit_create(&mut history, &mut store, 1);

    let mut store = history.undo().unwrap().store().snapshot();
    commit_create(&mut history, &mut store, 5);

    assert!(!history.can_redo());
    assert_eq!(history.len(), 3);
    let labels: Vec<_> = history.iter().map(|s| s.label().to_string()).collect();
    assert_eq!(labels, ["initial", "create 0", "create 5"]);
}

#[test]
fn snapshots_do_not_see_later_edits() {
    let mut store = RoomStore::new();
    let mut history = HistoryStack::new(store.snapshot());
    commit_create(&mut history, &mut store, 0);
    store.clear();

    assert_eq!(history.current().store().len(), 1);
}

#[test]
fn capacity_drops_oldest() {
    let mut store = RoomStore::new();
    let mut history =
        HistoryStack::with_config(store.snapshot(), HistoryConfig::new().with_capacity(3));
    for x in 0..5 {
        commit_create(&mut history, &mut store, x);
    }

    assert_eq!(history.len(), 3);
    assert_eq!(history.cursor(), 2);
    assert_eq!(history.iter().next().unwrap().label(), "create 2");
    assert!(history.undo().is_some());
    assert!(history.undo().is_some());
    assert!(history.undo().is_none());
}

#[test]
fn reset_starts_over() {
    let mut store = RoomStore::new();
    let mut history = HistoryStack::new(store.snapshot());
    commit_create(&mut history, &mut store, 0);
    history.reset(RoomStore::new(), "clear");

    assert_eq!(history.len(), 1);
    assert!(!history.can_undo());
    assert_eq!(history.current().label(), "clear");
}

proptest! {
    #[test]
    fn cursor_stays_in_range(ops in prop::collection::vec(0u8..3, 0..40)) {
        let mut store = RoomStore::new();
        let mut history = HistoryStack::new(store.snapshot());
        let mut next = 0;
        for op in ops {
            match op {
                0 => {
                    commit_create(&mut history, &mut store, next);
                    next += 1;
                }
                1 => {
                    if let Some(s) = history.undo() {
                        store = s.store().snapshot();
                    }
                }
                _ => {
                    if let Some(s) = history.redo() {
                        store = s.store().snapshot();
                    }
                }
            }
            prop_assert!(history.cursor() < history.len());
            prop_assert_eq!(history.current().store(), &store);
        }
    }
}
