//! History stack of room store snapshots.
//!
//! The cursor always names the snapshot that matches the live store. Undo and
//! redo only move the cursor; commit truncates everything after it before
//! appending, so a fresh edit after an undo loses the redo branch.

use std::collections::VecDeque;

use mudmap_storage::RoomStore;

use crate::config::HistoryConfig;

// =============================================================================
// History Snapshot
// =============================================================================

/// An immutable copy of the room store at one point in the edit history.
///
/// The store is a persistent structure, so holding a snapshot costs little
/// and later edits to the live store never reach it.
#[derive(Clone, Debug)]
pub struct HistorySnapshot {
    store: RoomStore,
    label: String,
}

impl HistorySnapshot {
    /// Creates a snapshot.
    #[must_use]
    pub fn new(store: RoomStore, label: impl Into<String>) -> Self {
        Self {
            store,
            label: label.into(),
        }
    }

    /// The captured rooms.
    #[must_use]
    pub fn store(&self) -> &RoomStore {
        &self.store
    }

    /// Short description of the command that produced this state.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }
}

// =============================================================================
// History Stack
// =============================================================================

/// Linear undo/redo history.
#[derive(Clone, Debug)]
pub struct HistoryStack {
    snapshots: VecDeque<HistorySnapshot>,
    cursor: usize,
    config: HistoryConfig,
}

impl HistoryStack {
    /// Creates a stack holding only `initial`.
    #[must_use]
    pub fn new(initial: RoomStore) -> Self {
        Self::with_config(initial, HistoryConfig::default())
    }

    /// Creates a stack holding only `initial`, with custom configuration.
    #[must_use]
    pub fn with_config(initial: RoomStore, config: HistoryConfig) -> Self {
        let mut snapshots = VecDeque::new();
        snapshots.push_back(HistorySnapshot::new(initial, "initial"));
        Self {
            snapshots,
            cursor: 0,
            config,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &HistoryConfig {
        &self.config
    }

    /// Records `store` as the new current state.
    pub fn commit(&mut self, store: RoomStore, label: impl Into<String>) {
        let label = label.into();
        let discarded = self.snapshots.len() - (self.cursor + 1);
        if discarded > 0 {
            log::debug!("commit '{label}' discards {discarded} redo state(s)");
        }
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push_back(HistorySnapshot::new(store, label));

        if let Some(capacity) = self.config.capacity() {
            while self.snapshots.len() > capacity {
                if let Some(dropped) = self.snapshots.pop_front() {
                    log::warn!("history full, dropped oldest state '{}'", dropped.label);
                }
            }
        }
        self.cursor = self.snapshots.len() - 1;
    }

    /// Steps back one state.
    ///
    /// Returns the snapshot now current, or `None` at the oldest state.
    pub fn undo(&mut self) -> Option<&HistorySnapshot> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        log::debug!("undo to state {}", self.cursor);
        self.snapshots.get(self.cursor)
    }

    /// Steps forward one state.
    ///
    /// Returns the snapshot now current, or `None` at the newest state.
    pub fn redo(&mut self) -> Option<&HistorySnapshot> {
        if self.cursor + 1 >= self.snapshots.len() {
            return None;
        }
        self.cursor += 1;
        log::debug!("redo to state {}", self.cursor);
        self.snapshots.get(self.cursor)
    }

    /// Discards all history and starts over from `store`.
    pub fn reset(&mut self, store: RoomStore, label: impl Into<String>) {
        self.snapshots.clear();
        self.snapshots.push_back(HistorySnapshot::new(store, label));
        self.cursor = 0;
    }

    /// The snapshot matching the live store.
    ///
    /// # Panics
    ///
    /// Panics if the stack is empty, which construction rules out.
    #[must_use]
    pub fn current(&self) -> &HistorySnapshot {
        &self.snapshots[self.cursor]
    }

    /// Index of the current snapshot.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of stored snapshots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Always false: the current state is always held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// True if `undo` would move.
    #[must_use]
    pub const fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// True if `redo` would move.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    /// Iterates snapshots from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &HistorySnapshot> {
        self.snapshots.iter()
    }
}

// =============================================================================
// Tests
// =============================================================================
