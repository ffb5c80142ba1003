//! Undo/redo history for mudmap.
//!
//! Provides a cursor-addressed stack of full [`RoomStore`] snapshots.
//!
//! # Features
//!
//! - **Commit**: Append a snapshot, discarding any redo branch
//! - **Undo/Redo**: Move the cursor without touching stored snapshots
//! - **Capacity**: Optional cap that drops the oldest snapshot
//!
//! [`RoomStore`]: mudmap_storage::RoomStore

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod history;

pub use config::HistoryConfig;
pub use history::{HistorySnapshot, HistoryStack};
