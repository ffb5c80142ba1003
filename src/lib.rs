//! mudmap - Grid-based room editor for LPC MUDs
//!
//! This crate re-exports all layers of the mudmap system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 4: mudmap_runtime    - Session, persistence, shell, CLI
//! Layer 3: mudmap_codegen    - LPC script generation, zip export, JSON import
//! Layer 2: mudmap_history    - Snapshot undo/redo stack
//! Layer 1: mudmap_storage    - Rooms, attribute registry, templates, prefixes
//! Layer 0: mudmap_foundation - Core types (Coord, Direction, Error)
//! ```

pub use mudmap_codegen as codegen;
pub use mudmap_foundation as foundation;
pub use mudmap_history as history;
pub use mudmap_runtime as runtime;
pub use mudmap_storage as storage;
