//! LPC room script generation, archive export, and map import for mudmap.
//!
//! This crate provides:
//! - [`CodeGenerator`] - Deterministic room-to-script transform
//! - [`export_all`] / [`Archive`] - Bundling scripts and the JSON snapshot
//! - [`import_all`] / [`MapData`] - Parsing a snapshot back into rooms and attributes

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod archive;
pub mod generator;
pub mod snapshot;

pub use archive::{Archive, ArchiveEntry, DEFAULT_ARCHIVE_NAME, MAP_DATA_FILE, export_all};
pub use generator::{CodeGenerator, GeneratorConfig};
pub use snapshot::{MapData, import_all, import_file};
