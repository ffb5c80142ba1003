//! Rooms, attribute registry, exit linking, templates, and prefixes for mudmap.
//!
//! This crate provides:
//! - [`Room`] - One map cell with text, exits, tags, and attribute flags
//! - [`AttributeRegistry`] - Ordered catalog of recognized boolean flags
//! - [`RoomStore`] - Authoritative room collection with cheap snapshots
//! - [`linker`] - Coordinate-based exit destination rules
//! - [`TemplateStore`] - Reusable partial-room presets
//! - [`PrefixStore`] - Namespace prefixes used to compose room names

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod attribute;
pub mod linker;
pub mod prefix;
pub mod room;
pub mod store;
pub mod template;

pub use attribute::{AttributeEntry, AttributeRegistry};
pub use prefix::PrefixStore;
pub use room::{AttributeFlags, Exit, FIXED_FIELDS, Room};
pub use store::RoomStore;
pub use template::{Template, TemplateRoom, TemplateStore};
