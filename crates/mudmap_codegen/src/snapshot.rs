//! Map snapshot import.
//!
//! The snapshot document is `{ "rooms": [...], "attributeTemplates": [...] }`,
//! the same shape [`export_all`](crate::export_all) writes as
//! [`MAP_DATA_FILE`](crate::MAP_DATA_FILE).

use std::fs;
use std::path::Path;

use mudmap_foundation::{Error, ErrorContext, Result};
use mudmap_storage::{AttributeRegistry, Room, RoomStore};
use serde::{Deserialize, Serialize};

/// A parsed snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapData {
    /// Rooms in stored order. Duplicate ids are tolerated.
    pub rooms: Vec<Room>,
    /// The attribute registry that replaces the live one.
    #[serde(rename = "attributeTemplates")]
    pub attribute_templates: AttributeRegistry,
}

impl MapData {
    /// The rooms as a store.
    #[must_use]
    pub fn room_store(&self) -> RoomStore {
        self.rooms.iter().cloned().collect()
    }
}

/// Parses a snapshot document.
///
/// Flags naming attributes absent from the document's own registry are
/// dropped with a warning.
///
/// # Errors
///
/// Returns `MalformedImport` if the text is not JSON, a required key is
/// missing, a room id disagrees with its coordinates, or the registry
/// repeats an id.
pub fn import_all(json: &str) -> Result<MapData> {
    let mut data: MapData =
        serde_json::from_str(json).map_err(|e| Error::malformed_import(e.to_string()))?;

    for room in &mut data.rooms {
        let dropped = room.retain_registered(&data.attribute_templates);
        if dropped > 0 {
            log::warn!(
                "room {} had {dropped} flag(s) for unregistered attributes, dropped",
                room.id()
            );
        }
    }

    log::info!(
        "imported {} room(s) and {} attribute(s)",
        data.rooms.len(),
        data.attribute_templates.len()
    );
    Ok(data)
}

/// Reads and parses a snapshot file.
///
/// # Errors
///
/// Returns `IoError` if the file cannot be read, otherwise as
/// [`import_all`]. Either way the error carries the path.
pub fn import_file(path: impl AsRef<Path>) -> Result<MapData> {
    let path = path.as_ref();
    let context = || ErrorContext::new().with_source(path.display().to_string());
    let text = fs::read_to_string(path).map_err(|e| Error::io(e.to_string()).with_context(context()))?;
    import_all(&text).map_err(|e| e.with_context(context()))
}
