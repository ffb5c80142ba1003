//! The room entity.
//!
//! A room's identity is derived from its coordinates and cannot be set
//! independently. Attribute flags are keyed by registry ids and validated on
//! write; in JSON they sit flattened on the room object as top-level
//! booleans.

use std::collections::BTreeMap;

use mudmap_foundation::{Coord, Direction, Error, Result, RoomId};
use serde::{Deserialize, Deserializer, Serialize};

use crate::attribute::AttributeRegistry;

/// Keys a stored room uses for its own fields. Flags sit beside them on the
/// same object, so no attribute may take one of these ids.
pub const FIXED_FIELDS: [&str; 8] = [
    "id",
    "name",
    "title",
    "description",
    "exits",
    "x",
    "y",
    "tags",
];

/// A directed edge from a room to a destination path.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exit {
    /// Which way the exit leads.
    pub direction: Direction,
    /// A room name or a synthesized path. May dangle.
    pub destination: String,
}

impl Exit {
    /// Creates an exit.
    #[must_use]
    pub fn new(direction: Direction, destination: impl Into<String>) -> Self {
        Self {
            direction,
            destination: destination.into(),
        }
    }
}

/// The set of attribute flags turned on for a room.
///
/// Absent means false; only `true` entries are kept.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AttributeFlags(BTreeMap<String, bool>);

impl AttributeFlags {
    /// Returns whether `id` is on.
    #[must_use]
    pub fn is_set(&self, id: &str) -> bool {
        self.0.get(id).copied().unwrap_or(false)
    }

    /// Iterates the ids that are on, in id order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Number of flags that are on.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if no flag is on.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn set(&mut self, id: &str, value: bool) {
        if value {
            self.0.insert(id.to_string(), true);
        } else {
            self.0.remove(id);
        }
    }
}

impl<'de> Deserialize<'de> for AttributeFlags {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = BTreeMap::<String, bool>::deserialize(deserializer)?;
        Ok(Self(raw.into_iter().filter(|(_, on)| *on).collect()))
    }
}

/// One map cell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RoomRecord", into = "RoomRecord")]
pub struct Room {
    /// Script path, used as file name and as exit destination.
    pub name: String,
    /// Short description.
    pub title: String,
    /// Long description.
    pub description: String,
    /// Exits in the order they were added.
    pub exits: Vec<Exit>,
    /// Free-text labels.
    pub tags: Vec<String>,
    coord: Coord,
    attributes: AttributeFlags,
}

impl Room {
    /// Creates a room at `coord` with the editor's default name and title.
    #[must_use]
    pub fn new(coord: Coord) -> Self {
        Self {
            name: format!("room_{}_{}", coord.x, coord.y),
            title: format!("新房间 ({},{})", coord.x, coord.y),
            description: String::new(),
            exits: Vec::new(),
            tags: Vec::new(),
            coord,
            attributes: AttributeFlags::default(),
        }
    }

    /// The room's identity, `"<x>,<y>"`.
    #[must_use]
    pub fn id(&self) -> RoomId {
        self.coord.room_id()
    }

    /// The room's cell.
    #[must_use]
    pub const fn coord(&self) -> Coord {
        self.coord
    }

    /// Column.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.coord.x
    }

    /// Row.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.coord.y
    }

    /// Returns a copy of this room moved to `coord`.
    #[must_use]
    pub fn relocated(&self, coord: Coord) -> Self {
        Self {
            coord,
            ..self.clone()
        }
    }

    /// The flags turned on for this room.
    #[must_use]
    pub const fn attributes(&self) -> &AttributeFlags {
        &self.attributes
    }

    /// Returns whether attribute `id` is on.
    #[must_use]
    pub fn has_attribute(&self, id: &str) -> bool {
        self.attributes.is_set(id)
    }

    /// Turns attribute `id` on or off.
    ///
    /// # Errors
    ///
    /// Returns `UnknownAttribute` if `id` is not registered.
    pub fn set_attribute(&mut self, registry: &AttributeRegistry, id: &str, value: bool) -> Result<()> {
        if !registry.contains(id) {
            return Err(Error::unknown_attribute(id));
        }
        self.attributes.set(id, value);
        Ok(())
    }

    /// Drops flags whose ids are not in `registry`. Returns how many went.
    pub fn retain_registered(&mut self, registry: &AttributeRegistry) -> usize {
        let before = self.attributes.len();
        self.attributes.0.retain(|id, _| registry.contains(id));
        before - self.attributes.len()
    }

    /// Turns on every flag set in `attributes`, keeping the ones already on.
    pub(crate) fn merge_attributes(&mut self, attributes: &AttributeFlags) {
        for id in attributes.iter() {
            self.attributes.set(id, true);
        }
    }

    /// Appends a tag. Empty tags are ignored.
    pub fn add_tag(&mut self, tag: &str) -> bool {
        if tag.is_empty() {
            return false;
        }
        self.tags.push(tag.to_string());
        true
    }

    /// Removes every tag equal to `tag`.
    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t != tag);
        self.tags.len() != before
    }

    /// Case-insensitive substring match on name, title, and tags.
    ///
    /// `needle` must already be lowercase.
    #[must_use]
    pub fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.title.to_lowercase().contains(needle)
            || self.tags.iter().any(|t| t.to_lowercase().contains(needle))
    }

    /// The name with `prefix` removed, as shown in the name field.
    #[must_use]
    pub fn local_name<'a>(&'a self, prefix: &str) -> &'a str {
        self.name.strip_prefix(prefix).unwrap_or(&self.name)
    }
}

/// Wire shape of a room.
#[derive(Serialize, Deserialize)]
struct RoomRecord {
    #[serde(default)]
    id: Option<RoomId>,
    name: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    exits: Vec<Exit>,
    x: i32,
    y: i32,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(flatten)]
    attributes: AttributeFlags,
}

impl TryFrom<RoomRecord> for Room {
    type Error = Error;

    fn try_from(record: RoomRecord) -> Result<Self> {
        let coord = Coord::new(record.x, record.y);
        if let Some(id) = &record.id {
            if *id != coord.room_id() {
                return Err(Error::malformed_import(format!(
                    "room id {id} does not match coordinates ({coord})"
                )));
            }
        }
        Ok(Self {
            name: record.name,
            title: record.title,
            description: record.description,
            exits: record.exits,
            tags: record.tags,
            coord,
            attributes: record.attributes,
        })
    }
}

impl From<Room> for RoomRecord {
    fn from(room: Room) -> Self {
        Self {
            id: Some(room.id()),
            name: room.name,
            title: room.title,
            description: room.description,
            exits: room.exits,
            x: room.coord.x,
            y: room.coord.y,
            tags: room.tags,
            attributes: room.attributes,
        }
    }
}
