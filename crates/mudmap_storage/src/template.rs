//! Reusable room presets.
//!
//! A template carries everything about a room except where it is. Applying
//! one overwrites each carried field on the target wholesale: the target's
//! exits and tags are replaced, not merged. Flags are keyed individually, so
//! only the flags the template has on are written; the target keeps its own.

use mudmap_foundation::{Error, ErrorKind, Result};
use serde::{Deserialize, Serialize};

use crate::room::{AttributeFlags, Exit, Room};

/// The non-identity fields of a room.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateRoom {
    /// Script path.
    #[serde(default)]
    pub name: String,
    /// Short description.
    #[serde(default)]
    pub title: String,
    /// Long description.
    #[serde(default)]
    pub description: String,
    /// Exits, replacing the target's on apply.
    #[serde(default)]
    pub exits: Vec<Exit>,
    /// Tags, replacing the target's on apply.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Flags turned on in the target on apply.
    #[serde(flatten)]
    pub attributes: AttributeFlags,
}

impl TemplateRoom {
    /// Captures `room` without its id and coordinates.
    #[must_use]
    pub fn from_room(room: &Room) -> Self {
        Self {
            name: room.name.clone(),
            title: room.title.clone(),
            description: room.description.clone(),
            exits: room.exits.clone(),
            tags: room.tags.clone(),
            attributes: room.attributes().clone(),
        }
    }

    /// Returns `target` with every template field written over it.
    ///
    /// Flags are added to the target's rather than replacing them.
    #[must_use]
    pub fn apply_to(&self, target: &Room) -> Room {
        let mut room = target.clone();
        room.name.clone_from(&self.name);
        room.title.clone_from(&self.title);
        room.description.clone_from(&self.description);
        room.exits.clone_from(&self.exits);
        room.tags.clone_from(&self.tags);
        room.merge_attributes(&self.attributes);
        room
    }
}

/// A named preset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    /// Display name, `模板_<n>`.
    pub name: String,
    /// The captured fields.
    pub room: TemplateRoom,
}

/// Ordered list of saved templates. Nothing is ever pruned.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateStore {
    templates: Vec<Template>,
}

impl TemplateStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshots `room` as a new template named after its position.
    pub fn save(&mut self, room: &Room) -> &Template {
        let name = format!("模板_{}", self.templates.len() + 1);
        log::debug!("saved {} as template {name}", room.name);
        self.templates.push(Template {
            name,
            room: TemplateRoom::from_room(room),
        });
        &self.templates[self.templates.len() - 1]
    }

    /// Applies the template at `index` onto `target`.
    ///
    /// # Errors
    ///
    /// Returns `TemplateNotFound` if `index` is out of range.
    pub fn apply(&self, index: usize, target: &Room) -> Result<Room> {
        self.get(index)
            .map(|t| t.room.apply_to(target))
            .ok_or_else(|| Error::new(ErrorKind::TemplateNotFound(index)))
    }

    /// Template at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Template> {
        self.templates.get(index)
    }

    /// Iterates templates in save order.
    pub fn iter(&self) -> impl Iterator<Item = &Template> {
        self.templates.iter()
    }

    /// Number of templates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// True if no template has been saved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
