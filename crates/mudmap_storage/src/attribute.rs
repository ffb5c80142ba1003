//! Registry of boolean room attributes.
//!
//! The registry's insertion order is significant: generated scripts emit
//! flag assignments in this order.

use mudmap_foundation::{Error, ErrorKind, Result};
use serde::{Deserialize, Serialize};

use crate::room::FIXED_FIELDS;

/// A recognized attribute flag.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeEntry {
    /// Key stored on rooms and emitted in scripts.
    pub id: String,
    /// Display name.
    pub name: String,
}

impl AttributeEntry {
    /// Creates an entry.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Ordered catalog of attribute flags with unique ids.
///
/// Entries are never removed once registered.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<AttributeEntry>", into = "Vec<AttributeEntry>")]
pub struct AttributeRegistry {
    entries: Vec<AttributeEntry>,
}

impl AttributeRegistry {
    /// Creates a registry with no entries.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Builds a registry from existing entries, checking id uniqueness.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateAttributeId` for the first repeated id, or
    /// `InvalidAttribute` for an empty or reserved id.
    pub fn from_entries(entries: impl IntoIterator<Item = AttributeEntry>) -> Result<Self> {
        let mut registry = Self::empty();
        for entry in entries {
            registry.register(entry.id, entry.name)?;
        }
        Ok(registry)
    }

    /// Registers a new attribute at the end of the registry.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateAttributeId` if `id` is already present and
    /// `InvalidAttribute` if `id` or `name` is empty or `id` names a fixed
    /// room field. The registry is left unchanged on error.
    pub fn register(&mut self, id: impl Into<String>, name: impl Into<String>) -> Result<()> {
        let id = id.into();
        let name = name.into();
        if id.trim().is_empty() {
            return Err(Error::new(ErrorKind::InvalidAttribute(
                "attribute id must not be empty".to_string(),
            )));
        }
        if FIXED_FIELDS.contains(&id.as_str()) {
            return Err(Error::new(ErrorKind::InvalidAttribute(format!(
                "{id} is a room field, not a flag"
            ))));
        }
        if name.trim().is_empty() {
            return Err(Error::new(ErrorKind::InvalidAttribute(format!(
                "attribute {id} needs a display name"
            ))));
        }
        if self.contains(&id) {
            return Err(Error::duplicate_attribute(id));
        }
        log::debug!("registered attribute {id} ({name})");
        self.entries.push(AttributeEntry { id, name });
        Ok(())
    }

    /// Returns true if `id` is registered.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    /// Looks up an entry by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&AttributeEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &AttributeEntry> {
        self.entries.iter()
    }

    /// Returns the entries as a slice.
    #[must_use]
    pub fn entries(&self) -> &[AttributeEntry] {
        &self.entries
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for AttributeRegistry {
    /// The stock flags every map starts with.
    fn default() -> Self {
        Self {
            entries: vec![
                AttributeEntry::new("no_fight", "禁止战斗"),
                AttributeEntry::new("fuben", "副本地图"),
                AttributeEntry::new("no_showroom", "禁止传送"),
                AttributeEntry::new("outdoors", "室外"),
            ],
        }
    }
}

impl TryFrom<Vec<AttributeEntry>> for AttributeRegistry {
    type Error = Error;

    fn try_from(entries: Vec<AttributeEntry>) -> Result<Self> {
        Self::from_entries(entries)
    }
}

impl From<AttributeRegistry> for Vec<AttributeEntry> {
    fn from(registry: AttributeRegistry) -> Self {
        registry.entries
    }
}
