//! The authoritative room collection.
//!
//! Rooms are kept in insertion order in a persistent vector, so cloning the
//! whole store is O(1) and a clone shares structure with the original. The
//! history layer relies on this to snapshot after every commit.

use mudmap_foundation::{Coord, Error, Result, RoomId};
use serde::{Deserialize, Serialize};

use crate::room::Room;

/// All rooms on the map.
///
/// `create` refuses occupied cells. `copy` and wholesale replacement do not
/// check, so a store built that way may hold two rooms with one id; lookups
/// then return the first and `update`/`delete` touch all of them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomStore {
    rooms: im::Vector<Room>,
}

impl RoomStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of rooms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    /// Returns true if the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Iterates rooms in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Room> {
        self.rooms.iter()
    }

    /// Looks up a room by id.
    #[must_use]
    pub fn get(&self, id: &RoomId) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id() == *id)
    }

    /// Looks up the room occupying `coord`.
    #[must_use]
    pub fn at(&self, coord: Coord) -> Option<&Room> {
        self.rooms.iter().find(|r| r.coord() == coord)
    }

    /// Places a new default room at `coord`.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateCoordinate` if a room already occupies `coord`.
    pub fn create(&mut self, coord: Coord) -> Result<Room> {
        if self.at(coord).is_some() {
            return Err(Error::duplicate_coordinate(coord.x, coord.y));
        }
        let room = Room::new(coord);
        log::debug!("created room {} at ({coord})", room.name);
        self.rooms.push_back(room.clone());
        Ok(room)
    }

    /// Replaces every stored room whose id matches `room`.
    ///
    /// Returns false (and changes nothing) when no room matches.
    pub fn update(&mut self, room: &Room) -> bool {
        let id = room.id();
        let mut matched = false;
        for slot in self.rooms.iter_mut() {
            if slot.id() == id {
                *slot = room.clone();
                matched = true;
            }
        }
        if !matched {
            log::debug!("update of {id} matched no stored room");
        }
        matched
    }

    /// Removes every room with this id. Exits elsewhere that point at it
    /// are left dangling.
    pub fn delete(&mut self, id: &RoomId) -> bool {
        let before = self.rooms.len();
        self.rooms.retain(|r| r.id() != *id);
        let removed = before != self.rooms.len();
        if removed {
            log::debug!("deleted room {id}");
        }
        removed
    }

    /// Appends a copy of `room` one cell south-east, named `<name>_copy`.
    ///
    /// The target cell is not checked; if it is occupied, the store ends up
    /// with two rooms sharing an id and the next `update` overwrites both.
    ///
    /// # Errors
    ///
    /// Returns `OffGrid` if `room` sits on the south or east edge of the
    /// coordinate range. The store is unchanged.
    pub fn copy(&mut self, room: &Room) -> Result<Room> {
        let target = room.coord().offset(1, 1)?;
        if let Some(occupant) = self.at(target) {
            log::warn!(
                "copy of {} lands on occupied cell ({target}) held by {}",
                room.name,
                occupant.name
            );
        }
        let mut copy = room.relocated(target);
        copy.name = format!("{}_copy", room.name);
        self.rooms.push_back(copy.clone());
        Ok(copy)
    }

    /// Rooms whose name, title, or any tag contains `term`, ignoring case.
    ///
    /// The iterator is lazy and single-use; call again to refresh.
    pub fn search<'a>(&'a self, term: &str) -> impl Iterator<Item = &'a Room> + use<'a> {
        let needle = term.to_lowercase();
        self.rooms.iter().filter(move |r| r.matches(&needle))
    }

    /// Removes every room.
    pub fn clear(&mut self) {
        self.rooms.clear();
    }

    /// A structurally shared copy of the current contents.
    #[must_use]
    pub fn snapshot(&self) -> Self {
        self.clone()
    }

    /// Replaces the contents wholesale with `snapshot`.
    pub fn restore(&mut self, snapshot: &Self) {
        self.rooms = snapshot.rooms.clone();
    }

    /// Copies the rooms out in insertion order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<Room> {
        self.rooms.iter().cloned().collect()
    }
}

impl FromIterator<Room> for RoomStore {
    fn from_iter<I: IntoIterator<Item = Room>>(iter: I) -> Self {
        Self {
            rooms: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a RoomStore {
    type Item = &'a Room;
    type IntoIter = im::vector::Iter<'a, Room>;

    fn into_iter(self) -> Self::IntoIter {
        self.rooms.iter()
    }
}
