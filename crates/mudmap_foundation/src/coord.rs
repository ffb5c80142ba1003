//! Grid coordinates and the room identities derived from them.
//!
//! A room's identity is never assigned independently: it is always the
//! canonical `"<x>,<y>"` rendering of its cell.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, ErrorKind};

/// A cell on the map grid. `y` grows southward.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

impl Coord {
    /// Creates a coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the cell displaced by `(dx, dy)`.
    ///
    /// # Errors
    ///
    /// Returns `OffGrid` if either axis leaves the `i32` range.
    pub fn offset(self, dx: i32, dy: i32) -> Result<Self, Error> {
        match (self.x.checked_add(dx), self.y.checked_add(dy)) {
            (Some(x), Some(y)) => Ok(Self { x, y }),
            _ => Err(Error::new(ErrorKind::OffGrid {
                x: self.x,
                y: self.y,
                dx,
                dy,
            })),
        }
    }

    /// Returns the identity of the room occupying this cell.
    #[must_use]
    pub fn room_id(self) -> RoomId {
        RoomId::from(self)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

impl FromStr for Coord {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::new(ErrorKind::InvalidCommand(format!("not a coordinate: {s}")));
        let (x, y) = s.split_once(',').ok_or_else(invalid)?;
        let x = x.trim().parse().map_err(|_| invalid())?;
        let y = y.trim().parse().map_err(|_| invalid())?;
        Ok(Self { x, y })
    }
}

/// Canonical room identity, always `"<x>,<y>"`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(String);

impl RoomId {
    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parses the id back into the coordinate it names.
    ///
    /// Returns `None` if the id is not in canonical form.
    #[must_use]
    pub fn coord(&self) -> Option<Coord> {
        let coord: Coord = self.0.parse().ok()?;
        (coord.room_id() == *self).then_some(coord)
    }
}

impl From<Coord> for RoomId {
    fn from(coord: Coord) -> Self {
        Self(coord.to_string())
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for RoomId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for RoomId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
