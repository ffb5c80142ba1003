//! The eight compass directions used to link rooms.
//!
//! The map grid has `y` growing southward, so north is `(0, -1)`. The ninth
//! button of the classic exit pad, `center`, is reserved and never becomes an
//! exit; [`Direction::parse_heading`] reports it as `None`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, ErrorKind};

/// A compass direction an exit can point in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// (-1, -1)
    Northwest,
    /// (0, -1)
    North,
    /// (1, -1)
    Northeast,
    /// (-1, 0)
    West,
    /// (1, 0)
    East,
    /// (-1, 1)
    Southwest,
    /// (0, 1)
    South,
    /// (1, 1)
    Southeast,
}

/// The reserved no-op heading.
pub const CENTER: &str = "center";

impl Direction {
    /// All directions in exit-pad order (row by row, center omitted).
    pub const ALL: [Direction; 8] = [
        Direction::Northwest,
        Direction::North,
        Direction::Northeast,
        Direction::West,
        Direction::East,
        Direction::Southwest,
        Direction::South,
        Direction::Southeast,
    ];

    /// Unit vector `(dx, dy)` for this direction.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::Northwest => (-1, -1),
            Self::North => (0, -1),
            Self::Northeast => (1, -1),
            Self::West => (-1, 0),
            Self::East => (1, 0),
            Self::Southwest => (-1, 1),
            Self::South => (0, 1),
            Self::Southeast => (1, 1),
        }
    }

    /// The reverse direction.
    ///
    /// Linking is one-directional: nothing in the editor uses this to add a
    /// matching exit on the neighbor.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Northwest => Self::Southeast,
            Self::North => Self::South,
            Self::Northeast => Self::Southwest,
            Self::West => Self::East,
            Self::East => Self::West,
            Self::Southwest => Self::Northeast,
            Self::South => Self::North,
            Self::Southeast => Self::Northwest,
        }
    }

    /// Lowercase name as written in scripts and JSON.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Northwest => "northwest",
            Self::North => "north",
            Self::Northeast => "northeast",
            Self::West => "west",
            Self::East => "east",
            Self::Southwest => "southwest",
            Self::South => "south",
            Self::Southeast => "southeast",
        }
    }

    /// Display label used by the editor.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Northwest => "西北",
            Self::North => "北",
            Self::Northeast => "东北",
            Self::West => "西",
            Self::East => "东",
            Self::Southwest => "西南",
            Self::South => "南",
            Self::Southeast => "东南",
        }
    }

    /// Parses a heading, treating `center` as a valid no-op.
    ///
    /// # Errors
    ///
    /// Returns `UnknownDirection` for anything that is neither a compass
    /// direction nor `center`.
    pub fn parse_heading(s: &str) -> Result<Option<Self>, Error> {
        if s.eq_ignore_ascii_case(CENTER) {
            return Ok(None);
        }
        s.parse().map(Some)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let dir = match lower.as_str() {
            "northwest" | "nw" => Self::Northwest,
            "north" | "n" => Self::North,
            "northeast" | "ne" => Self::Northeast,
            "west" | "w" => Self::West,
            "east" | "e" => Self::East,
            "southwest" | "sw" => Self::Southwest,
            "south" | "s" => Self::South,
            "southeast" | "se" => Self::Southeast,
            _ => return Err(Error::new(ErrorKind::UnknownDirection(s.to_string()))),
        };
        Ok(dir)
    }
}
