//! Exit destination rules.
//!
//! An exit added in direction `d` from a room at `(x, y)` points at the room
//! occupying `(x + dx, y + dy)` if there is one, and otherwise at a
//! synthesized path `<prefix>room_<nx>,<ny>` naming the empty cell. Links are
//! one-directional; the neighbor never gets a matching return exit.
//!
//! Destinations are resolved once, when the exit is added. A room created
//! later at the target cell does not rewrite existing exits.

use mudmap_foundation::{Coord, Direction, Result};

use crate::room::{Exit, Room};
use crate::store::RoomStore;

/// Path used for an exit toward an empty cell.
#[must_use]
pub fn synthesized_destination(prefix: &str, coord: Coord) -> String {
    format!("{prefix}room_{},{}", coord.x, coord.y)
}

/// Destination for an exit leaving `from` in `direction`.
///
/// # Errors
///
/// Returns `OffGrid` if `from` sits on the edge of the coordinate range.
pub fn destination_for(
    store: &RoomStore,
    from: Coord,
    direction: Direction,
    prefix: &str,
) -> Result<String> {
    let (dx, dy) = direction.delta();
    let target = from.offset(dx, dy)?;
    Ok(match store.at(target) {
        Some(neighbor) => neighbor.name.clone(),
        None => synthesized_destination(prefix, target),
    })
}

/// Returns `room` with a new exit toward `heading` appended.
///
/// Yields `Ok(None)` when there is no active room or the heading is the
/// reserved `center`. Repeated directions are allowed.
///
/// # Errors
///
/// Returns `UnknownDirection` if `heading` is not a compass direction, or
/// `OffGrid` if the neighbor cell is out of range.
pub fn add_exit(
    store: &RoomStore,
    room: Option<&Room>,
    heading: &str,
    prefix: &str,
) -> Result<Option<Room>> {
    let Some(direction) = Direction::parse_heading(heading)? else {
        return Ok(None);
    };
    let Some(room) = room else {
        return Ok(None);
    };

    let destination = destination_for(store, room.coord(), direction, prefix)?;
    let mut updated = room.clone();
    updated.exits.push(Exit::new(direction, destination));
    Ok(Some(updated))
}
