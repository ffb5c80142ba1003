//! Core types, coordinates, directions, and errors for mudmap.
//!
//! This crate provides:
//! - [`Coord`] and [`RoomId`] - Grid positions and the identities derived from them
//! - [`Direction`] - The eight compass directions and their unit vectors
//! - [`Error`] - Rich error types with context

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod coord;
pub mod direction;
pub mod error;

pub use coord::{Coord, RoomId};
pub use direction::Direction;
pub use error::{Error, ErrorContext, ErrorKind, Result};
