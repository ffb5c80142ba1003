//! Editor session, persistence, shell, and CLI for mudmap.
//!
//! This crate provides:
//! - [`Session`] - The editing state and every map-editing operation
//! - [`Persistence`] - Loading and saving rooms, templates, and prefixes
//! - [`Command`] - Parsed shell commands
//! - [`Repl`] - Interactive shell over any [`LineEditor`]

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod command;
pub mod config;
pub mod editor;
pub mod persist;
pub mod repl;
pub mod session;
pub mod view;

pub use command::Command;
pub use config::SessionConfig;
pub use editor::{LineEditor, ReadResult, RustylineEditor};
pub use persist::{FileStore, KeyValueStore, Loaded, MemoryStore, Persistence};
pub use repl::Repl;
pub use session::{ClickOutcome, Session};
pub use view::ViewState;
