//! Error types for the mudmap system.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.

use std::fmt;

use thiserror::Error;

/// Result type alias for mudmap operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for mudmap operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates a duplicate coordinate error.
    #[must_use]
    pub fn duplicate_coordinate(x: i32, y: i32) -> Self {
        Self::new(ErrorKind::DuplicateCoordinate { x, y })
    }

    /// Creates a duplicate attribute id error.
    #[must_use]
    pub fn duplicate_attribute(id: impl Into<String>) -> Self {
        Self::new(ErrorKind::DuplicateAttributeId(id.into()))
    }

    /// Creates an unknown attribute error.
    #[must_use]
    pub fn unknown_attribute(id: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownAttribute(id.into()))
    }

    /// Creates a malformed import error.
    #[must_use]
    pub fn malformed_import(reason: impl Into<String>) -> Self {
        Self::new(ErrorKind::MalformedImport(reason.into()))
    }

    /// Creates an archive assembly error.
    #[must_use]
    pub fn archive_failure(reason: impl Into<String>) -> Self {
        Self::new(ErrorKind::ArchiveAssemblyFailure(reason.into()))
    }

    /// Creates an I/O error.
    #[must_use]
    pub fn io(reason: impl Into<String>) -> Self {
        Self::new(ErrorKind::IoError(reason.into()))
    }

    /// Creates a serialization error.
    #[must_use]
    pub fn serialization(reason: impl Into<String>) -> Self {
        Self::new(ErrorKind::SerializationError(reason.into()))
    }

    /// Creates an invalid command error.
    #[must_use]
    pub fn invalid_command(reason: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidCommand(reason.into()))
    }

    /// Returns true if this error is of the given kind, ignoring payloads.
    #[must_use]
    pub fn is(&self, kind: &ErrorKind) -> bool {
        std::mem::discriminant(&self.kind) == std::mem::discriminant(kind)
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// A room already occupies the requested cell.
    #[error("a room already exists at ({x},{y})")]
    DuplicateCoordinate {
        /// Column of the occupied cell.
        x: i32,
        /// Row of the occupied cell.
        y: i32,
    },

    /// An attribute with this id is already registered.
    #[error("attribute id already exists: {0}")]
    DuplicateAttributeId(String),

    /// An attribute definition was rejected.
    #[error("invalid attribute: {0}")]
    InvalidAttribute(String),

    /// A flag write named an attribute the registry does not know.
    #[error("unknown attribute: {0}")]
    UnknownAttribute(String),

    /// An import document could not be parsed or had the wrong shape.
    #[error("malformed import: {0}")]
    MalformedImport(String),

    /// Building the export container failed.
    #[error("archive assembly failed: {0}")]
    ArchiveAssemblyFailure(String),

    /// The operation needs an active room and none is selected.
    #[error("no room is being edited")]
    NoActiveRoom,

    /// Exit index out of bounds.
    #[error("exit index out of bounds: {index} (length {length})")]
    ExitIndexOutOfBounds {
        /// The index that was accessed.
        index: usize,
        /// The number of exits on the room.
        length: usize,
    },

    /// No template at this position.
    #[error("template not found: {0}")]
    TemplateNotFound(usize),

    /// A neighbor cell would fall outside the representable grid.
    #[error("no cell at offset ({dx},{dy}) from ({x},{y})")]
    OffGrid {
        /// Column of the starting cell.
        x: i32,
        /// Row of the starting cell.
        y: i32,
        /// Column step.
        dx: i32,
        /// Row step.
        dy: i32,
    },

    /// Text that is not a compass direction.
    #[error("unknown direction: {0}")]
    UnknownDirection(String),

    /// A destructive action was requested without confirmation.
    #[error("{0} requires confirmation")]
    ConfirmationRequired(String),

    /// Serialization or deserialization failed.
    #[error("serialization error: {0}")]
    SerializationError(String),

    /// File system or key-value store failure.
    #[error("I/O error: {0}")]
    IoError(String),

    /// Shell input could not be understood.
    #[error("invalid command: {0}")]
    InvalidCommand(String),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// File path or store key involved.
    pub source: Option<String>,
    /// Operations that were in progress, outermost first.
    pub stack: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source location.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Adds a frame.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.stack.push(frame.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(source) = &self.source {
            write!(f, "at {source}")?;
        }
        if !self.stack.is_empty() {
            writeln!(f)?;
            for frame in &self.stack {
                writeln!(f, "  in {frame}")?;
            }
        }
        Ok(())
    }
}
