//! Integration tests for Error types
//!
//! Tests error construction, display, and context.

use mudmap_foundation::{Error, ErrorContext, ErrorKind};

// =============================================================================
// Error Construction
// =============================================================================

#[test]
fn duplicate_coordinate_names_the_cell() {
    let err = Error::duplicate_coordinate(3, -4);
    assert!(matches!(err.kind, ErrorKind::DuplicateCoordinate { x: 3, y: -4 }));
    assert!(err.to_string().contains("(3,-4)"));
}

#[test]
fn helpers_pick_their_kind() {
    assert!(Error::duplicate_attribute("dark").is(&ErrorKind::DuplicateAttributeId("dark".into())));
    assert!(Error::unknown_attribute("x").is(&ErrorKind::UnknownAttribute("x".into())));
    assert!(matches!(Error::malformed_import("bad").kind, ErrorKind::MalformedImport(_)));
    assert!(matches!(Error::archive_failure("bad").kind, ErrorKind::ArchiveAssemblyFailure(_)));
    assert!(matches!(Error::io("bad").kind, ErrorKind::IoError(_)));
    assert!(matches!(Error::serialization("bad").kind, ErrorKind::SerializationError(_)));
    assert!(matches!(Error::invalid_command("bad").kind, ErrorKind::InvalidCommand(_)));
}

// =============================================================================
// Error Display
// =============================================================================

#[test]
fn display_messages() {
    let err = Error::new(ErrorKind::ExitIndexOutOfBounds { index: 4, length: 2 });
    assert_eq!(err.to_string(), "exit index out of bounds: 4 (length 2)");
    assert_eq!(Error::new(ErrorKind::NoActiveRoom).to_string(), "no room is being edited");
    assert_eq!(
        Error::new(ErrorKind::ConfirmationRequired("clear".into())).to_string(),
        "clear requires confirmation"
    );
}

// =============================================================================
// Error Context
// =============================================================================

#[test]
fn context_records_source_and_frames() {
    let err = Error::malformed_import("expected value").with_context(
        ErrorContext::new()
            .with_source("maps/city.json")
            .with_frame("import"),
    );
    let context = err.context.as_ref().unwrap();
    assert_eq!(context.source.as_deref(), Some("maps/city.json"));
    assert_eq!(context.stack, ["import"]);

    let shown = context.to_string();
    assert!(shown.starts_with("at maps/city.json"));
    assert!(shown.contains("  in import"));
}

#[test]
fn error_without_context() {
    assert!(Error::io("gone").context.is_none());
}
