//! Export archive assembly.
//!
//! An export bundles one generated script per room with a JSON snapshot of
//! the rooms and the attribute registry. The archive is built fully in
//! memory; a file is only written once the container bytes exist, so a
//! failed export never leaves a partial archive behind.

use std::fs;
use std::io::{Cursor, Write};
use std::path::Path;

use mudmap_foundation::{Error, ErrorContext, Result};
use mudmap_storage::{AttributeRegistry, RoomStore};
use serde::Serialize;
use zip::CompressionMethod;
use zip::write::SimpleFileOptions;

use crate::generator::CodeGenerator;

/// Name of the snapshot entry inside an export archive.
pub const MAP_DATA_FILE: &str = "map_data.json";

/// File name offered for a fresh export.
pub const DEFAULT_ARCHIVE_NAME: &str = "mud_rooms.zip";

// =============================================================================
// Archive
// =============================================================================

/// One file inside an archive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Relative path inside the container.
    pub path: String,
    /// File contents.
    pub contents: String,
}

/// An ordered set of files, unique by path.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Archive {
    entries: Vec<ArchiveEntry>,
}

impl Archive {
    /// Creates an empty archive.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file. A later file with the same path replaces the earlier one
    /// in place.
    pub fn add(&mut self, path: impl Into<String>, contents: impl Into<String>) {
        let path = path.into();
        let contents = contents.into();
        if let Some(existing) = self.entries.iter_mut().find(|e| e.path == path) {
            log::warn!("archive already holds {path}, replacing it");
            existing.contents = contents;
        } else {
            self.entries.push(ArchiveEntry { path, contents });
        }
    }

    /// Entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[ArchiveEntry] {
        &self.entries
    }

    /// Looks up an entry's contents by path.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.path == path)
            .map(|e| e.contents.as_str())
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the archive holds nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Assembles the zip container.
    ///
    /// # Errors
    ///
    /// Returns `ArchiveAssemblyFailure` if the zip writer rejects an entry.
    pub fn to_zip_bytes(&self) -> Result<Vec<u8>> {
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));

        for entry in &self.entries {
            writer
                .start_file(entry.path.as_str(), options)
                .map_err(|e| Error::archive_failure(format!("{}: {e}", entry.path)))?;
            writer
                .write_all(entry.contents.as_bytes())
                .map_err(|e| Error::archive_failure(format!("{}: {e}", entry.path)))?;
        }

        let cursor = writer
            .finish()
            .map_err(|e| Error::archive_failure(e.to_string()))?;
        Ok(cursor.into_inner())
    }

    /// Assembles the container and writes it to `path`.
    ///
    /// # Errors
    ///
    /// Returns `ArchiveAssemblyFailure` if assembly fails (nothing is
    /// written), or `IoError` if the file cannot be written.
    pub fn write_zip(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.to_zip_bytes()?;
        fs::write(path, &bytes).map_err(|e| {
            Error::io(e.to_string())
                .with_context(ErrorContext::new().with_source(path.display().to_string()))
        })?;
        log::info!(
            "wrote {} file(s) ({} bytes) to {}",
            self.entries.len(),
            bytes.len(),
            path.display()
        );
        Ok(())
    }
}

// =============================================================================
// Export
// =============================================================================

#[derive(Serialize)]
struct MapDataRef<'a> {
    rooms: &'a RoomStore,
    #[serde(rename = "attributeTemplates")]
    attribute_templates: &'a AttributeRegistry,
}

/// Builds the export archive: one script per room plus [`MAP_DATA_FILE`].
///
/// Script paths are the room name with its leading `/` removed, so
/// `/d/city/hall` lands at `d/city/hall.c`.
///
/// # Errors
///
/// Returns `SerializationError` if the snapshot cannot be encoded.
pub fn export_all(
    rooms: &RoomStore,
    registry: &AttributeRegistry,
    generator: &CodeGenerator,
) -> Result<Archive> {
    let mut archive = Archive::new();
    for room in rooms {
        let file_name = generator.file_name(room);
        archive.add(
            file_name.trim_start_matches('/'),
            generator.generate(room, registry),
        );
    }

    let data = MapDataRef {
        rooms,
        attribute_templates: registry,
    };
    let json = serde_json::to_string(&data).map_err(|e| Error::serialization(e.to_string()))?;
    archive.add(MAP_DATA_FILE, json);

    log::info!("exported {} room(s)", rooms.len());
    Ok(archive)
}
