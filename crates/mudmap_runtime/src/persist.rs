//! Persistence of rooms, templates, and prefixes.
//!
//! Three independent JSON records live under fixed keys in a key-value
//! store. Each is loaded once when a session opens and rewritten in full
//! whenever it changed. Undo history and the attribute registry are not
//! persisted.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use mudmap_foundation::{Error, ErrorContext, Result};
use mudmap_storage::{PrefixStore, RoomStore, TemplateStore};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Key of the room list record.
pub const ROOMS_KEY: &str = "mudRooms";
/// Key of the template list record.
pub const TEMPLATES_KEY: &str = "mudTemplates";
/// Key of the prefix list record.
pub const PREFIXES_KEY: &str = "mudPrefixes";

/// Key an unreadable record is copied to before it can be overwritten.
#[must_use]
pub fn backup_key(key: &str) -> String {
    format!("{key}.bak")
}

// =============================================================================
// Key-Value Stores
// =============================================================================

/// A string-keyed store of string records.
pub trait KeyValueStore {
    /// Reads the record under `key`, or `None` if there is none.
    ///
    /// # Errors
    ///
    /// Returns `IoError` if the backing medium cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Writes `value` under `key`, replacing any previous record.
    ///
    /// # Errors
    ///
    /// Returns `IoError` if the backing medium cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Records held in memory for the life of the process.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    records: HashMap<String, String>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store preloaded with `records`.
    #[must_use]
    pub fn with_records<K, V>(records: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            records: records
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.records.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.records.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One `<key>.json` file per record inside a directory.
///
/// The directory is created on the first write.
#[derive(Clone, Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Creates a store rooted at `dir`.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory holding the records.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`.
    #[must_use]
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

fn io_error(path: &Path, err: &std::io::Error) -> Error {
    Error::io(err.to_string()).with_context(ErrorContext::new().with_source(path.display().to_string()))
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(&path, &e)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir).map_err(|e| io_error(&self.dir, &e))?;
        let path = self.path_for(key);
        fs::write(&path, value).map_err(|e| io_error(&path, &e))
    }
}

// =============================================================================
// Persistence
// =============================================================================

/// Records found at load time. A missing or unreadable record is `None`.
#[derive(Clone, Debug, Default)]
pub struct Loaded {
    /// The saved rooms.
    pub rooms: Option<RoomStore>,
    /// The saved templates.
    pub templates: Option<TemplateStore>,
    /// The saved prefix list.
    pub prefixes: Option<PrefixStore>,
}

/// Typed access to the three records over any [`KeyValueStore`].
pub struct Persistence {
    store: Box<dyn KeyValueStore>,
}

impl Persistence {
    /// Wraps `store`.
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        Self {
            store: Box::new(store),
        }
    }

    /// Persistence that forgets everything on exit.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }

    /// The underlying store.
    #[must_use]
    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    /// Reads all three records.
    ///
    /// # Errors
    ///
    /// Returns `IoError` if the store itself fails. Records that exist but
    /// do not parse are copied to [`backup_key`], logged, and reported as
    /// absent.
    pub fn load(&mut self) -> Result<Loaded> {
        Ok(Loaded {
            rooms: self.read(ROOMS_KEY)?,
            templates: self.read(TEMPLATES_KEY)?,
            prefixes: self.read(PREFIXES_KEY)?,
        })
    }

    /// Rewrites the room record.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or the write fails.
    pub fn save_rooms(&mut self, rooms: &RoomStore) -> Result<()> {
        self.write(ROOMS_KEY, rooms)
    }

    /// Rewrites the template record.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or the write fails.
    pub fn save_templates(&mut self, templates: &TemplateStore) -> Result<()> {
        self.write(TEMPLATES_KEY, templates)
    }

    /// Rewrites the prefix record.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or the write fails.
    pub fn save_prefixes(&mut self, prefixes: &PrefixStore) -> Result<()> {
        self.write(PREFIXES_KEY, prefixes)
    }

    fn read<T: DeserializeOwned>(&mut self, key: &str) -> Result<Option<T>> {
        let Some(text) = self.store.get(key)? else {
            return Ok(None);
        };
        match serde_json::from_str(&text) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                let backup = backup_key(key);
                self.store.set(&backup, &text)?;
                log::warn!("ignoring unreadable record {key}, kept as {backup}: {e}");
                Ok(None)
            }
        }
    }

    fn write<T: Serialize>(&mut self, key: &str, value: &T) -> Result<()> {
        let text = serde_json::to_string(value).map_err(|e| {
            Error::serialization(e.to_string()).with_context(ErrorContext::new().with_source(key))
        })?;
        self.store.set(key, &text)?;
        log::debug!("saved record {key} ({} bytes)", text.len());
        Ok(())
    }
}

impl Default for Persistence {
    fn default() -> Self {
        Self::in_memory()
    }
}
