//! Session configuration.

use std::path::PathBuf;

use mudmap_codegen::{DEFAULT_ARCHIVE_NAME, GeneratorConfig};
use mudmap_history::HistoryConfig;
use mudmap_storage::PrefixStore;

/// Environment variable that overrides the default data directory.
pub const DATA_DIR_ENV: &str = "MUDMAP_DATA_DIR";

/// Data directory used when neither a flag nor the environment names one.
pub const DEFAULT_DATA_DIR: &str = ".mudmap";

/// Configuration for an editing session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    /// Undo history settings.
    pub history: HistoryConfig,
    /// Script generation settings.
    pub generator: GeneratorConfig,
    /// Prefixes offered when nothing is persisted yet.
    pub default_prefixes: Vec<String>,
    /// File name used by `export` when no path is given.
    pub archive_name: String,
    /// Where [`FileStore`](crate::FileStore) keeps its records.
    pub data_dir: PathBuf,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            history: HistoryConfig::default(),
            generator: GeneratorConfig::default(),
            default_prefixes: PrefixStore::default().iter().map(String::from).collect(),
            archive_name: DEFAULT_ARCHIVE_NAME.to_string(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
        }
    }
}

impl SessionConfig {
    /// Creates a configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set history settings.
    #[must_use]
    pub fn with_history(mut self, history: HistoryConfig) -> Self {
        self.history = history;
        self
    }

    /// Builder method to set generator settings.
    #[must_use]
    pub fn with_generator(mut self, generator: GeneratorConfig) -> Self {
        self.generator = generator;
        self
    }

    /// Builder method to set the starting prefix list.
    #[must_use]
    pub fn with_default_prefixes(mut self, prefixes: Vec<String>) -> Self {
        self.default_prefixes = prefixes;
        self
    }

    /// Builder method to set the default archive file name.
    #[must_use]
    pub fn with_archive_name(mut self, name: impl Into<String>) -> Self {
        self.archive_name = name.into();
        self
    }

    /// Builder method to set the data directory.
    #[must_use]
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// Default data directory, honoring [`DATA_DIR_ENV`].
    #[must_use]
    pub fn data_dir_from_env() -> PathBuf {
        std::env::var_os(DATA_DIR_ENV).map_or_else(|| PathBuf::from(DEFAULT_DATA_DIR), PathBuf::from)
    }
}
