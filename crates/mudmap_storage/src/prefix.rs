//! Naming prefixes.

use serde::{Deserialize, Serialize};

/// Ordered list of namespace prefixes offered when naming rooms.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrefixStore {
    prefixes: Vec<String>,
}

impl PrefixStore {
    /// Wraps an existing list.
    #[must_use]
    pub fn from_vec(prefixes: Vec<String>) -> Self {
        Self { prefixes }
    }

    /// Adds `prefix` unless it is empty or already listed.
    pub fn add(&mut self, prefix: &str) -> bool {
        if prefix.is_empty() || self.contains(prefix) {
            return false;
        }
        self.prefixes.push(prefix.to_string());
        true
    }

    /// Returns true if `prefix` is listed.
    #[must_use]
    pub fn contains(&self, prefix: &str) -> bool {
        self.prefixes.iter().any(|p| p == prefix)
    }

    /// The first prefix, if any.
    #[must_use]
    pub fn first(&self) -> Option<&str> {
        self.prefixes.first().map(String::as_str)
    }

    /// Iterates prefixes in order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.prefixes.iter().map(String::as_str)
    }

    /// Number of prefixes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    /// True if the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }
}

impl Default for PrefixStore {
    fn default() -> Self {
        Self::from_vec(vec![
            "/d/city/".to_string(),
            "/d/village/".to_string(),
            "/d/forest/".to_string(),
        ])
    }
}
