use serde::{Deserialize, Serialize};

/// One row of the input catalog.
///
/// Identity is the game name. Two entries refer to the same game when their
/// [`key`](CatalogEntry::key) values are equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Game title as written in the catalog
    pub name: String,
    /// Backlog status (e.g., "Completed", "Playing", "Wishlist")
    pub status: String,
    /// Platform the game is owned or played on
    pub platform: String,
    /// Free-form notes
    pub notes: Option<String>,
}

impl CatalogEntry {
    pub fn new(
        name: impl Into<String>,
        status: impl Into<String>,
        platform: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            status: status.into(),
            platform: platform.into(),
            notes: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        let notes = notes.into();
        self.notes = if notes.trim().is_empty() {
            None
        } else {
            Some(notes)
        };
        self
    }

    /// Normalized identity: lowercase, punctuation and whitespace removed.
    pub fn key(&self) -> String {
        normalize_key(&self.name)
    }
}

/// Normalize a game name for identity comparison.
pub fn normalize_key(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
#[path = "tests/entry_tests.rs"]
mod tests;
