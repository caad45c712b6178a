use serde::{Deserialize, Serialize};

/// A game with every relational id replaced by a human-readable name.
///
/// Built by the metadata resolver and consumed by document renderers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolvedRecord {
    /// External service game id
    pub id: u64,
    /// Canonical name from the service
    pub name: String,
    pub summary: Option<String>,
    pub storyline: Option<String>,
    /// First release date in YYYY-MM-DD format
    pub release_date: Option<String>,
    /// Aggregated rating on a 0-100 scale
    pub rating: Option<f64>,
    /// Page on the service's website
    pub url: Option<String>,
    pub genres: Vec<String>,
    pub platforms: Vec<String>,
    pub game_modes: Vec<String>,
    pub themes: Vec<String>,
    pub player_perspectives: Vec<String>,
    pub game_engines: Vec<String>,
    /// Companies with a developer involvement
    pub developers: Vec<String>,
    /// Companies with a publisher involvement
    pub publishers: Vec<String>,
}
