use serde::Deserialize;

/// Game record as returned by the `games` endpoint.
///
/// Relational fields hold foreign-key ids; absent lists decode as empty.
/// Search results use the same shape.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GameRecord {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub storyline: Option<String>,
    /// Epoch seconds
    #[serde(default)]
    pub first_release_date: Option<i64>,
    #[serde(default)]
    pub total_rating: Option<f64>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub genres: Vec<u64>,
    #[serde(default)]
    pub platforms: Vec<u64>,
    #[serde(default)]
    pub game_modes: Vec<u64>,
    #[serde(default)]
    pub themes: Vec<u64>,
    #[serde(default)]
    pub player_perspectives: Vec<u64>,
    #[serde(default)]
    pub game_engines: Vec<u64>,
    #[serde(default)]
    pub involved_companies: Vec<u64>,
}

/// A search result: a game record not yet confirmed as the match.
pub type SearchCandidate = GameRecord;

/// Fields requested for games, both for search and for full resolution.
pub const GAME_FIELDS: &[&str] = &[
    "id",
    "name",
    "summary",
    "storyline",
    "first_release_date",
    "total_rating",
    "url",
    "genres",
    "platforms",
    "game_modes",
    "themes",
    "player_perspectives",
    "game_engines",
    "involved_companies",
];

/// Any record that only contributes a display name (genre, platform, company...).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NamedRecord {
    pub id: u64,
    #[serde(default)]
    pub name: String,
}

/// Link between a game and a company.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InvolvedCompany {
    pub id: u64,
    pub company: u64,
    #[serde(default)]
    pub developer: bool,
    #[serde(default)]
    pub publisher: bool,
}

/// Endpoints that resolve an id list to names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamedResource {
    Genres,
    Platforms,
    GameModes,
    Themes,
    PlayerPerspectives,
    GameEngines,
    Companies,
}

impl NamedResource {
    pub fn endpoint(&self) -> &'static str {
        match self {
            NamedResource::Genres => "genres",
            NamedResource::Platforms => "platforms",
            NamedResource::GameModes => "game_modes",
            NamedResource::Themes => "themes",
            NamedResource::PlayerPerspectives => "player_perspectives",
            NamedResource::GameEngines => "game_engines",
            NamedResource::Companies => "companies",
        }
    }
}
