use std::path::PathBuf;

use crate::error::IgdbError;

pub const DEFAULT_TOKEN_URL: &str = "https://id.twitch.tv/oauth2/token";
pub const DEFAULT_API_URL: &str = "https://api.igdb.com/v4";
pub const DEFAULT_GRANT_TYPE: &str = "client_credentials";

/// Connection settings for IGDB and its identity provider.
///
/// Built once at startup and handed to [`AuthClient`](crate::AuthClient) and
/// [`IgdbClient`](crate::IgdbClient); nothing reads the environment after that.
#[derive(Debug, Clone)]
pub struct IgdbConfig {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub grant_type: String,
    pub token_url: String,
    pub api_url: String,
    /// Where the cached bearer credential is persisted
    pub token_path: PathBuf,
}

/// Client id and secret, both present.
#[derive(Debug, Clone)]
pub struct ClientCredentials {
    pub client_id: String,
    pub client_secret: String,
}

/// TOML config file format.
#[derive(Debug, Default, serde::Deserialize)]
struct ConfigFile {
    igdb: Option<IgdbFileConfig>,
}

#[derive(Debug, Default, Clone, serde::Deserialize)]
pub struct IgdbFileConfig {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub grant_type: Option<String>,
    pub token_url: Option<String>,
    pub api_url: Option<String>,
    pub token_path: Option<PathBuf>,
}

impl IgdbConfig {
    /// Load settings from environment variables and the config file.
    ///
    /// Priority: env vars > config file > defaults.
    pub fn load() -> Self {
        let file = load_config_file().unwrap_or_default();
        Self::from_sources(|key| std::env::var(key).ok(), file)
    }

    /// Merge an environment lookup over file values.
    pub fn from_sources(env: impl Fn(&str) -> Option<String>, file: IgdbFileConfig) -> Self {
        let lookup = |key: &str| env(key).filter(|v| !v.trim().is_empty());

        Self {
            client_id: lookup("IGDB_CLIENT_ID").or(file.client_id),
            client_secret: lookup("IGDB_CLIENT_SECRET").or(file.client_secret),
            grant_type: lookup("IGDB_GRANT_TYPE")
                .or(file.grant_type)
                .unwrap_or_else(|| DEFAULT_GRANT_TYPE.to_string()),
            token_url: lookup("IGDB_TOKEN_URL")
                .or(file.token_url)
                .unwrap_or_else(|| DEFAULT_TOKEN_URL.to_string()),
            api_url: lookup("IGDB_API_URL")
                .or(file.api_url)
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            token_path: lookup("QUESTLOG_TOKEN_PATH")
                .map(PathBuf::from)
                .or(file.token_path)
                .unwrap_or_else(default_token_path),
        }
    }

    /// Client id and secret, or a configuration error naming what is missing.
    pub fn require_client_credentials(&self) -> Result<ClientCredentials, IgdbError> {
        let client_id = self.client_id.clone().ok_or_else(|| {
            IgdbError::Configuration(
                "Missing client id. Set IGDB_CLIENT_ID or add client_id to the config file"
                    .to_string(),
            )
        })?;
        let client_secret = self.client_secret.clone().ok_or_else(|| {
            IgdbError::Configuration(
                "Missing client secret. Set IGDB_CLIENT_SECRET or add client_secret to the config file"
                    .to_string(),
            )
        })?;
        Ok(ClientCredentials {
            client_id,
            client_secret,
        })
    }
}

/// Return the path to the config file.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("questlog").join("config.toml"))
}

fn default_token_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("questlog").join("token.json"))
        .unwrap_or_else(|| PathBuf::from(".questlog-token.json"))
}

fn load_config_file() -> Option<IgdbFileConfig> {
    let path = config_path()?;
    let content = std::fs::read_to_string(&path).ok()?;
    let config: ConfigFile = match toml::from_str(&content) {
        Ok(c) => c,
        Err(e) => {
            log::warn!("Ignoring unreadable config file {}: {}", path.display(), e);
            return None;
        }
    };
    config.igdb
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
