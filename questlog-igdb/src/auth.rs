use std::sync::Arc;

use serde::Deserialize;

use crate::config::IgdbConfig;
use crate::credentials::{Credential, CredentialStore};
use crate::error::IgdbError;

const USER_AGENT: &str = concat!("questlog/", env!("CARGO_PKG_VERSION"));

/// Success body of the OAuth2 token endpoint.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
    #[serde(default = "default_token_type")]
    token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

type Clock = Arc<dyn Fn() -> i64 + Send + Sync>;

/// Obtains bearer tokens through the OAuth2 client-credentials exchange,
/// reusing the cached credential while it is still valid.
pub struct AuthClient<S> {
    http: reqwest::Client,
    config: IgdbConfig,
    store: S,
    clock: Clock,
}

impl<S: CredentialStore> AuthClient<S> {
    pub fn new(config: IgdbConfig, store: S) -> Result<Self, IgdbError> {
        let http = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            http,
            config,
            store,
            clock: Arc::new(|| chrono::Utc::now().timestamp_millis()),
        })
    }

    /// Replace the wall clock (epoch milliseconds).
    pub fn with_clock(mut self, clock: impl Fn() -> i64 + Send + Sync + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn config(&self) -> &IgdbConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Return a usable access token, exchanging credentials only when the
    /// cached one is missing or inside the expiry buffer.
    pub async fn get_valid_token(&self) -> Result<String, IgdbError> {
        let now = (self.clock)();
        if let Some(cached) = self.store.load() {
            if cached.is_valid_at(now) {
                log::debug!("Using cached token (expires at {})", cached.expires_at);
                return Ok(cached.access_token);
            }
            log::debug!("Cached token expired or about to expire, refreshing");
        }

        Ok(self.refresh_token().await?.access_token)
    }

    /// Always perform a fresh exchange and persist the result.
    pub async fn refresh_token(&self) -> Result<Credential, IgdbError> {
        let creds = self.config.require_client_credentials()?;

        let resp = self
            .http
            .post(&self.config.token_url)
            .form(&[
                ("client_id", creds.client_id.as_str()),
                ("client_secret", creds.client_secret.as_str()),
                ("grant_type", self.config.grant_type.as_str()),
            ])
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;
        if !status.is_success() {
            return Err(IgdbError::Auth {
                status: status.as_u16(),
                body: text,
            });
        }

        // An unusable token body means no request can be authorized either.
        let token: TokenResponse = serde_json::from_str(&text).map_err(|e| IgdbError::Auth {
            status: status.as_u16(),
            body: format!("undecodable token response: {e}. Response: {}", truncate(&text, 200)),
        })?;

        let credential = Credential::from_lifetime(
            token.access_token,
            token.token_type,
            token.expires_in,
            (self.clock)(),
        );
        self.store.save(&credential)?;
        log::info!("Obtained new IGDB access token");

        Ok(credential)
    }
}

/// Cut a response body down for error messages.
pub(crate) fn truncate(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
