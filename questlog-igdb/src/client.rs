use serde::de::DeserializeOwned;

use crate::auth::{AuthClient, truncate};
use crate::credentials::CredentialStore;
use crate::error::IgdbError;
use crate::query::Query;
use crate::types::{GAME_FIELDS, SearchCandidate};

/// HTTP client for the IGDB v4 API.
///
/// Every request carries the client id and a bearer token from the
/// [`AuthClient`], which only hits the identity provider when the cached
/// token is no longer valid.
pub struct IgdbClient<S> {
    auth: AuthClient<S>,
    client_id: String,
    api_url: String,
}

impl<S: CredentialStore> IgdbClient<S> {
    pub fn new(auth: AuthClient<S>) -> Result<Self, IgdbError> {
        let client_id = auth.config().require_client_credentials()?.client_id;
        let api_url = auth.config().api_url.trim_end_matches('/').to_string();
        Ok(Self {
            auth,
            client_id,
            api_url,
        })
    }

    pub fn auth(&self) -> &AuthClient<S> {
        &self.auth
    }

    /// Text search over game names. Results keep the service's ranking.
    pub async fn search_by_name(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<SearchCandidate>, IgdbError> {
        let token = self.auth.get_valid_token().await?;
        let body = Query::new(GAME_FIELDS).search(query).limit(limit).build();
        let results: Vec<SearchCandidate> = self.post_query(&token, "games", body).await?;
        log::debug!("Search '{}' returned {} candidates", query, results.len());
        Ok(results)
    }

    /// POST a query body to an endpoint and decode the JSON array response.
    pub(crate) async fn post_query<T: DeserializeOwned>(
        &self,
        token: &str,
        endpoint: &str,
        body: String,
    ) -> Result<Vec<T>, IgdbError> {
        log::debug!("POST /{}: {}", endpoint, body);

        let resp = self
            .auth
            .http()
            .post(format!("{}/{}", self.api_url, endpoint))
            .header("Client-ID", &self.client_id)
            .header("Authorization", format!("Bearer {}", token))
            .header("Content-Type", "text/plain")
            .body(body)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;
        if !status.is_success() {
            return Err(IgdbError::Api {
                status: status.as_u16(),
                body: truncate(&text, 500).to_string(),
            });
        }

        serde_json::from_str(&text).map_err(|e| {
            IgdbError::Decode(format!(
                "/{} response: {e}. Response: {}",
                endpoint,
                truncate(&text, 200)
            ))
        })
    }
}
