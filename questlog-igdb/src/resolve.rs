use std::collections::HashMap;

use futures::future::try_join_all;
use questlog_core::ResolvedRecord;

use crate::client::IgdbClient;
use crate::credentials::CredentialStore;
use crate::error::IgdbError;
use crate::query::{MAX_LIMIT, Query};
use crate::types::{GAME_FIELDS, GameRecord, InvolvedCompany, NamedRecord, NamedResource, SearchCandidate};

/// Source of search results and resolved game graphs.
///
/// [`IgdbClient`] is the production implementation; the generator only sees
/// this trait.
#[allow(async_fn_in_trait)]
pub trait MetadataSource {
    async fn search_by_name(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<SearchCandidate>, IgdbError>;

    /// Resolve a game and all of its relations. `Ok(None)` when the game id
    /// does not exist.
    async fn resolve_entity_graph(&self, game_id: u64)
    -> Result<Option<ResolvedRecord>, IgdbError>;
}

impl<S: CredentialStore> MetadataSource for IgdbClient<S> {
    async fn search_by_name(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<SearchCandidate>, IgdbError> {
        IgdbClient::search_by_name(self, query, limit).await
    }

    async fn resolve_entity_graph(
        &self,
        game_id: u64,
    ) -> Result<Option<ResolvedRecord>, IgdbError> {
        IgdbClient::resolve_entity_graph(self, game_id).await
    }
}

impl<S: CredentialStore> IgdbClient<S> {
    /// Fetch a game and replace every relational id list with names.
    ///
    /// The token is fetched once and shared by all sub-requests. Relation
    /// lookups run concurrently; companies are fetched as soon as the
    /// involvement records arrive. Any failed lookup fails the whole game.
    pub async fn resolve_entity_graph(
        &self,
        game_id: u64,
    ) -> Result<Option<ResolvedRecord>, IgdbError> {
        let token = self.auth().get_valid_token().await?;

        let body = Query::new(GAME_FIELDS).where_ids(&[game_id]).limit(1).build();
        let games: Vec<GameRecord> = self.post_query(&token, "games", body).await?;
        let Some(game) = games.into_iter().find(|g| g.id == game_id) else {
            log::debug!("Game {} not found", game_id);
            return Ok(None);
        };

        let token = token.as_str();
        let companies = async {
            let involvements: Vec<InvolvedCompany> = self
                .fetch_by_ids(
                    token,
                    "involved_companies",
                    &["id", "company", "developer", "publisher"],
                    &game.involved_companies,
                )
                .await?;
            let mut company_ids: Vec<u64> = Vec::new();
            for inv in &involvements {
                if !company_ids.contains(&inv.company) {
                    company_ids.push(inv.company);
                }
            }
            let companies = self
                .fetch_names(token, NamedResource::Companies, &company_ids)
                .await?;
            Ok::<_, IgdbError>((involvements, companies))
        };

        let (genres, platforms, game_modes, themes, perspectives, engines, (involvements, companies)) =
            futures::try_join!(
                self.fetch_names(token, NamedResource::Genres, &game.genres),
                self.fetch_names(token, NamedResource::Platforms, &game.platforms),
                self.fetch_names(token, NamedResource::GameModes, &game.game_modes),
                self.fetch_names(token, NamedResource::Themes, &game.themes),
                self.fetch_names(
                    token,
                    NamedResource::PlayerPerspectives,
                    &game.player_perspectives
                ),
                self.fetch_names(token, NamedResource::GameEngines, &game.game_engines),
                companies,
            )
            .map_err(|e| IgdbError::Resolution(format!("game {}: {}", game_id, e)))?;

        let (developers, publishers) =
            company_roles(&game.involved_companies, &involvements, &companies);

        Ok(Some(ResolvedRecord {
            id: game.id,
            name: game.name.clone(),
            summary: game.summary.clone(),
            storyline: game.storyline.clone(),
            release_date: game.first_release_date.and_then(format_release_date),
            rating: game.total_rating,
            url: game.url.clone(),
            genres: names_in_order(&game.genres, &genres),
            platforms: names_in_order(&game.platforms, &platforms),
            game_modes: names_in_order(&game.game_modes, &game_modes),
            themes: names_in_order(&game.themes, &themes),
            player_perspectives: names_in_order(&game.player_perspectives, &perspectives),
            game_engines: names_in_order(&game.game_engines, &engines),
            developers,
            publishers,
        }))
    }

    async fn fetch_names(
        &self,
        token: &str,
        resource: NamedResource,
        ids: &[u64],
    ) -> Result<Vec<NamedRecord>, IgdbError> {
        self.fetch_by_ids(token, resource.endpoint(), &["id", "name"], ids)
            .await
            .map_err(|e| match e {
                IgdbError::Api { status, body } => IgdbError::Api {
                    status,
                    body: format!("/{}: {}", resource.endpoint(), body),
                },
                other => other,
            })
    }

    /// Look up records by id, one request per `MAX_LIMIT` ids.
    async fn fetch_by_ids<T: serde::de::DeserializeOwned>(
        &self,
        token: &str,
        endpoint: &str,
        fields: &[&str],
        ids: &[u64],
    ) -> Result<Vec<T>, IgdbError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let requests = ids.chunks(MAX_LIMIT).map(|chunk| {
            let body = Query::new(fields).where_ids(chunk).limit(chunk.len()).build();
            self.post_query::<T>(token, endpoint, body)
        });
        let pages = try_join_all(requests).await?;
        Ok(pages.into_iter().flatten().collect())
    }
}

/// Names for `ids` in the same order, skipping ids that were not returned.
fn names_in_order(ids: &[u64], records: &[NamedRecord]) -> Vec<String> {
    let by_id: HashMap<u64, &str> = records.iter().map(|r| (r.id, r.name.as_str())).collect();
    ids.iter()
        .filter_map(|id| by_id.get(id))
        .filter(|name| !name.is_empty())
        .map(|name| name.to_string())
        .collect()
}

/// Split involved companies into developer and publisher name lists.
///
/// Follows the game's involvement order; a company may be in both lists but
/// appears at most once in each.
fn company_roles(
    involvement_ids: &[u64],
    involvements: &[InvolvedCompany],
    companies: &[NamedRecord],
) -> (Vec<String>, Vec<String>) {
    let by_id: HashMap<u64, &InvolvedCompany> = involvements.iter().map(|i| (i.id, i)).collect();
    let names: HashMap<u64, &str> = companies.iter().map(|c| (c.id, c.name.as_str())).collect();

    let mut developers = Vec::new();
    let mut publishers = Vec::new();

    for inv in involvement_ids.iter().filter_map(|id| by_id.get(id)) {
        let Some(name) = names.get(&inv.company).filter(|n| !n.is_empty()) else {
            continue;
        };
        if inv.developer && !developers.iter().any(|d: &String| d == name) {
            developers.push(name.to_string());
        }
        if inv.publisher && !publishers.iter().any(|p: &String| p == name) {
            publishers.push(name.to_string());
        }
    }

    (developers, publishers)
}

fn format_release_date(epoch_secs: i64) -> Option<String> {
    chrono::DateTime::from_timestamp(epoch_secs, 0).map(|d| d.format("%Y-%m-%d").to_string())
}

#[cfg(test)]
#[path = "tests/resolve_tests.rs"]
mod tests;
