//! The public client: construction, name resolution and query operations

use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::api::fetch::fetch_across_leagues;
use crate::api::http_client::create_http_client_with_timeout;
use crate::api::urls::{build_entity_url, build_stat_url};
use crate::cache::EntityCache;
use crate::constants::{
    API_VERSION, BASE_URL, DEFAULT_HTTP_TIMEOUT_SECONDS, DEFAULT_MAX_MATCH_SCORE,
};
use crate::error::ApiError;
use crate::matcher::NameMatcher;
use crate::models::{identifier_string, EntityRecord, EntityType, League};
use crate::query::{leagues_or_default, EntityQuery, StatQuery};

/// Configures and builds a [`Client`].
///
/// # Example
/// ```rust,no_run
/// use asa_client::ClientBuilder;
///
/// let client = ClientBuilder::new()
///     .max_match_score(0.75)
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    base_url: String,
    max_match_score: f64,
    timeout_seconds: u64,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            max_match_score: DEFAULT_MAX_MATCH_SCORE,
            timeout_seconds: DEFAULT_HTTP_TIMEOUT_SECONDS,
        }
    }
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the API root, without the version segment. Mainly useful
    /// for pointing tests at a local server.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Maximum acceptance distance for fuzzy name matches, in `[0, 1]`
    /// (values outside the score domain are clamped). A name resolves only
    /// when its best candidate scores strictly below this. Default 0.35.
    pub fn max_match_score(mut self, max_match_score: f64) -> Self {
        self.max_match_score = max_match_score;
        self
    }

    /// Per-request HTTP timeout in seconds. Default 30.
    pub fn timeout(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    pub fn build(self) -> Result<Client, ApiError> {
        let http = create_http_client_with_timeout(self.timeout_seconds)?;
        Ok(Client {
            http,
            api_base: format!("{}/{}", self.base_url.trim_end_matches('/'), API_VERSION),
            cache: EntityCache::new(),
            matcher: NameMatcher::new(self.max_match_score),
        })
    }
}

/// Async client for the American Soccer Analysis API.
///
/// Entity operations accept identifiers directly or free-text names that
/// are fuzzy-resolved against a per-instance cache of the full entity
/// collections. Statistics operations pass arbitrary parameters through to
/// the corresponding endpoint. Every operation fans out one request per
/// requested league and returns the merged records in league order.
///
/// # Example
/// ```rust,no_run
/// use asa_client::{Client, EntityQuery, League, StatQuery};
///
/// #[tokio::main]
/// async fn main() -> Result<(), asa_client::ApiError> {
///     let client = Client::new()?;
///
///     let players = client
///         .get_players(EntityQuery::new().leagues([League::Mls]).name("Carles Gil"))
///         .await?;
///     println!("{} player record(s)", players.len());
///
///     let xgoals = client
///         .get_games_xgoals(StatQuery::new().leagues([League::Mls]).param("seasonName", "2024"))
///         .await?;
///     println!("{} game record(s)", xgoals.len());
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct Client {
    http: reqwest::Client,
    api_base: String,
    cache: EntityCache,
    matcher: NameMatcher,
}

impl Client {
    /// Builds a client with default configuration. Use [`ClientBuilder`]
    /// to override the acceptance threshold, base URL or timeout.
    pub fn new() -> Result<Self, ApiError> {
        ClientBuilder::new().build()
    }

    /// The versioned API root this client talks to
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// The fuzzy-match acceptance threshold this client was built with
    pub fn max_match_score(&self) -> f64 {
        self.matcher.max_score()
    }

    // ---- name resolution ------------------------------------------------

    /// Resolves free-text `names` to identifiers of the given entity type.
    ///
    /// All names in the batch are looked up concurrently against the cached
    /// entity collection (fetched across all supported leagues on first
    /// use). Output order follows input order. An empty batch returns empty
    /// without touching the network; a name that fails to clear the
    /// acceptance threshold fails the whole batch with
    /// [`ApiError::NoMatch`].
    #[instrument(skip(self, names), fields(entity = %entity, name_count = names.len()))]
    pub async fn resolve_names<S>(
        &self,
        entity: EntityType,
        names: &[S],
    ) -> Result<Vec<String>, ApiError>
    where
        S: AsRef<str>,
    {
        if names.is_empty() {
            return Ok(Vec::new());
        }

        let lookups = names.iter().map(|name| self.resolve_one(entity, name.as_ref()));
        let ids = futures::future::try_join_all(lookups).await?;

        info!("Resolved {} name(s) to {} identifiers", names.len(), entity);
        Ok(ids)
    }

    async fn resolve_one(&self, entity: EntityType, name: &str) -> Result<String, ApiError> {
        let records = self.entity_records(entity).await?;
        let found = self.matcher.best_match(entity, &records, name).await?;

        let record = &records[found.position];
        record
            .get(entity.id_field())
            .and_then(identifier_string)
            .ok_or_else(|| ApiError::MissingIdentifier {
                entity,
                name: name.to_string(),
                field: entity.id_field(),
            })
    }

    /// The cached full collection for `entity`, fetched across all
    /// supported leagues on first use
    async fn entity_records(
        &self,
        entity: EntityType,
    ) -> Result<Arc<Vec<EntityRecord>>, ApiError> {
        self.cache
            .get_or_fetch(entity, || async move {
                fetch_across_leagues(&self.http, &League::ALL, |league| {
                    build_entity_url(&self.api_base, league, entity, None)
                })
                .await
            })
            .await
    }

    // ---- entity operations ----------------------------------------------

    /// Fetches player records, optionally filtered by ids and fuzzy names.
    ///
    /// Identifiers resolved from `names` come first in the filter, followed
    /// by explicit `ids`. With no ids or names, every record in the
    /// requested leagues is returned.
    pub async fn get_players(&self, query: EntityQuery) -> Result<Vec<EntityRecord>, ApiError> {
        self.get_entities(EntityType::Player, query).await
    }

    /// Fetches manager records, optionally filtered by ids and fuzzy names
    pub async fn get_managers(&self, query: EntityQuery) -> Result<Vec<EntityRecord>, ApiError> {
        self.get_entities(EntityType::Manager, query).await
    }

    /// Fetches stadium records, optionally filtered by ids and fuzzy names
    pub async fn get_stadiums(&self, query: EntityQuery) -> Result<Vec<EntityRecord>, ApiError> {
        self.get_entities(EntityType::Stadium, query).await
    }

    /// Fetches referee records, optionally filtered by ids and fuzzy names
    pub async fn get_referees(&self, query: EntityQuery) -> Result<Vec<EntityRecord>, ApiError> {
        self.get_entities(EntityType::Referee, query).await
    }

    /// Fetches team records, optionally filtered by ids and fuzzy names
    pub async fn get_teams(&self, query: EntityQuery) -> Result<Vec<EntityRecord>, ApiError> {
        self.get_entities(EntityType::Team, query).await
    }

    #[instrument(skip(self, query), fields(entity = %entity))]
    async fn get_entities(
        &self,
        entity: EntityType,
        query: EntityQuery,
    ) -> Result<Vec<EntityRecord>, ApiError> {
        let leagues = leagues_or_default(query.leagues)?;

        let mut ids = self.resolve_names(entity, &query.names).await?;
        ids.extend(query.ids);

        let id_filter = if ids.is_empty() {
            None
        } else {
            Some(ids.join(","))
        };
        debug!(
            "Fetching {} across {} league(s), filter: {:?}",
            entity,
            leagues.len(),
            id_filter
        );

        fetch_across_leagues(&self.http, &leagues, |league| {
            build_entity_url(&self.api_base, league, entity, id_filter.as_deref())
        })
        .await
    }

    // ---- statistics operations -------------------------------------------

    /// Expected-goals statistics per player (`players/xgoals`)
    pub async fn get_players_xgoals(&self, query: StatQuery) -> Result<Vec<EntityRecord>, ApiError> {
        self.get_stats("players/xgoals", query).await
    }

    /// Expected-passing statistics per player (`players/xpass`)
    pub async fn get_players_xpass(&self, query: StatQuery) -> Result<Vec<EntityRecord>, ApiError> {
        self.get_stats("players/xpass", query).await
    }

    /// Goals-added statistics per player (`players/goals-added`)
    pub async fn get_players_goals_added(
        &self,
        query: StatQuery,
    ) -> Result<Vec<EntityRecord>, ApiError> {
        self.get_stats("players/goals-added", query).await
    }

    /// Player salary records (`players/salaries`)
    pub async fn get_players_salaries(
        &self,
        query: StatQuery,
    ) -> Result<Vec<EntityRecord>, ApiError> {
        self.get_stats("players/salaries", query).await
    }

    /// Expected-goals statistics per goalkeeper (`goalkeepers/xgoals`)
    pub async fn get_goalkeepers_xgoals(
        &self,
        query: StatQuery,
    ) -> Result<Vec<EntityRecord>, ApiError> {
        self.get_stats("goalkeepers/xgoals", query).await
    }

    /// Goals-added statistics per goalkeeper (`goalkeepers/goals-added`)
    pub async fn get_goalkeepers_goals_added(
        &self,
        query: StatQuery,
    ) -> Result<Vec<EntityRecord>, ApiError> {
        self.get_stats("goalkeepers/goals-added", query).await
    }

    /// Expected-goals statistics per team (`teams/xgoals`)
    pub async fn get_teams_xgoals(&self, query: StatQuery) -> Result<Vec<EntityRecord>, ApiError> {
        self.get_stats("teams/xgoals", query).await
    }

    /// Expected-passing statistics per team (`teams/xpass`)
    pub async fn get_teams_xpass(&self, query: StatQuery) -> Result<Vec<EntityRecord>, ApiError> {
        self.get_stats("teams/xpass", query).await
    }

    /// Goals-added statistics per team (`teams/goals-added`)
    pub async fn get_teams_goals_added(
        &self,
        query: StatQuery,
    ) -> Result<Vec<EntityRecord>, ApiError> {
        self.get_stats("teams/goals-added", query).await
    }

    /// Team salary records (`teams/salaries`)
    pub async fn get_teams_salaries(
        &self,
        query: StatQuery,
    ) -> Result<Vec<EntityRecord>, ApiError> {
        self.get_stats("teams/salaries", query).await
    }

    /// Game records (`games`)
    pub async fn get_games(&self, query: StatQuery) -> Result<Vec<EntityRecord>, ApiError> {
        self.get_stats("games", query).await
    }

    /// Expected-goals statistics per game (`games/xgoals`)
    pub async fn get_games_xgoals(&self, query: StatQuery) -> Result<Vec<EntityRecord>, ApiError> {
        self.get_stats("games/xgoals", query).await
    }

    #[instrument(skip(self, query))]
    async fn get_stats(
        &self,
        stat_path: &'static str,
        query: StatQuery,
    ) -> Result<Vec<EntityRecord>, ApiError> {
        let leagues = leagues_or_default(query.leagues)?;
        debug!(
            "Fetching {} across {} league(s) with {} parameter(s)",
            stat_path,
            leagues.len(),
            query.params.len()
        );

        fetch_across_leagues(&self.http, &leagues, |league| {
            build_stat_url(&self.api_base, league, stat_path, &query.params)
        })
        .await
    }
}
