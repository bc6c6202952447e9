//! Authenticated client for the API-Football v3 REST API.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

use crate::cli::types::{ExternalId, Season};
use crate::error::Result;
use crate::football::cache::{CacheStatus, CacheStore, DEFAULT_TTL_HOURS};
use crate::football::types::{ApiEnvelope, InjuryEntry, PlayerEntry, TransferEntry, TransferMove};

/// Base path for the API-Football v3 API.
pub const API_FOOTBALL_BASE_URL: &str = "https://v3.football.api-sports.io";

/// Static API key header the provider authenticates with.
pub const API_KEY_HEADER: &str = "x-apisports-key";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Provider client: HTTP transport plus the cache store consulted by the
/// cache-aside fetch path. Cheap to clone for concurrent sync tasks.
#[derive(Clone)]
pub struct ApiFootballClient {
    http: Client,
    base_url: String,
    cache: CacheStore,
    ttl: Duration,
}

impl ApiFootballClient {
    /// Build a client with the given API key and cache store.
    pub fn new(api_key: &str, cache: CacheStore) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(API_KEY_HEADER, HeaderValue::from_str(api_key)?);

        let http = Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            base_url: API_FOOTBALL_BASE_URL.to_string(),
            cache,
            ttl: Duration::from_secs(DEFAULT_TTL_HOURS * 60 * 60),
        })
    }

    /// Point the client at a different base URL (tests, proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the cache freshness window.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn cache(&self) -> &CacheStore {
        &self.cache
    }

    pub(crate) fn ttl(&self) -> Duration {
        self.ttl
    }

    /// GET an endpoint and unwrap the provider envelope.
    ///
    /// Transport and non-2xx failures propagate. A non-empty `errors`
    /// object in the envelope is logged; the (possibly empty) `response`
    /// array is returned either way.
    pub(crate) async fn get_envelope(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<Value>> {
        let url = format!("{}{}", self.base_url, endpoint);

        let envelope: ApiEnvelope = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if let Some(errors) = envelope.error_map() {
            tracing::warn!(endpoint, ?errors, "provider reported errors");
        }
        if envelope.response.is_empty() {
            tracing::debug!(endpoint, "provider returned no results");
        }

        Ok(envelope.response)
    }

    /// Statistics for one player in one season (`/players?id=&season=`).
    ///
    /// The provider returns at most one entry for an id; `None` means the
    /// id is unknown or the player has no record for that season. The
    /// cache status comes back for verbose reporting.
    pub async fn player_statistics(
        &self,
        id: ExternalId,
        season: Season,
        force_refresh: bool,
    ) -> Result<(Option<PlayerEntry>, CacheStatus)> {
        let query = [
            ("id", id.to_string()),
            ("season", season.to_string()),
        ];
        let (rows, status) = self.fetch_cached("/players", &query, force_refresh).await?;

        let entry = match rows.into_iter().next() {
            Some(row) => Some(serde_json::from_value(row)?),
            None => None,
        };
        Ok((entry, status))
    }

    /// Injury history for a player (`/players/injuries?player=`).
    pub async fn injuries(
        &self,
        id: ExternalId,
        force_refresh: bool,
    ) -> Result<Vec<InjuryEntry>> {
        let query = [("player", id.to_string())];
        let (rows, _) = self
            .fetch_cached("/players/injuries", &query, force_refresh)
            .await?;
        Ok(serde_json::from_value(Value::Array(rows))?)
    }

    /// Transfer history for a player (`/transfers?player=`), flattened to
    /// the move list of the first (only) response entry.
    pub async fn transfers(
        &self,
        id: ExternalId,
        force_refresh: bool,
    ) -> Result<Vec<TransferMove>> {
        let query = [("player", id.to_string())];
        let (rows, _) = self.fetch_cached("/transfers", &query, force_refresh).await?;

        match rows.into_iter().next() {
            Some(row) => {
                let entry: TransferEntry = serde_json::from_value(row)?;
                Ok(entry.transfers)
            }
            None => Ok(Vec::new()),
        }
    }
}
