//! Name-normalized player search with fixed league fallback.
//!
//! The provider's free plan often returns nothing for an unscoped search,
//! so an unscoped query first tries the global index and then walks a
//! fixed list of main leagues, returning the first non-empty result set.
//! No merging or ranking across leagues.

use serde_json::Value;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::cli::types::{LeagueId, Season};
use crate::error::Result;
use crate::football::http::ApiFootballClient;
use crate::football::types::PlayerEntry;

/// Season the provider's search index is pinned to on the free plan.
pub const SEARCH_SEASON: Season = Season(2024);

/// Leagues tried in order when an unscoped search comes back empty:
/// Brazil Serie A, Saudi Pro League, Premier League.
pub const FALLBACK_LEAGUES: [LeagueId; 3] = [LeagueId(71), LeagueId(307), LeagueId(39)];

/// Strip diacritics from a search query (NFD, drop combining marks).
pub fn normalize_query(name: &str) -> String {
    name.trim()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

impl ApiFootballClient {
    /// Search players by name.
    ///
    /// With an explicit league, only that league is searched. Otherwise
    /// the global index is tried first, then [`FALLBACK_LEAGUES`] in
    /// order; the first non-empty result wins. Zero results everywhere is
    /// an empty vec, not an error.
    pub async fn search_players(
        &self,
        name: &str,
        league: Option<LeagueId>,
        force_refresh: bool,
    ) -> Result<Vec<PlayerEntry>> {
        let clean = normalize_query(name);

        if let Some(league) = league {
            return self.search_league(&clean, Some(league), force_refresh).await;
        }

        let global = self.search_league(&clean, None, force_refresh).await?;
        if !global.is_empty() {
            return Ok(global);
        }

        for league in FALLBACK_LEAGUES {
            let results = self
                .search_league(&clean, Some(league), force_refresh)
                .await?;
            if !results.is_empty() {
                return Ok(results);
            }
        }

        tracing::debug!(query = %clean, "search empty across all fallback leagues");
        Ok(Vec::new())
    }

    async fn search_league(
        &self,
        query: &str,
        league: Option<LeagueId>,
        force_refresh: bool,
    ) -> Result<Vec<PlayerEntry>> {
        let mut params = vec![
            ("search", query.to_string()),
            ("season", SEARCH_SEASON.to_string()),
        ];
        if let Some(league) = league {
            params.push(("league", league.to_string()));
        }

        let (rows, _) = self.fetch_cached("/players", &params, force_refresh).await?;
        Ok(serde_json::from_value(Value::Array(rows))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_diacritics() {
        assert_eq!(normalize_query("Vinícius Júnior"), "Vinicius Junior");
        assert_eq!(normalize_query("Müller"), "Muller");
        assert_eq!(normalize_query("Gyökeres"), "Gyokeres");
    }

    #[test]
    fn test_normalize_preserves_plain_ascii() {
        assert_eq!(normalize_query("Erling Haaland"), "Erling Haaland");
    }

    #[test]
    fn test_normalize_trims() {
        assert_eq!(normalize_query("  Endrick "), "Endrick");
    }

    #[test]
    fn test_fallback_league_order() {
        assert_eq!(
            FALLBACK_LEAGUES.map(|l| l.as_u32()),
            [71, 307, 39]
        );
    }
}
