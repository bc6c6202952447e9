//! Season aggregation and performance-pillar derivation.
//!
//! Reduces an athlete's per-competition statistics to one season record
//! and maps the averaged match rating onto the four pillar scores used by
//! the roster dashboard.

use serde::{Deserialize, Serialize};

use super::types::CompetitionStats;

/// Season totals for one athlete across all competitions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SeasonTotals {
    pub goals: u32,
    pub assists: u32,
    pub appearances: u32,
    pub yellow_cards: u32,
    pub red_cards: u32,
    pub tackles: u32,
    /// Average of per-competition ratings, counting only competitions
    /// with a present, non-zero rating. 0.0 when none qualifies.
    pub rating: f64,
}

/// The four performance pillars, each in [0, 10].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PillarScores {
    pub technical: f64,
    pub tactical: f64,
    pub physical: f64,
    pub psychological: f64,
}

/// Reduce per-competition statistics to season totals.
///
/// Null stat fields count as zero in the sums. Competitions without a
/// rating are excluded from the rating average rather than dragging it
/// down as zeros.
pub fn aggregate_season(stats: &[CompetitionStats]) -> SeasonTotals {
    let mut totals = SeasonTotals::default();
    let mut rating_sum = 0.0;
    let mut rated = 0u32;

    for comp in stats {
        totals.goals += comp.goals.total.unwrap_or(0);
        totals.assists += comp.goals.assists.unwrap_or(0);
        totals.appearances += comp.games.appearances.unwrap_or(0);
        totals.yellow_cards += comp.cards.yellow.unwrap_or(0);
        totals.red_cards += comp.cards.red.unwrap_or(0);
        totals.tackles += comp.tackles.total.unwrap_or(0);

        if let Some(rating) = comp.games.rating {
            if rating > 0.0 {
                rating_sum += rating;
                rated += 1;
            }
        }
    }

    if rated > 0 {
        totals.rating = rating_sum / rated as f64;
    }

    totals
}

/// Derive the four pillar scores from an averaged rating on the 0-10 scale.
///
/// Fixed hand-tuned weights applied to the capped rating, so each pillar
/// tops out at its own maximum (10 / 9 / 9.5 / 8.5).
pub fn pillar_scores(rating: f64) -> PillarScores {
    let r = rating.min(10.0);
    PillarScores {
        technical: r,
        tactical: r * 0.9,
        physical: r * 0.95,
        psychological: r * 0.85,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::football::types::{CardStats, GameStats, GoalStats, TackleStats};

    fn comp(
        goals: u32,
        assists: u32,
        apps: u32,
        yellow: u32,
        red: u32,
        tackles: u32,
        rating: Option<f64>,
    ) -> CompetitionStats {
        CompetitionStats {
            games: GameStats {
                appearances: Some(apps),
                rating,
                ..Default::default()
            },
            goals: GoalStats {
                total: Some(goals),
                assists: Some(assists),
                ..Default::default()
            },
            cards: CardStats {
                yellow: Some(yellow),
                red: Some(red),
            },
            tackles: TackleStats {
                total: Some(tackles),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_totals_are_arithmetic_sums() {
        let stats = vec![
            comp(11, 4, 20, 3, 0, 14, Some(7.4)),
            comp(5, 2, 8, 1, 1, 6, Some(6.8)),
            comp(2, 0, 4, 0, 0, 3, None),
        ];
        let totals = aggregate_season(&stats);

        assert_eq!(totals.goals, 18);
        assert_eq!(totals.assists, 6);
        assert_eq!(totals.appearances, 32);
        assert_eq!(totals.yellow_cards, 4);
        assert_eq!(totals.red_cards, 1);
        assert_eq!(totals.tackles, 23);
    }

    #[test]
    fn test_rating_average_excludes_zero_and_absent() {
        // [0, 7.0, 8.0] must average to 7.5, not 5.0.
        let stats = vec![
            comp(0, 0, 1, 0, 0, 0, Some(0.0)),
            comp(0, 0, 1, 0, 0, 0, Some(7.0)),
            comp(0, 0, 1, 0, 0, 0, Some(8.0)),
        ];
        let totals = aggregate_season(&stats);
        assert!((totals.rating - 7.5).abs() < f64::EPSILON);

        // Absent ratings are equally excluded.
        let sparse = vec![
            comp(0, 0, 1, 0, 0, 0, None),
            comp(0, 0, 1, 0, 0, 0, Some(6.0)),
        ];
        assert!((aggregate_season(&sparse).rating - 6.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_season_is_all_zero() {
        let totals = aggregate_season(&[]);
        assert_eq!(totals, SeasonTotals::default());
        assert_eq!(totals.rating, 0.0);

        // Downstream pillars default to zero, not null.
        let pillars = pillar_scores(totals.rating);
        assert_eq!(pillars, PillarScores::default());
    }

    #[test]
    fn test_null_fields_count_as_zero() {
        let stats = vec![CompetitionStats::default(), comp(3, 1, 2, 0, 0, 1, None)];
        let totals = aggregate_season(&stats);
        assert_eq!(totals.goals, 3);
        assert_eq!(totals.appearances, 2);
    }

    #[test]
    fn test_pillar_weights() {
        let pillars = pillar_scores(8.0);
        assert!((pillars.technical - 8.0).abs() < 1e-9);
        assert!((pillars.tactical - 7.2).abs() < 1e-9);
        assert!((pillars.physical - 7.6).abs() < 1e-9);
        assert!((pillars.psychological - 6.8).abs() < 1e-9);
    }

    #[test]
    fn test_pillars_cap_at_rating_ten_and_above() {
        for r in [10.0, 11.5, 100.0] {
            let pillars = pillar_scores(r);
            assert_eq!(pillars.technical, 10.0);
            assert_eq!(pillars.tactical, 9.0);
            assert_eq!(pillars.physical, 9.5);
            assert_eq!(pillars.psychological, 8.5);
        }
    }

    #[test]
    fn test_pillars_monotonic_below_cap() {
        let low = pillar_scores(5.0);
        let high = pillar_scores(7.5);
        assert!(high.technical > low.technical);
        assert!(high.tactical > low.tactical);
        assert!(high.physical > low.physical);
        assert!(high.psychological > low.psychological);
    }
}
