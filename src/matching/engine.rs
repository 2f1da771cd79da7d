use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::player::PlayerRecord;
use crate::matching::scoring::ScoreBreakdown;

/// Highest score the engine can produce; 100 is reserved for an exact answer
pub const MAX_SIMILARITY: u32 = 99;

/// One step of a [`TierTable`]: counts of at least `min` earn `points`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tier {
    pub min: u32,
    pub points: u32,
}

/// Step function from a count to points
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TierTable(pub Vec<Tier>);

impl TierTable {
    #[must_use]
    pub fn new(tiers: &[(u32, u32)]) -> Self {
        let mut tiers: Vec<Tier> = tiers
            .iter()
            .map(|&(min, points)| Tier { min, points })
            .collect();
        tiers.sort_by_key(|t| t.min);
        Self(tiers)
    }

    /// Points of the highest tier whose threshold `count` reaches, else 0
    #[must_use]
    pub fn points(&self, count: u32) -> u32 {
        self.0
            .iter()
            .filter(|t| count >= t.min)
            .max_by_key(|t| t.min)
            .map_or(0, |t| t.points)
    }
}

/// One step of a [`ProximityTable`]: distances of at most `max_diff` earn `points`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proximity {
    pub max_diff: u32,
    pub points: u32,
}

/// Step function from a distance to points; closer is better
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProximityTable(pub Vec<Proximity>);

impl ProximityTable {
    #[must_use]
    pub fn new(steps: &[(u32, u32)]) -> Self {
        let mut steps: Vec<Proximity> = steps
            .iter()
            .map(|&(max_diff, points)| Proximity { max_diff, points })
            .collect();
        steps.sort_by_key(|p| p.max_diff);
        Self(steps)
    }

    /// Points of the tightest step containing `diff`, else 0
    #[must_use]
    pub fn points(&self, diff: u32) -> u32 {
        self.0
            .iter()
            .filter(|p| diff <= p.max_diff)
            .min_by_key(|p| p.max_diff)
            .map_or(0, |p| p.points)
    }
}

/// Bonus for the longest run of consecutive shared seasons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakBonus {
    pub per_season: u32,
    /// `None` leaves the bonus uncapped
    pub cap: Option<u32>,
    /// Fewer shared seasons than this earn no bonus
    pub min_shared: u32,
}

/// Points per franchise both players belonged to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FranchiseOverlap {
    pub per_team: u32,
    /// `None` leaves the overlap uncapped
    pub cap: Option<u32>,
}

/// Points for matching positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionPoints {
    pub exact: u32,
    /// Same first two characters only
    pub group: u32,
}

/// Points for matching archetypes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchetypePoints {
    pub exact: u32,
    pub adjacent: u32,
}

/// Configurable weights for every scoring feature
///
/// `Default` is the canonical scheme. Fields missing from a weights file keep
/// their default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    /// Number of shared (team, season) pairs
    pub shared_seasons: TierTable,
    pub streak: StreakBonus,
    /// Seasons together as recorded by the first player
    pub teammate_years: TierTable,
    pub franchise_overlap: FranchiseOverlap,
    /// Per overlapping franchise, shared seasons there count up to this cap
    pub tenure_cap_per_team: u32,
    pub position: PositionPoints,
    /// Distance between start years
    pub start_year: ProximityTable,
    pub archetype: ArchetypePoints,
    pub shared_all_star: u32,
    pub shared_all_team: u32,
    pub shared_award: u32,
    pub max_total: u32,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            shared_seasons: TierTable::new(&[(1, 20), (2, 30), (4, 40), (6, 50)]),
            streak: StreakBonus {
                per_season: 2,
                cap: Some(10),
                min_shared: 2,
            },
            teammate_years: TierTable::new(&[(1, 3), (2, 6), (3, 10), (6, 15)]),
            franchise_overlap: FranchiseOverlap {
                per_team: 2,
                cap: None,
            },
            tenure_cap_per_team: 3,
            position: PositionPoints { exact: 8, group: 2 },
            start_year: ProximityTable::new(&[(0, 6), (5, 4), (10, 2)]),
            archetype: ArchetypePoints {
                exact: 0,
                adjacent: 0,
            },
            shared_all_star: 3,
            shared_all_team: 3,
            shared_award: 5,
            max_total: MAX_SIMILARITY,
        }
    }
}

impl ScoringWeights {
    /// Load weights from a JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let weights: Self = serde_json::from_str(&content)?;
        Ok(weights.clamped())
    }

    /// Never allow a configuration to produce the reserved exact-answer score
    #[must_use]
    pub fn clamped(mut self) -> Self {
        if self.max_total > MAX_SIMILARITY {
            tracing::warn!(
                "max_total {} exceeds {}, clamping",
                self.max_total,
                MAX_SIMILARITY
            );
            self.max_total = MAX_SIMILARITY;
        }
        self
    }
}

/// Scores how similar two careers are
#[derive(Debug, Clone, Default)]
pub struct SimilarityEngine {
    weights: ScoringWeights,
}

impl SimilarityEngine {
    #[must_use]
    pub fn new(weights: ScoringWeights) -> Self {
        Self {
            weights: weights.clamped(),
        }
    }

    #[must_use]
    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Score `player1` against `player2`, whose canonical name is `key2`.
    ///
    /// Directional: teammate years are read from `player1`'s side only, so
    /// `score(a, b)` and `score(b, a)` may differ.
    #[must_use]
    pub fn score(&self, player1: &PlayerRecord, player2: &PlayerRecord, key2: &str) -> ScoreBreakdown {
        let breakdown = ScoreBreakdown::calculate(player1, player2, key2, &self.weights);
        tracing::trace!(
            "{} vs {}: {} (raw {})",
            player1.name,
            key2,
            breakdown.total,
            breakdown.raw_sum()
        );
        breakdown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_table_points() {
        let tiers = ScoringWeights::default().shared_seasons;
        assert_eq!(tiers.points(0), 0);
        assert_eq!(tiers.points(1), 20);
        assert_eq!(tiers.points(2), 30);
        assert_eq!(tiers.points(3), 30);
        assert_eq!(tiers.points(4), 40);
        assert_eq!(tiers.points(5), 40);
        assert_eq!(tiers.points(6), 50);
        assert_eq!(tiers.points(40), 50);
    }

    #[test]
    fn test_teammate_tiers() {
        let tiers = ScoringWeights::default().teammate_years;
        let points: Vec<u32> = (0..=7).map(|n| tiers.points(n)).collect();
        assert_eq!(points, vec![0, 3, 6, 10, 10, 10, 15, 15]);
    }

    #[test]
    fn test_proximity_table_points() {
        let era = ScoringWeights::default().start_year;
        assert_eq!(era.points(0), 6);
        assert_eq!(era.points(1), 4);
        assert_eq!(era.points(5), 4);
        assert_eq!(era.points(6), 2);
        assert_eq!(era.points(10), 2);
        assert_eq!(era.points(11), 0);
    }

    #[test]
    fn test_tier_table_order_independent() {
        let table = TierTable::new(&[(6, 50), (1, 20)]);
        assert_eq!(table.points(3), 20);
        assert_eq!(table.points(7), 50);
    }

    #[test]
    fn test_partial_weights_json_falls_back_to_defaults() {
        let json = r#"{"streak": {"per_season": 2, "cap": null, "min_shared": 2}}"#;
        let weights: ScoringWeights = serde_json::from_str(json).unwrap();

        assert_eq!(weights.streak.cap, None);
        assert_eq!(weights.shared_seasons, ScoringWeights::default().shared_seasons);
        assert_eq!(weights.max_total, 99);
    }

    #[test]
    fn test_tier_table_json_shape() {
        let json = serde_json::to_string(&TierTable::new(&[(1, 3)])).unwrap();
        assert_eq!(json, r#"[{"min":1,"points":3}]"#);
    }

    #[test]
    fn test_every_embedded_pair_scores_at_most_99() {
        let store = crate::roster::store::PlayerStore::load_embedded().unwrap();
        let engine = SimilarityEngine::default();

        for player1 in store.iter() {
            for player2 in store.iter() {
                let breakdown = engine.score(player1, player2, &player2.name);
                assert!(
                    breakdown.total <= MAX_SIMILARITY,
                    "{} vs {} scored {}",
                    player1.name,
                    player2.name,
                    breakdown.total
                );
            }
        }
    }

    #[test]
    fn test_engine_clamps_max_total() {
        let weights = ScoringWeights {
            max_total: 150,
            ..ScoringWeights::default()
        };
        let engine = SimilarityEngine::new(weights);
        assert_eq!(engine.weights().max_total, MAX_SIMILARITY);
    }
}
