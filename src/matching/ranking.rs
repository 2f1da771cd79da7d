use serde::{Deserialize, Serialize};

use crate::core::player::PlayerRecord;
use crate::core::types::Mode;
use crate::matching::engine::SimilarityEngine;
use crate::matching::MatchError;
use crate::roster::store::PlayerStore;

/// Default number of nearest careers returned for a solved target
pub const DEFAULT_TOP_N: usize = 5;

/// A candidate with its similarity to the target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedPlayer {
    pub name: String,
    pub score: u32,
}

/// Players eligible for ranking, with the mode that selected them
#[derive(Debug, Clone)]
pub struct CandidatePool<'a> {
    pub mode: Mode,
    pub players: Vec<&'a PlayerRecord>,
}

impl<'a> CandidatePool<'a> {
    /// Every player in `store` admitted by `mode`, in store order
    pub fn from_store(store: &'a PlayerStore, mode: Mode) -> Self {
        Self {
            mode,
            players: store.eligible(mode).collect(),
        }
    }
}

/// Orders a candidate pool by similarity to a target
pub struct RankingService<'a> {
    engine: &'a SimilarityEngine,
}

impl<'a> RankingService<'a> {
    pub fn new(engine: &'a SimilarityEngine) -> Self {
        Self { engine }
    }

    /// The `n` candidates most similar to `target`, best first.
    ///
    /// Each candidate is scored as the first player against the target, so
    /// teammate years come from the candidate's own record. Equal scores keep
    /// pool order. The target itself is never included.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::EmptyPool`] if the pool holds no player other
    /// than the target.
    pub fn top_n(
        &self,
        target: &PlayerRecord,
        target_key: &str,
        pool: &CandidatePool<'_>,
        n: usize,
    ) -> Result<Vec<RankedPlayer>, MatchError> {
        let mut ranked: Vec<RankedPlayer> = pool
            .players
            .iter()
            .filter(|candidate| candidate.name != target_key)
            .map(|candidate| RankedPlayer {
                name: candidate.name.clone(),
                score: self.engine.score(candidate, target, target_key).total,
            })
            .collect();

        if ranked.is_empty() {
            return Err(MatchError::EmptyPool { mode: pool.mode });
        }

        // Stable sort keeps pool order among equal scores
        ranked.sort_by(|a, b| b.score.cmp(&a.score));
        ranked.truncate(n);

        tracing::debug!(
            "Ranked {} candidates for {} ({} mode)",
            pool.players.len(),
            target_key,
            pool.mode
        );

        Ok(ranked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::player::Season;

    fn roster() -> PlayerStore {
        let mut store = PlayerStore::new();
        let records = vec![
            PlayerRecord::new("Target")
                .with_seasons((2015..=2020).map(|y| Season::new("DEN", y)).collect())
                .with_position("C")
                .with_start_year(2015),
            PlayerRecord::new("Same Era")
                .with_position("PF")
                .with_start_year(2015),
            PlayerRecord::new("Longtime Teammate")
                .with_seasons((2015..=2020).map(|y| Season::new("DEN", y)).collect())
                .with_position("PG")
                .with_start_year(2010)
                .with_teammate_years("Target", 6),
            PlayerRecord::new("Stranger")
                .with_position("SG")
                .with_start_year(1990),
            PlayerRecord::new("Also Same Era")
                .with_position("SF")
                .with_start_year(2015),
            PlayerRecord::new("Brief Teammate")
                .with_seasons(vec![Season::new("DEN", 2016)])
                .with_position("C")
                .with_start_year(2016),
        ];
        for record in records {
            store.add_player(record).unwrap();
        }
        store
    }

    #[test]
    fn test_top_n_orders_by_score_and_excludes_target() {
        let store = roster();
        let engine = SimilarityEngine::default();
        let ranking = RankingService::new(&engine);
        let target = store.get("Target").unwrap();
        let pool = CandidatePool::from_store(&store, Mode::AllTime);

        let top = ranking.top_n(target, "Target", &pool, 5).unwrap();

        assert_eq!(top.len(), 5);
        assert!(top.iter().all(|r| r.name != "Target"));
        assert!(top.windows(2).all(|w| w[0].score >= w[1].score));
        assert_eq!(top[0].name, "Longtime Teammate");
    }

    #[test]
    fn test_ties_keep_pool_order() {
        let store = roster();
        let engine = SimilarityEngine::default();
        let ranking = RankingService::new(&engine);
        let target = store.get("Target").unwrap();
        let pool = CandidatePool::from_store(&store, Mode::AllTime);

        let top = ranking.top_n(target, "Target", &pool, 10).unwrap();
        let same_era: Vec<&str> = top
            .iter()
            .filter(|r| r.name.contains("Same Era"))
            .map(|r| r.name.as_str())
            .collect();

        assert_eq!(same_era, vec!["Same Era", "Also Same Era"]);
        let first = top.iter().position(|r| r.name == "Same Era").unwrap();
        assert_eq!(top[first].score, top[first + 1].score);
    }

    #[test]
    fn test_candidate_is_first_player() {
        let store = roster();
        let engine = SimilarityEngine::default();
        let ranking = RankingService::new(&engine);
        let target = store.get("Target").unwrap();
        let pool = CandidatePool::from_store(&store, Mode::AllTime);

        let top = ranking.top_n(target, "Target", &pool, 1).unwrap();
        let teammate = store.get("Longtime Teammate").unwrap();
        let expected = engine.score(teammate, target, "Target").total;

        assert_eq!(top[0].score, expected);
        assert_ne!(expected, engine.score(target, teammate, "Longtime Teammate").total);
    }

    #[test]
    fn test_top_n_truncates() {
        let store = roster();
        let engine = SimilarityEngine::default();
        let ranking = RankingService::new(&engine);
        let target = store.get("Target").unwrap();
        let pool = CandidatePool::from_store(&store, Mode::AllTime);

        assert_eq!(ranking.top_n(target, "Target", &pool, 2).unwrap().len(), 2);
        assert!(ranking.top_n(target, "Target", &pool, 0).unwrap().is_empty());
    }

    #[test]
    fn test_pool_of_only_target_is_empty() {
        let mut store = PlayerStore::new();
        store
            .add_player(PlayerRecord::new("Lonely").with_start_year(2015))
            .unwrap();
        let engine = SimilarityEngine::default();
        let ranking = RankingService::new(&engine);
        let target = store.get("Lonely").unwrap();
        let pool = CandidatePool::from_store(&store, Mode::Classic);

        let err = ranking.top_n(target, "Lonely", &pool, 5).unwrap_err();
        assert_eq!(err, MatchError::EmptyPool { mode: Mode::Classic });
    }
}
