//! Name resolution, career similarity scoring and ranking.
//!
//! This module provides the core matching functionality:
//!
//! - [`resolver::NameResolver`]: Maps free-text input to a canonical player
//! - [`engine::SimilarityEngine`]: Scores how similar two careers are
//! - [`ranking::RankingService`]: Orders a candidate pool by similarity to a target
//!
//! ## Name Resolution
//!
//! 1. **Exact match**: Case-insensitive comparison against canonical names
//! 2. **Fuzzy match**: Highest [`ratio::sequence_ratio`] at or above the cutoff
//!    (0.8 by default), ties going to the earlier player in the roster
//!
//! ## Scoring
//!
//! The score is a sum of independent, non-negative features (shared seasons,
//! streak bonus, teammate years, franchise overlap, tenure, position, era,
//! archetype, shared All-Star, All-Team and award honours), clamped to 99.
//! A score of 100 is reserved for a guess that resolves to the target itself.
//! Every tier table and cap lives in [`engine::ScoringWeights`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use nba_mantle::{NameResolver, PlayerStore, SimilarityEngine};
//!
//! let store = PlayerStore::load_embedded().unwrap();
//! let resolver = NameResolver::new(&store);
//! let guess = resolver.resolve("dwyane wade").unwrap();
//! let target = resolver.resolve("LeBron James").unwrap();
//!
//! let engine = SimilarityEngine::default();
//! let breakdown = engine.score(guess.record, target.record, &target.record.name);
//! println!("{} -> {}", guess.record.name, breakdown.total);
//! ```

use thiserror::Error;

use crate::core::types::Mode;

pub mod engine;
pub mod ranking;
pub mod ratio;
pub mod resolver;
pub mod scoring;

/// Outcomes of resolution and ranking that the caller must handle
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    /// Input resolves to no player, exactly or approximately
    #[error("No player found matching '{input}'")]
    NotFound { input: String },

    /// Ranking or filtering requested against zero eligible players
    #[error("No eligible players in '{mode}' mode")]
    EmptyPool { mode: Mode },
}
