use rand::prelude::IndexedRandom;
use serde_json::json;

use crate::core::player::PlayerRecord;
use crate::core::types::Mode;
use crate::game::counter::GuessCounter;
use crate::matching::engine::SimilarityEngine;
use crate::matching::ranking::{CandidatePool, RankedPlayer, RankingService, DEFAULT_TOP_N};
use crate::matching::resolver::{NameResolver, ResolverConfig};
use crate::matching::scoring::ScoreBreakdown;
use crate::matching::MatchError;
use crate::roster::store::PlayerStore;

/// Score awarded when the guess resolves to the target itself
pub const SOLVED_SCORE: u32 = 100;

pub const SOLVED_MESSAGE: &str = "You got it!";

/// Result of a single guess
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuessOutcome {
    /// The guess resolved to the target
    Solved {
        matched_name: String,
        top: Vec<RankedPlayer>,
    },
    /// The guess resolved to another player
    Scored {
        matched_name: String,
        breakdown: ScoreBreakdown,
    },
}

impl GuessOutcome {
    #[must_use]
    pub fn score(&self) -> u32 {
        match self {
            Self::Solved { .. } => SOLVED_SCORE,
            Self::Scored { breakdown, .. } => breakdown.total,
        }
    }

    /// Canonical name the guess resolved to
    #[must_use]
    pub fn matched_name(&self) -> &str {
        match self {
            Self::Solved { matched_name, .. } | Self::Scored { matched_name, .. } => matched_name,
        }
    }

    #[must_use]
    pub fn is_solved(&self) -> bool {
        matches!(self, Self::Solved { .. })
    }

    /// JSON body returned to clients
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Solved { matched_name, top } => json!({
                "score": SOLVED_SCORE,
                "message": SOLVED_MESSAGE,
                "matched_name": matched_name,
                "top_5": top,
            }),
            Self::Scored {
                matched_name,
                breakdown,
            } => json!({
                "score": breakdown.total,
                "matched_name": matched_name,
                "breakdown": breakdown,
            }),
        }
    }
}

/// Resolves guesses against a target and scores them
pub struct Game<'a> {
    store: &'a PlayerStore,
    engine: &'a SimilarityEngine,
    counter: &'a GuessCounter,
    resolver_config: ResolverConfig,
}

impl<'a> Game<'a> {
    pub fn new(
        store: &'a PlayerStore,
        engine: &'a SimilarityEngine,
        counter: &'a GuessCounter,
    ) -> Self {
        Self {
            store,
            engine,
            counter,
            resolver_config: ResolverConfig::default(),
        }
    }

    #[must_use]
    pub fn with_resolver_config(mut self, config: ResolverConfig) -> Self {
        self.resolver_config = config;
        self
    }

    pub fn resolver(&self) -> NameResolver<'a> {
        NameResolver::with_config(self.store, self.resolver_config)
    }

    /// Resolve both names, count the guess against the target, then score it.
    ///
    /// A guess resolving to the target is solved (score 100) and carries the
    /// target's nearest careers within `mode`.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::NotFound`] if either name resolves to no player,
    /// or [`MatchError::EmptyPool`] if a solved target has nothing to rank.
    pub fn guess(
        &self,
        guess_input: &str,
        target_input: &str,
        mode: Mode,
    ) -> Result<GuessOutcome, MatchError> {
        let resolver = self.resolver();
        let guess = resolver.resolve(guess_input)?;
        let target = resolver.resolve(target_input)?;

        let guesses = self.counter.increment(target.key());
        tracing::debug!(
            "Guess #{} against {}: '{}' -> {}",
            guesses,
            target.key(),
            guess_input,
            guess.key()
        );

        if guess.key() == target.key() {
            let top = self.nearest(target.record, mode, DEFAULT_TOP_N)?;
            return Ok(GuessOutcome::Solved {
                matched_name: guess.key().to_string(),
                top,
            });
        }

        let breakdown = self.engine.score(guess.record, target.record, target.key());
        Ok(GuessOutcome::Scored {
            matched_name: guess.key().to_string(),
            breakdown,
        })
    }

    /// The `n` careers in `mode` most similar to `target`
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::EmptyPool`] if `mode` admits no other player.
    pub fn nearest(
        &self,
        target: &PlayerRecord,
        mode: Mode,
        n: usize,
    ) -> Result<Vec<RankedPlayer>, MatchError> {
        let pool = CandidatePool::from_store(self.store, mode);
        RankingService::new(self.engine).top_n(target, &target.name, &pool, n)
    }

    /// Names eligible under `mode`
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::EmptyPool`] if `mode` admits no player.
    pub fn players(&self, mode: Mode) -> Result<Vec<&'a str>, MatchError> {
        let names = self.store.all_names(mode);
        if names.is_empty() {
            return Err(MatchError::EmptyPool { mode });
        }
        Ok(names)
    }

    /// Pick a random target eligible under `mode`
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::EmptyPool`] if `mode` admits no player.
    pub fn random_target<R: rand::Rng + ?Sized>(
        &self,
        mode: Mode,
        rng: &mut R,
    ) -> Result<&'a PlayerRecord, MatchError> {
        let pool: Vec<&'a PlayerRecord> = self.store.eligible(mode).collect();
        pool.choose(rng)
            .copied()
            .ok_or(MatchError::EmptyPool { mode })
    }
}
