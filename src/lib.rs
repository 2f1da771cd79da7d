//! # nba-mantle
//!
//! A career-similarity guessing game for NBA players.
//!
//! A mystery player is drawn, and each guess is scored by how closely the
//! guessed player's career resembles the mystery player's: seasons on the same
//! team, years as teammates, shared franchises, position, era and honours.
//! Scores run from 0 to 99; only the mystery player itself scores 100.
//!
//! ## Features
//!
//! - **Fuzzy name resolution**: Exact case-insensitive lookup, then the closest
//!   name with a similarity ratio of at least 0.8
//! - **Tiered scoring**: Configurable tier tables per career feature, clamped to 99
//! - **Nearest careers**: Top-5 most similar players once the target is found
//! - **Modes**: `all-time` or `classic` (started 2011 or later, five seasons or more)
//!
//! ## Example
//!
//! ```rust,no_run
//! use nba_mantle::{Mode, NameResolver, PlayerStore, SimilarityEngine};
//!
//! // Load the embedded dataset
//! let store = PlayerStore::load_embedded().unwrap();
//! let resolver = NameResolver::new(&store);
//!
//! let guess = resolver.resolve("dwyane wade").unwrap();
//! let target = resolver.resolve("LeBron James").unwrap();
//!
//! let engine = SimilarityEngine::default();
//! let breakdown = engine.score(guess.record, target.record, target.key());
//! println!("{}: {}/100", guess.key(), breakdown.total);
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Player records, modes and archetypes
//! - [`roster`]: Player storage and dataset loading
//! - [`matching`]: Name resolution, similarity scoring and ranking
//! - [`game`]: Guess orchestration and guess counting
//! - [`cli`]: Command-line interface implementation
//! - [`web`]: JSON API server

pub mod cli;
pub mod core;
pub mod game;
pub mod matching;
pub mod roster;
pub mod utils;
pub mod web;

// Re-export commonly used types for convenience
pub use core::types::*;
pub use core::{PlayerRecord, Season};
pub use game::{Game, GuessCounter, GuessOutcome};
pub use matching::engine::{ScoringWeights, SimilarityEngine};
pub use matching::ranking::{RankedPlayer, RankingService};
pub use matching::resolver::NameResolver;
pub use matching::MatchError;
pub use roster::store::PlayerStore;
