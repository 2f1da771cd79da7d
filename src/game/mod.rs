//! Guess orchestration.
//!
//! A [`Game`] ties the roster, resolver and engine together: both names are
//! resolved, the guess is counted against the target, then either scored or
//! declared solved with the target's nearest careers attached.
//!
//! ```rust,no_run
//! use nba_mantle::{Game, GuessCounter, Mode, PlayerStore, SimilarityEngine};
//!
//! let store = PlayerStore::load_embedded().unwrap();
//! let engine = SimilarityEngine::default();
//! let counter = GuessCounter::new();
//! let game = Game::new(&store, &engine, &counter);
//!
//! let outcome = game.guess("Dwyane Wade", "LeBron James", Mode::AllTime).unwrap();
//! println!("{}: {}", outcome.matched_name(), outcome.score());
//! ```

pub mod counter;
pub mod session;

pub use counter::GuessCounter;
pub use session::{Game, GuessOutcome, SOLVED_SCORE};
