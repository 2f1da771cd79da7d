//! Player roster storage.
//!
//! The roster holds every [`PlayerRecord`](crate::core::PlayerRecord) keyed by
//! canonical name. An embedded dataset is compiled into the binary, but custom
//! datasets can also be loaded from JSON files.
//!
//! ## Dataset Format
//!
//! A JSON object keyed by canonical name. Every field of a player is optional:
//!
//! ```json
//! {
//!   "Klay Thompson": {
//!     "seasons": [{"team": "GSW", "season": 2015}],
//!     "teams": ["GSW"],
//!     "teammate_years": {"Stephen Curry": 11},
//!     "position": "SG",
//!     "archetype": "Guard",
//!     "start_year": 2012,
//!     "career_length": 11
//!   }
//! }
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use nba_mantle::{Mode, PlayerStore};
//!
//! let store = PlayerStore::load_embedded().unwrap();
//! for name in store.all_names(Mode::Classic) {
//!     println!("{name}");
//! }
//! ```

pub mod store;
