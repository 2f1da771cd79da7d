//! Core data types for career comparison.
//!
//! - [`PlayerRecord`]: One player's career, immutable once loaded
//! - [`Season`], [`AllTeamSelection`]: Pieces of a career record
//! - [`Mode`]: Eligibility filter (`all-time`, `classic`)
//! - [`Archetype`]: Coarse positional tag with a fixed adjacency relation
//!
//! Records are produced by the roster loader and only ever read afterwards.
//! Any field missing from the source data takes an empty or zero default.

pub mod player;
pub mod types;

pub use player::{AllTeamSelection, PlayerRecord, Season};
pub use types::{Archetype, ArchetypeRelation, Mode};
