use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

use crate::core::types::Archetype;

/// Team code used by box-score sources for a season aggregated across teams
pub const AGGREGATE_TEAM: &str = "TOT";

/// One season played for one franchise
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Season {
    pub team: String,

    /// Season identified by the calendar year in which it ends
    #[serde(rename = "season")]
    pub year: i32,
}

impl Season {
    pub fn new(team: impl Into<String>, year: i32) -> Self {
        Self {
            team: team.into(),
            year,
        }
    }

    /// True for aggregate "multi-team" rows that do not describe a real roster
    #[must_use]
    pub fn is_aggregate(&self) -> bool {
        self.team == AGGREGATE_TEAM
    }
}

/// An All-NBA, All-Defensive or All-Rookie team entry
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AllTeamSelection {
    pub season: i32,

    #[serde(rename = "type")]
    pub kind: String,
}

impl AllTeamSelection {
    pub fn new(season: i32, kind: impl Into<String>) -> Self {
        Self {
            season,
            kind: kind.into(),
        }
    }
}

/// A player's career as stored in the roster
///
/// Every field defaults to empty or zero when absent from the source data, so
/// scoring never has to special-case missing values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    /// Canonical name, populated from the dataset key on load
    #[serde(skip)]
    pub name: String,

    #[serde(default)]
    pub seasons: Vec<Season>,

    /// Franchises the player has belonged to
    #[serde(default)]
    pub teams: BTreeSet<String>,

    /// Seasons shared with other players, keyed by their canonical name.
    /// Only recorded from this player's side.
    #[serde(default)]
    pub teammate_years: IndexMap<String, u32>,

    #[serde(default)]
    pub position: String,

    #[serde(default)]
    pub archetype: Archetype,

    #[serde(default)]
    pub start_year: i32,

    #[serde(default)]
    pub draft_year: i32,

    #[serde(default)]
    pub career_length: u32,

    #[serde(default)]
    pub all_star_seasons: BTreeSet<i32>,

    #[serde(default)]
    pub all_team_selections: Vec<AllTeamSelection>,

    #[serde(default)]
    pub awards_won: BTreeSet<String>,
}

impl PlayerRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_seasons(mut self, seasons: Vec<Season>) -> Self {
        for season in &seasons {
            self.teams.insert(season.team.clone());
        }
        self.seasons = seasons;
        self
    }

    #[must_use]
    pub fn with_position(mut self, position: impl Into<String>) -> Self {
        self.position = position.into();
        self
    }

    #[must_use]
    pub fn with_start_year(mut self, start_year: i32) -> Self {
        self.start_year = start_year;
        self
    }

    #[must_use]
    pub fn with_teammate_years(mut self, teammate: impl Into<String>, years: u32) -> Self {
        self.teammate_years.insert(teammate.into(), years);
        self
    }

    /// Distinct (team, year) pairs played
    #[must_use]
    pub fn season_set(&self) -> HashSet<(&str, i32)> {
        self.seasons
            .iter()
            .map(|s| (s.team.as_str(), s.year))
            .collect()
    }

    /// Years spent with one franchise
    #[must_use]
    pub fn years_with(&self, team: &str) -> BTreeSet<i32> {
        self.seasons
            .iter()
            .filter(|s| s.team == team)
            .map(|s| s.year)
            .collect()
    }

    /// Seasons played alongside `teammate`, as recorded by this player
    #[must_use]
    pub fn teammate_years_with(&self, teammate: &str) -> u32 {
        self.teammate_years.get(teammate).copied().unwrap_or(0)
    }

    /// First two characters of the position, the coarse position group
    #[must_use]
    pub fn position_group(&self) -> &str {
        match self.position.char_indices().nth(2) {
            Some((idx, _)) => &self.position[..idx],
            None => &self.position,
        }
    }

    /// Drop aggregate multi-team rows, returning how many were removed
    pub fn strip_aggregate_seasons(&mut self) -> usize {
        let before = self.seasons.len();
        self.seasons.retain(|s| !s.is_aggregate());
        self.teams.remove(AGGREGATE_TEAM);
        before - self.seasons.len()
    }

    /// Get display name (for logging/UI)
    #[must_use]
    pub fn display_name(&self) -> String {
        if self.start_year > 0 {
            format!("{} ({}, since {})", self.name, self.position, self.start_year)
        } else {
            self.name.clone()
        }
    }
}
