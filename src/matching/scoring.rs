use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

use crate::core::player::{PlayerRecord, Season};
use crate::core::types::ArchetypeRelation;
use crate::matching::engine::ScoringWeights;

/// Per-feature contributions to a similarity score
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Tier points for the number of shared (team, season) pairs
    pub shared_seasons: u32,

    /// Longest consecutive run of shared seasons
    pub shared_streak_bonus: u32,

    pub teammate_years: u32,

    /// Franchises both players belonged to
    pub shared_teams: u32,

    /// Shared seasons per overlapping franchise, capped per team
    pub team_tenure: u32,

    pub position_match: u32,

    /// Start-year proximity
    pub start_year_diff: u32,

    pub archetype_match: u32,

    pub shared_all_star: u32,

    pub shared_all_team: u32,

    pub shared_awards: u32,

    /// The (team, season) pairs behind `shared_seasons`, ordered by season
    pub shared_season_pairs: Vec<Season>,

    /// Clamped sum of every feature
    pub total: u32,
}

impl ScoreBreakdown {
    /// Calculate every feature of `player1` against `player2` (keyed `key2`)
    #[must_use]
    pub fn calculate(
        player1: &PlayerRecord,
        player2: &PlayerRecord,
        key2: &str,
        weights: &ScoringWeights,
    ) -> Self {
        let shared = shared_season_pairs(player1, player2);
        let shared_count = count_to_u32(shared.len());

        let shared_seasons = weights.shared_seasons.points(shared_count);

        let shared_streak_bonus = if shared_count >= weights.streak.min_shared {
            let years: Vec<i32> = shared.iter().map(|s| s.year).collect();
            let bonus = weights
                .streak
                .per_season
                .saturating_mul(longest_consecutive_run(&years));
            weights.streak.cap.map_or(bonus, |cap| bonus.min(cap))
        } else {
            0
        };

        let teammate_years = weights
            .teammate_years
            .points(player1.teammate_years_with(key2));

        let overlap: Vec<&String> = player1.teams.intersection(&player2.teams).collect();
        let team_points = weights
            .franchise_overlap
            .per_team
            .saturating_mul(count_to_u32(overlap.len()));
        let shared_teams = weights
            .franchise_overlap
            .cap
            .map_or(team_points, |cap| team_points.min(cap));

        let team_tenure = overlap
            .iter()
            .map(|team| {
                let together = player1
                    .years_with(team)
                    .intersection(&player2.years_with(team))
                    .count();
                count_to_u32(together).min(weights.tenure_cap_per_team)
            })
            .fold(0u32, u32::saturating_add);

        let position_match = if player1.position == player2.position {
            weights.position.exact
        } else if player1.position_group() == player2.position_group() {
            weights.position.group
        } else {
            0
        };

        let start_year_diff = weights
            .start_year
            .points(player1.start_year.abs_diff(player2.start_year));

        let archetype_match = match player1.archetype.relation(&player2.archetype) {
            ArchetypeRelation::Exact => weights.archetype.exact,
            ArchetypeRelation::Adjacent => weights.archetype.adjacent,
            ArchetypeRelation::Unrelated => 0,
        };

        let shared_all_star = if intersects(&player1.all_star_seasons, &player2.all_star_seasons) {
            weights.shared_all_star
        } else {
            0
        };

        let shared_all_team = if shares_all_team_selection(player1, player2) {
            weights.shared_all_team
        } else {
            0
        };

        let shared_awards = if intersects(&player1.awards_won, &player2.awards_won) {
            weights.shared_award
        } else {
            0
        };

        let mut breakdown = Self {
            shared_seasons,
            shared_streak_bonus,
            teammate_years,
            shared_teams,
            team_tenure,
            position_match,
            start_year_diff,
            archetype_match,
            shared_all_star,
            shared_all_team,
            shared_awards,
            shared_season_pairs: shared,
            total: 0,
        };
        breakdown.total = breakdown.raw_sum().min(weights.max_total);
        breakdown
    }

    /// Feature contributions by name, in reporting order
    #[must_use]
    pub fn features(&self) -> [(&'static str, u32); 11] {
        [
            ("shared_seasons", self.shared_seasons),
            ("shared_streak_bonus", self.shared_streak_bonus),
            ("teammate_years", self.teammate_years),
            ("shared_teams", self.shared_teams),
            ("team_tenure", self.team_tenure),
            ("position_match", self.position_match),
            ("start_year_diff", self.start_year_diff),
            ("archetype_match", self.archetype_match),
            ("shared_all_star", self.shared_all_star),
            ("shared_all_team", self.shared_all_team),
            ("shared_awards", self.shared_awards),
        ]
    }

    /// Sum of every feature before clamping
    #[must_use]
    pub fn raw_sum(&self) -> u32 {
        self.features()
            .iter()
            .fold(0u32, |sum, (_, points)| sum.saturating_add(*points))
    }
}

/// (team, season) pairs played by both, ordered by season then team
fn shared_season_pairs(player1: &PlayerRecord, player2: &PlayerRecord) -> Vec<Season> {
    let theirs = player2.season_set();
    let shared: BTreeSet<(i32, &str)> = player1
        .season_set()
        .into_iter()
        .filter(|pair| theirs.contains(pair))
        .map(|(team, year)| (year, team))
        .collect();

    shared
        .into_iter()
        .map(|(year, team)| Season::new(team, year))
        .collect()
}

/// Length of the longest run of consecutive years.
///
/// Years may arrive unsorted and may repeat (two shared teams in one season);
/// a repeated year neither extends nor breaks a run. Repeats are collapsed
/// before counting on purpose: resetting the run on a repeat is not wanted.
fn longest_consecutive_run(years: &[i32]) -> u32 {
    let distinct: BTreeSet<i32> = years.iter().copied().collect();

    let mut longest = 0u32;
    let mut run = 0u32;
    let mut previous: Option<i32> = None;
    for year in distinct {
        run = match previous {
            Some(p) if p.checked_add(1) == Some(year) => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        previous = Some(year);
    }
    longest
}

fn intersects<T: Ord>(a: &BTreeSet<T>, b: &BTreeSet<T>) -> bool {
    a.intersection(b).next().is_some()
}

fn shares_all_team_selection(player1: &PlayerRecord, player2: &PlayerRecord) -> bool {
    let theirs: HashSet<(i32, &str)> = player2
        .all_team_selections
        .iter()
        .map(|s| (s.season, s.kind.as_str()))
        .collect();

    player1
        .all_team_selections
        .iter()
        .any(|s| theirs.contains(&(s.season, s.kind.as_str())))
}

#[inline]
fn count_to_u32(count: usize) -> u32 {
    u32::try_from(count).unwrap_or(u32::MAX)
}
