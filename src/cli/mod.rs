//! Command-line interface for nba-mantle.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **guess**: Score one guess against a target
//! - **compare**: Raw similarity between two players, both directions
//! - **top**: Nearest careers to a player
//! - **players**: List players eligible under a mode
//! - **resolve**: Show which player a name resolves to
//! - **play**: Interactive guessing game on the terminal
//! - **export**: Write the loaded dataset to a JSON file
//! - **serve**: Start the JSON API
//!
//! ## Usage
//!
//! ```text
//! # Score a guess
//! nba-mantle guess "Dwyane Wade" "LeBron James"
//!
//! # Nearest careers among classic-mode players, as JSON
//! nba-mantle top "Klay Thompson" --mode classic --format json
//!
//! # Play against a random classic-mode target
//! nba-mantle play --mode classic
//!
//! # Start the API with custom scoring weights
//! nba-mantle serve --port 5000 --weights weights.json
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::matching::engine::{ScoringWeights, SimilarityEngine};
use crate::matching::resolver::{ResolverConfig, DEFAULT_CUTOFF};
use crate::roster::store::PlayerStore;

pub mod compare;
pub mod export;
pub mod guess;
pub mod play;
pub mod players;
pub mod resolve;
pub mod top;

#[derive(Parser)]
#[command(name = "nba-mantle")]
#[command(version)]
#[command(about = "Guess the mystery NBA player by career similarity")]
#[command(
    long_about = "nba-mantle scores how similar two NBA careers are.\n\nGuesses are resolved to players by exact or fuzzy name matching and scored on:\n- Seasons played for the same team\n- Years as teammates and shared franchises\n- Position, era and shared honours"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score a guess against a target player
    Guess(guess::GuessArgs),

    /// Compare two players in both directions
    Compare(compare::CompareArgs),

    /// Show the careers most similar to a player
    Top(top::TopArgs),

    /// List players eligible under a mode
    Players(players::PlayersArgs),

    /// Show which player a name resolves to
    Resolve(resolve::ResolveArgs),

    /// Play the guessing game interactively
    Play(play::PlayArgs),

    /// Export the loaded dataset to a file
    Export(export::ExportArgs),

    /// Start the web server
    Serve(ServeArgs),
}

/// Dataset and scoring options shared by every command
#[derive(clap::Args, Clone, Debug)]
pub struct SourceArgs {
    /// Path to a custom player dataset (defaults to the embedded one)
    #[arg(long)]
    pub players: Option<PathBuf>,

    /// Path to a scoring weights JSON file
    #[arg(long)]
    pub weights: Option<PathBuf>,

    /// Minimum similarity ratio for fuzzy name matches, between 0 and 1
    #[arg(long, default_value_t = DEFAULT_CUTOFF, value_parser = parse_cutoff)]
    pub cutoff: f64,
}

impl SourceArgs {
    /// Load the player dataset
    ///
    /// # Errors
    ///
    /// Returns an error if the dataset cannot be read or parsed.
    pub fn load_store(&self, verbose: bool) -> anyhow::Result<PlayerStore> {
        let store = if let Some(path) = &self.players {
            PlayerStore::load_from_file(path)?
        } else {
            PlayerStore::load_embedded()?
        };

        if verbose {
            eprintln!("Loaded {} players", store.len());
        }

        Ok(store)
    }

    /// Build the similarity engine, from the weights file if one was given
    ///
    /// # Errors
    ///
    /// Returns an error if the weights file cannot be read or parsed.
    pub fn load_engine(&self) -> anyhow::Result<SimilarityEngine> {
        let weights = match &self.weights {
            Some(path) => ScoringWeights::load_from_file(path)?,
            None => ScoringWeights::default(),
        };
        Ok(SimilarityEngine::new(weights))
    }

    /// Resolver settings; a cutoff outside [0, 1] falls back to the default
    #[must_use]
    pub fn resolver_config(&self) -> ResolverConfig {
        let cutoff = if (0.0..=1.0).contains(&self.cutoff) {
            self.cutoff
        } else {
            DEFAULT_CUTOFF
        };
        ResolverConfig { cutoff }
    }
}

/// Parse a fuzzy-match cutoff, rejecting NaN and values outside [0, 1]
fn parse_cutoff(raw: &str) -> Result<f64, String> {
    let cutoff: f64 = raw
        .parse()
        .map_err(|_| format!("'{raw}' is not a number"))?;
    if (0.0..=1.0).contains(&cutoff) {
        Ok(cutoff)
    } else {
        Err(format!("cutoff must be between 0 and 1, got '{raw}'"))
    }
}

#[derive(clap::Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, default_value = "5000")]
    pub port: u16,

    /// Address to bind to
    #[arg(short, long, default_value = "127.0.0.1")]
    pub address: String,

    /// Open browser automatically
    #[arg(long)]
    pub open: bool,

    #[command(flatten)]
    pub source: SourceArgs,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Print ranked players as a table in the requested format
pub(crate) fn print_ranking(
    ranked: &[crate::matching::ranking::RankedPlayer],
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            for (i, player) in ranked.iter().enumerate() {
                println!("  {:>2}. {:<25} {:>3}/100", i + 1, player.name, player.score);
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(ranked)?);
        }
        OutputFormat::Tsv => {
            println!("rank\tname\tscore");
            for (i, player) in ranked.iter().enumerate() {
                println!("{}\t{}\t{}", i + 1, player.name, player.score);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cutoff_accepts_unit_interval() {
        assert_eq!(parse_cutoff("0.8"), Ok(0.8));
        assert_eq!(parse_cutoff("0"), Ok(0.0));
        assert_eq!(parse_cutoff("1"), Ok(1.0));
    }

    #[test]
    fn test_cutoff_rejects_nan_and_out_of_range() {
        for raw in ["NaN", "nan", "inf", "-0.1", "1.5", "abc"] {
            assert!(parse_cutoff(raw).is_err(), "{raw} should be rejected");
        }

        let parsed = Cli::try_parse_from(["nba-mantle", "resolve", "zzzz", "--cutoff", "NaN"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_resolver_config_never_passes_nan() {
        let source = SourceArgs {
            players: None,
            weights: None,
            cutoff: f64::NAN,
        };
        assert_eq!(source.resolver_config().cutoff, DEFAULT_CUTOFF);

        let store = PlayerStore::load_embedded().unwrap();
        let resolver =
            crate::matching::resolver::NameResolver::with_config(&store, source.resolver_config());
        assert!(resolver.resolve("zzzz").is_err());
    }
}
